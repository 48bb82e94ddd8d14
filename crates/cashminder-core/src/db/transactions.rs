//! Transaction operations

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::transaction_filter::TransactionFilter;
use super::Database;
use crate::error::{Error, Result};
use crate::models::{Transaction, NEW_ID};
use crate::query::TransactionQuery;
use crate::repository::{Repository, TransactionQueries};

const TRANSACTION_COLUMNS: &str =
    "t.id, t.user_id, t.amount, t.description, t.category_id, t.date, t.is_income, t.created_at";

impl Database {
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            description: row.get(3)?,
            category_id: row.get(4)?,
            date: row.get(5)?,
            is_income: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    /// Number of a user's transactions referencing a category
    pub fn count_transactions_in_category(&self, user_id: i64, category_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ? AND category_id = ?",
            params![user_id, category_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl Repository<Transaction> for Database {
    fn get(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions t WHERE t.id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    fn list(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions t ORDER BY t.id",
            TRANSACTION_COLUMNS
        ))?;
        let txs = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    fn save(&self, mut tx: Transaction) -> Result<Transaction> {
        let conn = self.conn()?;

        if tx.id == NEW_ID {
            conn.execute(
                r#"
                INSERT INTO transactions (user_id, amount, description, category_id, date, is_income, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    tx.user_id,
                    tx.amount,
                    tx.description,
                    tx.category_id,
                    tx.date,
                    tx.is_income,
                    tx.created_at,
                ],
            )?;
            tx.id = conn.last_insert_rowid();
        } else {
            let changed = conn.execute(
                r#"
                UPDATE transactions
                SET user_id = ?, amount = ?, description = ?, category_id = ?, date = ?, is_income = ?
                WHERE id = ?
                "#,
                params![
                    tx.user_id,
                    tx.amount,
                    tx.description,
                    tx.category_id,
                    tx.date,
                    tx.is_income,
                    tx.id,
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound(format!("transaction {}", tx.id)));
            }
        }

        debug!(id = tx.id, "Saved transaction");
        Ok(tx)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }
}

impl TransactionQueries for Database {
    fn query_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        query.validate()?;

        let filter = TransactionFilter::new(query).build();
        let sql = filter.build_select_query(TRANSACTION_COLUMNS);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let params_refs = filter.params_refs();
        let txs = stmt
            .query_map(params_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(txs)
    }
}
