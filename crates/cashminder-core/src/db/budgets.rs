//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::{invalid_column, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, NEW_ID};
use crate::repository::Repository;

impl Database {
    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let period_str: String = row.get(4)?;
        Ok(Budget {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category_id: row.get(2)?,
            amount: row.get(3)?,
            period: period_str.parse().map_err(|e| invalid_column(4, e))?,
            created_at: row.get(5)?,
        })
    }
}

impl Repository<Budget> for Database {
    fn get(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, user_id, category_id, amount, period, created_at FROM budgets WHERE id = ?",
                params![id],
                Self::row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    fn list(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, category_id, amount, period, created_at FROM budgets ORDER BY id",
        )?;
        let budgets = stmt
            .query_map([], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    fn save(&self, mut budget: Budget) -> Result<Budget> {
        let conn = self.conn()?;

        if budget.id == NEW_ID {
            conn.execute(
                "INSERT INTO budgets (user_id, category_id, amount, period, created_at) VALUES (?, ?, ?, ?, ?)",
                params![
                    budget.user_id,
                    budget.category_id,
                    budget.amount,
                    budget.period.as_str(),
                    budget.created_at,
                ],
            )?;
            budget.id = conn.last_insert_rowid();
        } else {
            let changed = conn.execute(
                "UPDATE budgets SET user_id = ?, category_id = ?, amount = ?, period = ? WHERE id = ?",
                params![
                    budget.user_id,
                    budget.category_id,
                    budget.amount,
                    budget.period.as_str(),
                    budget.id,
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound(format!("budget {}", budget.id)));
            }
        }

        Ok(budget)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }
}
