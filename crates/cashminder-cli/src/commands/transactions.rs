//! Transaction command implementations

use anyhow::{Context, Result};
use cashminder_core::{
    Database, Direction, Ledger, SortField, SortOrder, Transaction, TransactionQuery,
};
use chrono::{Local, NaiveDate, NaiveTime};

use super::{colored_amount, truncate};

/// Filters accepted by `transactions list`
#[derive(Debug, Clone)]
pub struct ListFilters {
    pub limit: usize,
    pub offset: usize,
    pub category: Option<i64>,
    pub kind: Option<Direction>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            category: None,
            kind: None,
            search: None,
            from: None,
            to: None,
            min: None,
            max: None,
            sort: SortField::Date,
            order: SortOrder::Desc,
        }
    }
}

impl ListFilters {
    pub fn to_query(&self) -> TransactionQuery {
        let mut query = TransactionQuery::new()
            .sort_by(self.sort, self.order)
            .amount_between(self.min, self.max)
            .limit(self.limit)
            .offset(self.offset);

        if let Some(category) = self.category {
            query = query.category(category);
        }
        if let Some(kind) = self.kind {
            query = query.direction(kind);
        }
        if let Some(search) = &self.search {
            query = query.search(search.as_str());
        }
        if self.from.is_some() || self.to.is_some() {
            // Open ends stay within four-digit years so SQLite text comparison holds
            let earliest = self
                .from
                .or_else(|| NaiveDate::from_ymd_opt(1, 1, 1))
                .unwrap_or(NaiveDate::MIN);
            let latest = self
                .to
                .or_else(|| NaiveDate::from_ymd_opt(9999, 12, 31))
                .unwrap_or(NaiveDate::MAX);
            let end = latest
                .and_hms_opt(23, 59, 59)
                .unwrap_or_else(|| latest.and_time(NaiveTime::MIN));
            query = query.between(earliest.and_time(NaiveTime::MIN), end);
        }

        query
    }
}

pub fn cmd_transactions_list(ledger: &Ledger<Database>, filters: &ListFilters) -> Result<()> {
    let transactions = ledger
        .query_transactions(&filters.to_query())
        .context("Failed to query transactions")?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  cashminder transactions add 12.50 \"Lunch\" --category <id>");
        return Ok(());
    }

    let categories = ledger.categories()?;

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let category = categories
            .iter()
            .find(|c| c.id == tx.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown");

        println!(
            "   [{}] {} │ {:>12} │ {:<18} │ {}",
            tx.id,
            tx.date.format("%Y-%m-%d"),
            colored_amount(tx.amount, tx.is_income),
            truncate(category, 18),
            truncate(&tx.description, 35)
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    ledger: &Ledger<Database>,
    amount: f64,
    description: &str,
    category_id: i64,
    date: Option<NaiveDate>,
    income: bool,
) -> Result<()> {
    // The category decides the direction when it exists
    let is_income = ledger
        .categories()?
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.is_income)
        .unwrap_or(income);
    let day = date.unwrap_or_else(|| Local::now().date_naive());

    let tx = ledger
        .add_transaction(Transaction::on_day(
            ledger.user_id(),
            amount,
            description,
            category_id,
            day,
            is_income,
        ))
        .context("Failed to add transaction")?;

    println!("✅ Recorded transaction {}:", tx.id);
    println!(
        "   {} │ {} │ {}",
        tx.date.format("%Y-%m-%d"),
        colored_amount(tx.amount, tx.is_income),
        truncate(&tx.description, 40)
    );

    Ok(())
}

pub fn cmd_transactions_delete(ledger: &Ledger<Database>, id: i64) -> Result<()> {
    if !ledger.delete_transaction(id)? {
        anyhow::bail!("Transaction {} not found", id);
    }

    println!("✅ Deleted transaction {}", id);
    Ok(())
}
