//! Export functionality for transactions
//!
//! Supports:
//! - CSV with resolved category names (`date,description,amount,type,category`)
//! - Pretty-printed JSON, one object per transaction

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Category, Transaction};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (valid: csv, json)", s)),
        }
    }
}

/// A transaction with its category resolved for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionExport {
    pub id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub amount: f64,
    /// "income" or "expense"
    #[serde(rename = "type")]
    pub kind: String,
    /// Empty when the category no longer exists
    pub category: String,
}

impl TransactionExport {
    pub fn new(tx: &Transaction, categories: &[Category]) -> Self {
        let category = categories
            .iter()
            .find(|c| c.id == tx.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        Self {
            id: tx.id,
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: tx.description.clone(),
            amount: tx.amount,
            kind: tx.direction().as_str().to_string(),
            category,
        }
    }
}

/// Resolve categories for a list of transactions, keeping order
pub fn export_rows(transactions: &[Transaction], categories: &[Category]) -> Vec<TransactionExport> {
    transactions
        .iter()
        .map(|tx| TransactionExport::new(tx, categories))
        .collect()
}

/// Write transactions as CSV; returns the number of rows written
pub fn write_transactions_csv<W: Write>(
    writer: W,
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "description", "amount", "type", "category"])?;

    for row in export_rows(transactions, categories) {
        let amount = format!("{:.2}", row.amount);
        wtr.write_record([
            row.date.as_str(),
            row.description.as_str(),
            amount.as_str(),
            row.kind.as_str(),
            row.category.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(transactions.len())
}

/// Write transactions as a pretty JSON array; returns the number written
pub fn write_transactions_json<W: Write>(
    writer: W,
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<usize> {
    let rows = export_rows(transactions, categories);
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(rows.len())
}

/// Export in the chosen format
pub fn export_transactions<W: Write>(
    writer: W,
    format: ExportFormat,
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<usize> {
    match format {
        ExportFormat::Csv => write_transactions_csv(writer, transactions, categories),
        ExportFormat::Json => write_transactions_json(writer, transactions, categories),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixtures() -> (Vec<Transaction>, Vec<Category>) {
        let mut food = Category::new(1, "Food & Dining", "#F97316", false);
        food.id = 5;

        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut lunch = Transaction::on_day(1, 12.5, "Lunch, with \"friends\"", 5, day, false);
        lunch.id = 1;
        let mut pay = Transaction::on_day(1, 2000.0, "Salary", 99, day, true);
        pay.id = 2;

        (vec![lunch, pay], vec![food])
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_csv_export_quotes_and_resolves_categories() {
        let (txs, cats) = fixtures();
        let mut out = Vec::new();
        let count = write_transactions_csv(&mut out, &txs, &cats).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,description,amount,type,category");
        assert_eq!(
            lines[1],
            "2024-01-15,\"Lunch, with \"\"friends\"\"\",12.50,expense,Food & Dining"
        );
        assert_eq!(lines[2], "2024-01-15,Salary,2000.00,income,");
    }

    #[test]
    fn test_csv_export_empty_has_header_only() {
        let mut out = Vec::new();
        write_transactions_csv(&mut out, &[], &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,description,amount,type,category\n"
        );
    }

    #[test]
    fn test_json_export() {
        let (txs, cats) = fixtures();
        let mut out = Vec::new();
        export_transactions(&mut out, ExportFormat::Json, &txs, &cats).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["type"], "expense");
        assert_eq!(rows[0]["category"], "Food & Dining");
        assert_eq!(rows[1]["amount"], 2000.0);
    }
}
