//! Selecting the transactions of a period and of the period before it

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::Transaction;

/// Transactions dated within `[start, end]`, in input order
pub fn filter_by_range(
    transactions: &[Transaction],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

/// Transactions in the window of equal length that ends where `[start, end]` begins
///
/// The window is `[start - len, start]`, so a transaction dated exactly at
/// `start` falls in both periods. A zero-length or inverted period has no
/// predecessor and yields nothing.
pub fn previous_period(
    transactions: &[Transaction],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Transaction> {
    if start >= end {
        debug!(%start, %end, "Zero-length period has no predecessor");
        return vec![];
    }

    let length = end - start;
    match start.checked_sub_signed(length) {
        Some(prev_start) => filter_by_range(transactions, prev_start, start),
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn tx(id: i64, date: NaiveDateTime) -> Transaction {
        let mut t = Transaction::new(1, 10.0, format!("tx {}", id), 1, date, false);
        t.id = id;
        t
    }

    #[test]
    fn test_filter_is_inclusive_and_ordered() {
        let txs = vec![
            tx(1, at(2024, 1, 31)),
            tx(2, at(2024, 1, 1)),
            tx(3, at(2023, 12, 31)),
            tx(4, at(2024, 1, 15)),
            tx(5, at(2024, 2, 1)),
        ];

        let ids: Vec<i64> = filter_by_range(&txs, at(2024, 1, 1), at(2024, 1, 31))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_by_range(&[], at(2024, 1, 1), at(2024, 1, 31)).is_empty());
    }

    #[test]
    fn test_previous_period_same_length() {
        // Current: Jan 11 - Jan 21 (10 days); previous: Jan 1 - Jan 11
        let txs = vec![
            tx(1, at(2023, 12, 31)),
            tx(2, at(2024, 1, 1)),
            tx(3, at(2024, 1, 11)),
            tx(4, at(2024, 1, 12)),
        ];

        let ids: Vec<i64> = previous_period(&txs, at(2024, 1, 11), at(2024, 1, 21))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_previous_period_zero_length_is_empty() {
        let txs = vec![tx(1, at(2024, 1, 1))];
        assert!(previous_period(&txs, at(2024, 1, 1), at(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_previous_period_inverted_is_empty() {
        let txs = vec![tx(1, at(2024, 1, 1))];
        assert!(previous_period(&txs, at(2024, 2, 1), at(2024, 1, 1)).is_empty());
    }
}
