//! Typed transaction query, validated before any storage lookup
//!
//! The same query drives both backends: `Database` turns it into SQL via
//! `db::TransactionFilter`, `MemoryStore` evaluates `matches` and `apply`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Direction, Transaction};

/// Largest page a single query may return
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Column to order results by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Amount,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            _ => Err(format!("Unknown sort field: {} (valid: date, amount)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort order: {} (valid: asc, desc)", s)),
        }
    }
}

/// Filter, sort and page transactions
///
/// Every filter is optional; the default query returns all transactions,
/// newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub direction: Option<Direction>,
    /// Inclusive on both ends
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub sort: SortField,
    pub order: SortOrder,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn amount_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = field;
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Search text with surrounding whitespace removed, if any is left
    pub(crate) fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Reject queries that cannot match anything sensible
    pub fn validate(&self) -> Result<()> {
        if let Some((start, end)) = self.date_range {
            if start > end {
                return Err(Error::InvalidQuery(format!(
                    "date range starts ({}) after it ends ({})",
                    start, end
                )));
            }
        }

        for (name, bound) in [("min_amount", self.min_amount), ("max_amount", self.max_amount)] {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidQuery(format!(
                        "{} must be a non-negative number, got {}",
                        name, value
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(Error::InvalidQuery(format!(
                    "min_amount {} exceeds max_amount {}",
                    min, max
                )));
            }
        }

        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_QUERY_LIMIT {
                return Err(Error::InvalidQuery(format!(
                    "limit must be between 1 and {}, got {}",
                    MAX_QUERY_LIMIT, limit
                )));
            }
        }

        Ok(())
    }

    /// Whether a transaction passes every filter (sorting and paging aside)
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.user_id.is_some_and(|id| tx.user_id != id) {
            return false;
        }
        if self.category_id.is_some_and(|id| tx.category_id != id) {
            return false;
        }
        if self.direction.is_some_and(|d| tx.direction() != d) {
            return false;
        }
        if let Some((start, end)) = self.date_range {
            if tx.date < start || tx.date > end {
                return false;
            }
        }
        if self.min_amount.is_some_and(|min| tx.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| tx.amount > max) {
            return false;
        }
        if let Some(term) = self.search_term() {
            if !tx
                .description
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Filter, sort and page an in-memory list
    ///
    /// Ties on the sort column fall back to id, newest first, matching the
    /// SQL ordering.
    pub fn apply(&self, transactions: impl IntoIterator<Item = Transaction>) -> Vec<Transaction> {
        let mut result: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| self.matches(t))
            .collect();

        result.sort_by(|a, b| {
            let ordering = match self.sort {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a
                    .amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal),
            };
            let ordering = match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            ordering.then_with(|| b.id.cmp(&a.id))
        });

        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        result.into_iter().skip(offset).take(limit).collect()
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

    fn tx(id: i64, amount: f64, desc: &str, day: u32, is_income: bool) -> Transaction {
        let mut t = Transaction::new(1, amount, desc, 1, at(2024, 1, day), is_income);
        t.id = id;
        t
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, 50.0, "Grocery store", 3, false),
            tx(2, 2000.0, "Salary", 1, true),
            tx(3, 12.0, "Coffee", 3, false),
            tx(4, 80.0, "GROCERY delivery", 10, false),
        ]
    }

    #[test]
    fn test_default_query_is_valid_and_sorted_newest_first() {
        let query = TransactionQuery::new();
        assert!(query.validate().is_ok());

        let ids: Vec<i64> = query.apply(sample()).iter().map(|t| t.id).collect();
        // Same-day ties broken by id descending
        assert_eq!(ids, vec![4, 3, 1, 2]);
    }

    #[test]
    fn test_validate_rejects_bad_queries() {
        let inverted = TransactionQuery::new().between(at(2024, 2, 1), at(2024, 1, 1));
        assert!(matches!(inverted.validate(), Err(Error::InvalidQuery(_))));

        let negative = TransactionQuery::new().amount_between(Some(-1.0), None);
        assert!(negative.validate().is_err());

        let crossed = TransactionQuery::new().amount_between(Some(100.0), Some(10.0));
        assert!(crossed.validate().is_err());

        assert!(TransactionQuery::new().limit(0).validate().is_err());
        assert!(TransactionQuery::new().limit(1001).validate().is_err());
        assert!(TransactionQuery::new().limit(1000).validate().is_ok());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = TransactionQuery::new().search("  grocery ");
        let ids: Vec<i64> = query.apply(sample()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let query = TransactionQuery::new().search("   ");
        assert_eq!(query.apply(sample()).len(), 4);
    }

    #[test]
    fn test_direction_and_amount_filters() {
        let query = TransactionQuery::new()
            .direction(Direction::Expense)
            .amount_between(Some(20.0), Some(100.0));
        let ids: Vec<i64> = query.apply(sample()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_sort_by_amount_ascending_with_paging() {
        let query = TransactionQuery::new()
            .sort_by(SortField::Amount, SortOrder::Asc)
            .offset(1)
            .limit(2);
        let ids: Vec<i64> = query.apply(sample()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let query = TransactionQuery::new().between(at(2024, 1, 1), at(2024, 1, 3));
        assert_eq!(query.apply(sample()).len(), 3);
    }
}
