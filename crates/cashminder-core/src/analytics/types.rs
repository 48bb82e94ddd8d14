//! Core types for the analytics module

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Named analytics windows offered by the period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RangeKey {
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "last3months")]
    Last3Months,
    #[serde(rename = "last6months")]
    Last6Months,
    #[serde(rename = "yearToDate")]
    YearToDate,
}

impl RangeKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKey::Last7Days => "last7days",
            RangeKey::Last30Days => "last30days",
            RangeKey::Last3Months => "last3months",
            RangeKey::Last6Months => "last6months",
            RangeKey::YearToDate => "yearToDate",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RangeKey::Last7Days => "Last 7 days",
            RangeKey::Last30Days => "Last 30 days",
            RangeKey::Last3Months => "Last 3 months",
            RangeKey::Last6Months => "Last 6 months",
            RangeKey::YearToDate => "Year to date",
        }
    }

    pub fn all() -> &'static [RangeKey] {
        &[
            RangeKey::Last7Days,
            RangeKey::Last30Days,
            RangeKey::Last3Months,
            RangeKey::Last6Months,
            RangeKey::YearToDate,
        ]
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RangeKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown range: {}. Available: last7days, last30days, last3months, last6months, yearToDate",
                    s
                )
            })
    }
}

/// An inclusive `[start, end]` window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl TimeRange {
    /// Create a range, rejecting one that ends before it starts
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, label: impl Into<String>) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            label: label.into(),
        })
    }

    /// Whether an instant falls inside the range (both ends inclusive)
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// One bucket of the monthly trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// Short month name, e.g. "Jan"
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyData {
    pub fn savings(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub category_id: i64,
    /// Category name, "Unknown" when the reference dangles
    pub category: String,
    pub color: String,
    pub amount: f64,
    /// Share of total expenses (0-100)
    pub percentage: f64,
}

/// Totals and breakdowns for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    pub monthly_data: Vec<MonthlyData>,
    /// Sorted by amount, largest first
    pub category_data: Vec<CategoryData>,
}

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which rule produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    SavingsRate,
    CategoryIncrease,
    TopCategory,
    IncomeTrend,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::SavingsRate => "savings_rate",
            InsightKind::CategoryIncrease => "category_increase",
            InsightKind::TopCategory => "top_category",
            InsightKind::IncomeTrend => "income_trend",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A natural-language observation about the current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub polarity: Polarity,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        polarity: Polarity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            polarity,
        }
    }
}

/// Everything the dashboard renders for one selected period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub period: TimeRange,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    /// Percent change vs the previous period of equal length
    pub income_change: f64,
    pub expense_change: f64,
    pub savings_change: f64,
    /// Trailing months ending at the current month, independent of `period`
    pub monthly_data: Vec<MonthlyData>,
    pub category_data: Vec<CategoryData>,
    pub insights: Vec<Insight>,
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

    #[test]
    fn test_range_key_parsing() {
        assert_eq!(RangeKey::from_str("last7days").unwrap(), RangeKey::Last7Days);
        assert_eq!(RangeKey::from_str("YEARTODATE").unwrap(), RangeKey::YearToDate);
        assert!(RangeKey::from_str("last-week").is_err());
    }

    #[test]
    fn test_range_key_serializes_as_dashboard_key() {
        let json = serde_json::to_string(&RangeKey::YearToDate).unwrap();
        assert_eq!(json, "\"yearToDate\"");
    }

    #[test]
    fn test_time_range_rejects_inverted_bounds() {
        let err = TimeRange::new(at(2024, 2, 1), at(2024, 1, 1), "bad").unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_time_range_contains_is_inclusive() {
        let range = TimeRange::new(at(2024, 1, 1), at(2024, 1, 31), "Jan").unwrap();
        assert!(range.contains(at(2024, 1, 1)));
        assert!(range.contains(at(2024, 1, 31)));
        assert!(!range.contains(at(2024, 2, 1)));
    }

    #[test]
    fn test_summary_uses_camel_case_keys() {
        let summary = AnalyticsSummary {
            period: TimeRange::new(at(2024, 1, 1), at(2024, 1, 31), "Jan").unwrap(),
            total_income: 0.0,
            total_expenses: 0.0,
            net_savings: 0.0,
            income_change: 0.0,
            expense_change: 0.0,
            savings_change: 0.0,
            monthly_data: vec![],
            category_data: vec![],
            insights: vec![],
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("totalIncome").is_some());
        assert!(value.get("netSavings").is_some());
        assert!(value.get("categoryData").is_some());
    }
}
