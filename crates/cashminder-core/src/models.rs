//! Domain models: transactions, categories, budgets, savings goals

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// User that owns records when the caller does not pick one (single-user CLI)
pub const DEFAULT_USER_ID: i64 = 1;

/// Id carried by a record that has not been persisted yet
pub const NEW_ID: i64 = 0;

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn from_is_income(is_income: bool) -> Self {
        if is_income {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown direction: {} (valid: income, expense)",
                s
            )),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    /// Always non-negative; direction lives in `is_income`
    pub amount: f64,
    pub description: String,
    /// May reference a category that no longer exists
    pub category_id: i64,
    /// When the money moved (not when the record was created)
    pub date: NaiveDateTime,
    pub is_income: bool,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Build an unsaved transaction
    pub fn new(
        user_id: i64,
        amount: f64,
        description: impl Into<String>,
        category_id: i64,
        date: NaiveDateTime,
        is_income: bool,
    ) -> Self {
        Self {
            id: NEW_ID,
            user_id,
            amount,
            description: description.into(),
            category_id,
            date,
            is_income,
            created_at: Utc::now(),
        }
    }

    /// Build an unsaved transaction dated at midnight of a calendar day
    pub fn on_day(
        user_id: i64,
        amount: f64,
        description: impl Into<String>,
        category_id: i64,
        day: NaiveDate,
        is_income: bool,
    ) -> Self {
        Self::new(
            user_id,
            amount,
            description,
            category_id,
            day.and_time(NaiveTime::MIN),
            is_income,
        )
    }

    pub fn direction(&self) -> Direction {
        Direction::from_is_income(self.is_income)
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Display hint only
    pub color: String,
    /// Transactions in this category must share this direction
    pub is_income: bool,
    pub is_default: bool,
}

impl Category {
    pub fn new(
        user_id: i64,
        name: impl Into<String>,
        color: impl Into<String>,
        is_income: bool,
    ) -> Self {
        Self {
            id: NEW_ID,
            user_id,
            name: name.into(),
            color: color.into(),
            is_income,
            is_default: false,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_is_income(self.is_income)
    }
}

/// Categories every new user starts with: (name, color, is_income)
const DEFAULT_CATEGORIES: &[(&str, &str, bool)] = &[
    ("Salary", "#22C55E", true),
    ("Freelance", "#10B981", true),
    ("Investments", "#14B8A6", true),
    ("Other Income", "#84CC16", true),
    ("Food & Dining", "#F97316", false),
    ("Transportation", "#3B82F6", false),
    ("Housing", "#8B5CF6", false),
    ("Utilities", "#06B6D4", false),
    ("Entertainment", "#EC4899", false),
    ("Shopping", "#F59E0B", false),
    ("Healthcare", "#EF4444", false),
    ("Other", "#6B7280", false),
];

/// Unsaved default categories for a user
pub fn default_categories(user_id: i64) -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, color, is_income)| Category {
            is_default: true,
            ..Category::new(user_id, *name, *color, *is_income)
        })
        .collect()
}

/// How often a budget resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!(
                "Unknown budget period: {} (valid: weekly, monthly, yearly)",
                s
            )),
        }
    }
}

/// A spending limit for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(user_id: i64, category_id: i64, amount: f64, period: BudgetPeriod) -> Self {
        Self {
            id: NEW_ID,
            user_id,
            category_id,
            amount,
            period,
            created_at: Utc::now(),
        }
    }
}

/// Money being put aside towards a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(
        user_id: i64,
        name: impl Into<String>,
        target_amount: f64,
        deadline: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: NEW_ID,
            user_id,
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_str("Income").unwrap(), Direction::Income);
        assert_eq!(Direction::from_str("expenses").unwrap(), Direction::Expense);
        assert!(Direction::from_str("transfer").is_err());
        assert!(Direction::from_is_income(true).is_income());
    }

    #[test]
    fn test_on_day_is_midnight() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let tx = Transaction::on_day(1, 12.5, "Lunch", 5, day, false);
        assert_eq!(tx.date, day.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(tx.id, NEW_ID);
        assert_eq!(tx.direction(), Direction::Expense);
    }

    #[test]
    fn test_default_categories_cover_both_directions() {
        let cats = default_categories(7);
        assert!(cats.iter().all(|c| c.is_default && c.user_id == 7));
        assert!(cats.iter().any(|c| c.is_income));
        assert!(cats.iter().any(|c| !c.is_income));
    }

    #[test]
    fn test_budget_period_round_trip_names() {
        for period in [BudgetPeriod::Weekly, BudgetPeriod::Monthly, BudgetPeriod::Yearly] {
            assert_eq!(BudgetPeriod::from_str(period.as_str()).unwrap(), period);
        }
        assert!(BudgetPeriod::from_str("daily").is_err());
    }
}
