//! Budget progress for the current week, month or year

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::analytics::{first_of_month, first_of_year};
use crate::models::{Budget, BudgetPeriod, Category, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "on_track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending against one budget in the period containing today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: i64,
    pub category: String,
    pub period: BudgetPeriod,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: f64,
    pub spent: f64,
    /// Negative once the budget is overspent
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// First and last calendar day of the budget period containing `today`
///
/// Weeks start on Monday.
pub fn period_bounds(period: BudgetPeriod, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        BudgetPeriod::Weekly => {
            let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            (start, start + Duration::days(6))
        }
        BudgetPeriod::Monthly => {
            let start = first_of_month(today);
            let end = start
                .checked_add_months(Months::new(1))
                .map(|next| next - Duration::days(1))
                .unwrap_or(NaiveDate::MAX);
            (start, end)
        }
        BudgetPeriod::Yearly => {
            let start = first_of_year(today);
            let end = start
                .checked_add_months(Months::new(12))
                .map(|next| next - Duration::days(1))
                .unwrap_or(NaiveDate::MAX);
            (start, end)
        }
    }
}

/// Progress of `budget` as of `now`
///
/// Only expense transactions in the budget's category count. A zero budget
/// reports 0% so the status depends on `spent` alone.
pub fn budget_progress(
    budget: &Budget,
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDateTime,
    warning_percent: f64,
) -> BudgetProgress {
    let (start, end) = period_bounds(budget.period, now.date());

    let spent: f64 = transactions
        .iter()
        .filter(|t| !t.is_income && t.category_id == budget.category_id)
        .filter(|t| {
            let day = t.date.date();
            day >= start && day <= end
        })
        .map(|t| t.amount)
        .sum();

    let percentage = if budget.amount > 0.0 {
        spent / budget.amount * 100.0
    } else {
        0.0
    };

    let status = if spent > budget.amount {
        BudgetStatus::Exceeded
    } else if percentage >= warning_percent {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    };

    let category = categories
        .iter()
        .find(|c| c.id == budget.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    BudgetProgress {
        budget_id: budget.id,
        category_id: budget.category_id,
        category,
        period: budget.period,
        period_start: start,
        period_end: end,
        amount: budget.amount,
        spent,
        remaining: budget.amount - spent,
        percentage,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        // A Wednesday
        date(2024, 2, 14).and_hms_opt(18, 0, 0).unwrap()
    }

    fn budget(amount: f64, period: BudgetPeriod) -> Budget {
        let mut b = Budget::new(1, 5, amount, period);
        b.id = 1;
        b
    }

    fn expense(amount: f64, category_id: i64, day: NaiveDate) -> Transaction {
        Transaction::on_day(1, amount, "spend", category_id, day, false)
    }

    fn food() -> Vec<Category> {
        let mut c = Category::new(1, "Food", "#F97316", false);
        c.id = 5;
        vec![c]
    }

    #[test]
    fn test_period_bounds() {
        let today = date(2024, 2, 14);
        assert_eq!(
            period_bounds(BudgetPeriod::Weekly, today),
            (date(2024, 2, 12), date(2024, 2, 18))
        );
        assert_eq!(
            period_bounds(BudgetPeriod::Monthly, today),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            period_bounds(BudgetPeriod::Yearly, today),
            (date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_week_starting_on_monday_includes_sunday() {
        let sunday = date(2024, 2, 18);
        assert_eq!(
            period_bounds(BudgetPeriod::Weekly, sunday),
            (date(2024, 2, 12), date(2024, 2, 18))
        );
    }

    #[test]
    fn test_spent_counts_only_matching_expenses_in_period() {
        let txs = vec![
            expense(100.0, 5, date(2024, 2, 1)),
            expense(50.0, 5, date(2024, 2, 14)),
            // Previous month
            expense(999.0, 5, date(2024, 1, 31)),
            // Other category
            expense(999.0, 6, date(2024, 2, 10)),
            // Income in the same category
            Transaction::on_day(1, 999.0, "refund", 5, date(2024, 2, 10), true),
        ];

        let progress =
            budget_progress(&budget(500.0, BudgetPeriod::Monthly), &txs, &food(), now(), 80.0);
        assert_eq!(progress.spent, 150.0);
        assert_eq!(progress.remaining, 350.0);
        assert_eq!(progress.percentage, 30.0);
        assert_eq!(progress.status, BudgetStatus::OnTrack);
        assert_eq!(progress.category, "Food");
    }

    #[test]
    fn test_warning_and_exceeded() {
        let txs = vec![expense(80.0, 5, date(2024, 2, 13))];
        let progress =
            budget_progress(&budget(100.0, BudgetPeriod::Weekly), &txs, &food(), now(), 80.0);
        assert_eq!(progress.status, BudgetStatus::Warning);

        let txs = vec![expense(120.0, 5, date(2024, 2, 13))];
        let progress =
            budget_progress(&budget(100.0, BudgetPeriod::Weekly), &txs, &food(), now(), 80.0);
        assert_eq!(progress.status, BudgetStatus::Exceeded);
        assert_eq!(progress.remaining, -20.0);
    }

    #[test]
    fn test_spending_exactly_the_budget_is_not_exceeded() {
        let txs = vec![expense(100.0, 5, date(2024, 2, 13))];
        let progress =
            budget_progress(&budget(100.0, BudgetPeriod::Weekly), &txs, &food(), now(), 80.0);
        assert_eq!(progress.status, BudgetStatus::Warning);
    }

    #[test]
    fn test_zero_budget() {
        let progress = budget_progress(&budget(0.0, BudgetPeriod::Monthly), &[], &[], now(), 80.0);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, BudgetStatus::OnTrack);
        assert_eq!(progress.category, "Unknown");
    }
}
