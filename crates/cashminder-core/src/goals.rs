//! Savings goal progress

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::SavingsGoal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// Capped at 100
    pub percentage: f64,
    /// Never negative
    pub remaining: f64,
    pub completed: bool,
    pub deadline: Option<NaiveDate>,
    /// Negative once the deadline has passed
    pub days_left: Option<i64>,
    /// Amount to save each month to hit the deadline
    pub monthly_required: Option<f64>,
}

/// Progress of `goal` as of `today`
pub fn goal_progress(goal: &SavingsGoal, today: NaiveDate) -> GoalProgress {
    let remaining = (goal.target_amount - goal.current_amount).max(0.0);
    let completed = goal.current_amount >= goal.target_amount;
    let percentage = if goal.target_amount > 0.0 {
        (goal.current_amount / goal.target_amount * 100.0).min(100.0)
    } else {
        100.0
    };

    let days_left = goal.deadline.map(|d| (d - today).num_days());
    let monthly_required = match goal.deadline {
        Some(deadline) if !completed => Some(remaining / months_until(today, deadline) as f64),
        _ => None,
    };

    GoalProgress {
        goal_id: goal.id,
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        percentage,
        remaining,
        completed,
        deadline: goal.deadline,
        days_left,
        monthly_required,
    }
}

/// Calendar months from `today` to `deadline`, at least 1
fn months_until(today: NaiveDate, deadline: NaiveDate) -> i64 {
    let months = (deadline.year() as i64 - today.year() as i64) * 12 + deadline.month() as i64
        - today.month() as i64;
    months.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(target: f64, current: f64, deadline: Option<NaiveDate>) -> SavingsGoal {
        let mut g = SavingsGoal::new(1, "Vacation", target, deadline);
        g.id = 1;
        g.current_amount = current;
        g
    }

    #[test]
    fn test_progress_without_deadline() {
        let progress = goal_progress(&goal(1000.0, 250.0, None), date(2024, 3, 1));
        assert_eq!(progress.percentage, 25.0);
        assert_eq!(progress.remaining, 750.0);
        assert!(!progress.completed);
        assert!(progress.days_left.is_none());
        assert!(progress.monthly_required.is_none());
    }

    #[test]
    fn test_monthly_required_spreads_remaining() {
        let progress = goal_progress(
            &goal(1200.0, 0.0, Some(date(2024, 7, 15))),
            date(2024, 3, 20),
        );
        assert_eq!(progress.monthly_required, Some(300.0));
        assert_eq!(progress.days_left, Some(117));
    }

    #[test]
    fn test_deadline_this_month_or_past_counts_one_month() {
        let progress = goal_progress(
            &goal(500.0, 100.0, Some(date(2024, 3, 31))),
            date(2024, 3, 1),
        );
        assert_eq!(progress.monthly_required, Some(400.0));

        let progress = goal_progress(
            &goal(500.0, 100.0, Some(date(2024, 1, 31))),
            date(2024, 3, 1),
        );
        assert_eq!(progress.monthly_required, Some(400.0));
        assert!(progress.days_left.unwrap() < 0);
    }

    #[test]
    fn test_overfunded_goal_is_capped() {
        let progress = goal_progress(
            &goal(1000.0, 1500.0, Some(date(2024, 12, 31))),
            date(2024, 3, 1),
        );
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert!(progress.completed);
        assert!(progress.monthly_required.is_none());
    }
}
