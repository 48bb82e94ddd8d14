//! Period-based financial analytics
//!
//! Turns a flat list of transactions into the figures a dashboard shows for
//! one selected period:
//! - `ranges` - named windows ("last 30 days", "year to date") relative to today
//! - `period` - the transactions of a window and of the window before it
//! - `aggregate` - totals, trailing monthly series, category breakdown
//! - `insights` - rule-based observations comparing the two periods
//!
//! Everything here is pure and synchronous. Functions that depend on the
//! clock have an `_at` variant that takes "now" explicitly.

mod aggregate;
mod insights;
mod period;
mod ranges;
mod types;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::models::{Category, Transaction};

pub use insights::calculate_percentage_change;
pub use period::{filter_by_range, previous_period};
pub use ranges::{resolve_range_at, resolve_time_ranges, resolve_time_ranges_at};
pub use types::{
    Aggregate, AnalyticsSummary, CategoryData, Insight, InsightKind, MonthlyData, Polarity,
    RangeKey, TimeRange,
};

pub(crate) use ranges::{first_of_month, first_of_year};

/// Runs aggregation and insight rules with a set of thresholds
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Aggregate transactions, bucketing the monthly series relative to `now`
    pub fn aggregate_at(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
        now: NaiveDateTime,
    ) -> Aggregate {
        aggregate::aggregate_with(&self.config, transactions, categories, now)
    }

    /// Compare two aggregates and describe what changed
    pub fn generate_insights(&self, current: &Aggregate, previous: &Aggregate) -> Vec<Insight> {
        insights::generate_with(&self.config, current, previous)
    }

    /// Full summary for `range`: totals, changes vs the previous period,
    /// breakdown and insights
    ///
    /// The monthly series covers all `transactions`, not only those in
    /// `range`, so the trend chart does not depend on the selected period.
    pub fn compute_at(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
        range: &TimeRange,
        now: NaiveDateTime,
    ) -> AnalyticsSummary {
        let current_txs = filter_by_range(transactions, range.start, range.end);
        let previous_txs = previous_period(transactions, range.start, range.end);

        debug!(
            period = %range.label,
            current = current_txs.len(),
            previous = previous_txs.len(),
            "Computing analytics"
        );

        let current = self.aggregate_at(&current_txs, categories, now);
        let previous = self.aggregate_at(&previous_txs, categories, now);
        let insights = self.generate_insights(&current, &previous);
        let monthly_data =
            aggregate::monthly_series(transactions, now, self.config.trend_months);

        AnalyticsSummary {
            period: range.clone(),
            total_income: current.total_income,
            total_expenses: current.total_expenses,
            net_savings: current.net_savings,
            income_change: calculate_percentage_change(
                current.total_income,
                previous.total_income,
            ),
            expense_change: calculate_percentage_change(
                current.total_expenses,
                previous.total_expenses,
            ),
            savings_change: calculate_percentage_change(current.net_savings, previous.net_savings),
            monthly_data,
            category_data: current.category_data,
            insights,
        }
    }
}

/// Aggregate with default thresholds against the local clock
pub fn aggregate(transactions: &[Transaction], categories: &[Category]) -> Aggregate {
    aggregate_at(transactions, categories, Local::now().naive_local())
}

/// Aggregate with default thresholds as of `now`
pub fn aggregate_at(
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDateTime,
) -> Aggregate {
    AnalyticsEngine::new().aggregate_at(transactions, categories, now)
}

/// Insights with default thresholds
pub fn generate_insights(current: &Aggregate, previous: &Aggregate) -> Vec<Insight> {
    AnalyticsEngine::new().generate_insights(current, previous)
}

/// Analytics summary with default thresholds against the local clock
pub fn compute_analytics(
    transactions: &[Transaction],
    categories: &[Category],
    range: &TimeRange,
) -> AnalyticsSummary {
    compute_analytics_at(transactions, categories, range, Local::now().naive_local())
}

/// Analytics summary with default thresholds as of `now`
pub fn compute_analytics_at(
    transactions: &[Transaction],
    categories: &[Category],
    range: &TimeRange,
    now: NaiveDateTime,
) -> AnalyticsSummary {
    AnalyticsEngine::new().compute_at(transactions, categories, range, now)
}
