//! Cashminder Core Library
//!
//! Shared functionality for the Cashminder personal finance tracker:
//! - Period analytics: named date ranges, period comparison, aggregation
//!   and rule-based insights
//! - Storage behind a repository interface (SQLite or in-memory)
//! - Typed, validated transaction queries
//! - Change notification for ledger writes
//! - Budgets and savings goals with progress reports
//! - CSV/JSON transaction export

pub mod analytics;
pub mod budgets;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod export;
pub mod goals;
pub mod ledger;
pub mod memory;
pub mod models;
pub mod query;
pub mod repository;

pub use analytics::{
    aggregate, aggregate_at, calculate_percentage_change, compute_analytics, compute_analytics_at,
    filter_by_range, generate_insights, previous_period, resolve_time_ranges,
    resolve_time_ranges_at, Aggregate, AnalyticsEngine, AnalyticsSummary, CategoryData, Insight,
    InsightKind, MonthlyData, Polarity, RangeKey, TimeRange,
};
pub use budgets::{BudgetProgress, BudgetStatus};
pub use config::{AnalyticsConfig, BudgetConfig, Config};
pub use db::Database;
pub use error::{Error, Result};
pub use events::{ChangeAction, ChangeEvent, ChangeNotifier, EntityKind, SubscriptionId};
pub use export::ExportFormat;
pub use goals::GoalProgress;
pub use ledger::Ledger;
pub use memory::MemoryStore;
pub use models::{
    Budget, BudgetPeriod, Category, Direction, SavingsGoal, Transaction, DEFAULT_USER_ID,
};
pub use query::{SortField, SortOrder, TransactionQuery};
pub use repository::{Record, Repository, Storage, TransactionQueries};
