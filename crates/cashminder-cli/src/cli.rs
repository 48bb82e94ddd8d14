//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use cashminder_core::{BudgetPeriod, Direction, ExportFormat, RangeKey, SortField, SortOrder};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Cashminder - Track spending, budgets and savings goals
#[derive(Parser)]
#[command(name = "cashminder")]
#[command(about = "Personal finance tracker with period analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "cashminder.db", env = "CASHMINDER_DB", global = true)]
    pub db: PathBuf,

    /// Config file (defaults to the user data dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// User whose records are read and written
    #[arg(long, default_value = "1", global = true)]
    pub user: i64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Manage categories (list, add, delete)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage transactions (list, add, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage budgets (list, set, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Manage savings goals (list, add, contribute, delete)
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Show the named date ranges as of today
    Ranges,

    /// Show the analytics dashboard for a period
    Analytics {
        /// Named range: last7days, last30days, last3months, last6months, yearToDate
        #[arg(short, long, default_value = "last30days", conflicts_with_all = ["from", "to"])]
        range: RangeKey,

        /// Custom start date (YYYY-MM-DD), requires --to
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Custom end date (YYYY-MM-DD), requires --from
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export transactions
    Export {
        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,
        /// Display color
        #[arg(short, long, default_value = "#6B7280")]
        color: String,
        /// Category is for income rather than expenses
        #[arg(long)]
        income: bool,
    },
    /// Delete a category and its budgets (transactions are kept)
    Delete {
        /// Category ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Number of matching transactions to skip
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Only this category ID
        #[arg(short, long)]
        category: Option<i64>,

        /// Only income or expense
        #[arg(short, long)]
        kind: Option<Direction>,

        /// Case-insensitive text in the description
        #[arg(short, long)]
        search: Option<String>,

        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Smallest amount
        #[arg(long)]
        min: Option<f64>,

        /// Largest amount
        #[arg(long)]
        max: Option<f64>,

        /// Sort by: date, amount
        #[arg(long, default_value = "date")]
        sort: SortField,

        /// Sort order: asc, desc
        #[arg(long, default_value = "desc")]
        order: SortOrder,
    },
    /// Record a transaction
    Add {
        /// Amount (always positive)
        amount: f64,
        /// Description
        description: String,
        /// Category ID
        #[arg(short, long)]
        category: i64,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Record as income when the category is unknown
        #[arg(long)]
        income: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets with progress for the current period
    List,
    /// Create or replace the budget for a category
    Set {
        /// Expense category ID
        category: i64,
        /// Spending limit for the period
        amount: f64,
        /// Period: weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals with progress
    List,
    /// Add a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: f64,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<NaiveDate>,
    },
    /// Put money towards a goal
    Contribute {
        /// Goal ID
        id: i64,
        /// Amount to add
        amount: f64,
    },
    /// Delete a savings goal
    Delete {
        /// Goal ID
        id: i64,
    },
}
