//! Cashminder CLI - Personal finance tracker
//!
//! Usage:
//!   cashminder init                         Initialize database
//!   cashminder transactions add 42.5 Lunch -c 3
//!   cashminder analytics --range last30days Show the dashboard
//!   cashminder export --format json         Export transactions

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let ledger = commands::open_ledger(&cli.db, cli.config.as_deref(), cli.user)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&ledger),
        Commands::Categories { action } => match action {
            None | Some(CategoriesAction::List) => commands::cmd_categories_list(&ledger),
            Some(CategoriesAction::Add {
                name,
                color,
                income,
            }) => commands::cmd_categories_add(&ledger, &name, &color, income),
            Some(CategoriesAction::Delete { id }) => commands::cmd_categories_delete(&ledger, id),
        },
        Commands::Transactions { action } => match action {
            None => commands::cmd_transactions_list(&ledger, &commands::ListFilters::default()),
            Some(TransactionsAction::List {
                limit,
                offset,
                category,
                kind,
                search,
                from,
                to,
                min,
                max,
                sort,
                order,
            }) => {
                let filters = commands::ListFilters {
                    limit,
                    offset,
                    category,
                    kind,
                    search,
                    from,
                    to,
                    min,
                    max,
                    sort,
                    order,
                };
                commands::cmd_transactions_list(&ledger, &filters)
            }
            Some(TransactionsAction::Add {
                amount,
                description,
                category,
                date,
                income,
            }) => commands::cmd_transactions_add(
                &ledger,
                amount,
                &description,
                category,
                date,
                income,
            ),
            Some(TransactionsAction::Delete { id }) => {
                commands::cmd_transactions_delete(&ledger, id)
            }
        },
        Commands::Budgets { action } => match action {
            None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&ledger),
            Some(BudgetsAction::Set {
                category,
                amount,
                period,
            }) => commands::cmd_budgets_set(&ledger, category, amount, period),
            Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&ledger, id),
        },
        Commands::Goals { action } => match action {
            None | Some(GoalsAction::List) => commands::cmd_goals_list(&ledger),
            Some(GoalsAction::Add {
                name,
                target,
                deadline,
            }) => commands::cmd_goals_add(&ledger, &name, target, deadline),
            Some(GoalsAction::Contribute { id, amount }) => {
                commands::cmd_goals_contribute(&ledger, id, amount)
            }
            Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&ledger, id),
        },
        Commands::Ranges => commands::cmd_ranges(),
        Commands::Analytics {
            range,
            from,
            to,
            json,
        } => {
            let period = match (from, to) {
                (Some(from), Some(to)) => commands::Period::Custom { from, to },
                _ => commands::Period::Named(range),
            };
            commands::cmd_analytics(&ledger, period, json)
        }
        Commands::Export { format, output } => {
            commands::cmd_export(&ledger, format, output.as_deref())
        }
    }
}
