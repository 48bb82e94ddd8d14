//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, ranges) and shared utilities (open_ledger)
//! - `analytics` - Period dashboard
//! - `budgets` - Budget management and progress
//! - `categories` - Category management
//! - `export` - Transaction export
//! - `goals` - Savings goal management and progress
//! - `transactions` - Transaction commands (list, add, delete)

pub mod analytics;
pub mod budgets;
pub mod categories;
pub mod core;
pub mod export;
pub mod goals;
pub mod transactions;

// Re-export command functions for main.rs
pub use analytics::*;
pub use budgets::*;
pub use categories::*;
pub use self::core::*;
pub use export::*;
pub use goals::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Signed, colored amount: green `+$` for income, red `$` for expenses
pub fn colored_amount(amount: f64, is_income: bool) -> String {
    if is_income {
        format!("\x1b[32m+${:.2}\x1b[0m", amount)
    } else {
        format!("\x1b[31m${:.2}\x1b[0m", amount)
    }
}

/// Fixed-width bar for a 0-100 percentage
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
