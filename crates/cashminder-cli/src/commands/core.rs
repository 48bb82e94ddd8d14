//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_ledger` - Shared utility to open the database behind a ledger
//! - `cmd_init` - Initialize the database
//! - `cmd_ranges` - Show the named date ranges

use std::path::Path;

use anyhow::{Context, Result};
use cashminder_core::{resolve_time_ranges, Config, Database, Ledger};

/// Open the database and wrap it in a ledger for `user_id`
pub fn open_ledger(
    db_path: &Path,
    config_path: Option<&Path>,
    user_id: i64,
) -> Result<Ledger<Database>> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    let db = Database::new(path_str).context("Failed to open database")?;

    Ok(Ledger::with_config(db, &config).for_user(user_id))
}

pub fn cmd_init(ledger: &Ledger<Database>) -> Result<()> {
    println!("🔧 Initializing database at {}...", ledger.store().path());

    let seeded = ledger
        .seed_default_categories()
        .context("Failed to seed default categories")?;
    if seeded > 0 {
        println!("   Seeded {} default categories", seeded);
    } else {
        println!("   Categories already present, nothing to seed");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. See categories: cashminder categories");
    println!("  2. Record spending: cashminder transactions add 12.50 \"Lunch\" --category <id>");
    println!("  3. View dashboard: cashminder analytics");

    Ok(())
}

pub fn cmd_ranges() -> Result<()> {
    println!();
    println!("📅 Date Ranges");
    println!("   ─────────────────────────────────────────────");

    for (key, range) in resolve_time_ranges() {
        println!(
            "   {:<12} {:<16} {} → {}",
            key.as_str(),
            range.label,
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        );
    }

    Ok(())
}
