//! Category command implementations

use anyhow::{Context, Result};
use cashminder_core::{Database, Ledger};

pub fn cmd_categories_list(ledger: &Ledger<Database>) -> Result<()> {
    let categories = ledger.categories()?;

    if categories.is_empty() {
        println!("No categories yet. Create the defaults with:");
        println!("  cashminder init");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────");

    for (label, is_income) in [("Income", true), ("Expenses", false)] {
        println!("   {}", label);
        for category in categories.iter().filter(|c| c.is_income == is_income) {
            println!(
                "   [{:>3}] {:<24} {}",
                category.id, category.name, category.color
            );
        }
    }

    Ok(())
}

pub fn cmd_categories_add(
    ledger: &Ledger<Database>,
    name: &str,
    color: &str,
    income: bool,
) -> Result<()> {
    let category = ledger
        .add_category(name, color, income)
        .context("Failed to add category")?;

    println!(
        "✅ Added {} category '{}' (id {})",
        category.direction(),
        category.name,
        category.id
    );

    Ok(())
}

pub fn cmd_categories_delete(ledger: &Ledger<Database>, id: i64) -> Result<()> {
    let category = ledger
        .categories()?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow::anyhow!("Category {} not found", id))?;

    let in_use = ledger
        .store()
        .count_transactions_in_category(ledger.user_id(), id)?;
    ledger.delete_category(id)?;

    println!("✅ Deleted category '{}'", category.name);
    if in_use > 0 {
        println!(
            "   {} transactions still reference it and will show as Unknown.",
            in_use
        );
    }

    Ok(())
}
