//! Budget command implementations

use anyhow::{Context, Result};
use cashminder_core::{BudgetPeriod, BudgetStatus, Database, Ledger};
use chrono::Local;

use super::{progress_bar, truncate};

pub fn cmd_budgets_list(ledger: &Ledger<Database>) -> Result<()> {
    let report = ledger
        .budget_report(Local::now().naive_local())
        .context("Failed to compute budget progress")?;

    if report.is_empty() {
        println!("No budgets set. Create one with:");
        println!("  cashminder budgets set <category-id> 400 --period monthly");
        return Ok(());
    }

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for progress in &report {
        let icon = match progress.status {
            BudgetStatus::OnTrack => "✅",
            BudgetStatus::Warning => "⚠️ ",
            BudgetStatus::Exceeded => "🚨",
        };

        println!(
            "   {} [{}] {:<20} {:<8} {} {:>5.1}%",
            icon,
            progress.budget_id,
            truncate(&progress.category, 20),
            progress.period.as_str(),
            progress_bar(progress.percentage, 20),
            progress.percentage
        );
        println!(
            "        ${:.2} of ${:.2} spent ({} → {}), ${:.2} {}",
            progress.spent,
            progress.amount,
            progress.period_start,
            progress.period_end,
            progress.remaining.abs(),
            if progress.remaining < 0.0 { "over" } else { "left" }
        );
    }

    let exceeded = report
        .iter()
        .filter(|p| p.status == BudgetStatus::Exceeded)
        .count();
    if exceeded > 0 {
        println!();
        println!("🚨 {} budget(s) exceeded this period.", exceeded);
    }

    Ok(())
}

pub fn cmd_budgets_set(
    ledger: &Ledger<Database>,
    category_id: i64,
    amount: f64,
    period: BudgetPeriod,
) -> Result<()> {
    let budget = ledger
        .set_budget(category_id, amount, period)
        .context("Failed to set budget")?;

    println!(
        "✅ Budget {} set: ${:.2} {} for category {}",
        budget.id, budget.amount, budget.period, budget.category_id
    );

    Ok(())
}

pub fn cmd_budgets_delete(ledger: &Ledger<Database>, id: i64) -> Result<()> {
    if !ledger.delete_budget(id)? {
        anyhow::bail!("Budget {} not found", id);
    }

    println!("✅ Deleted budget {}", id);
    Ok(())
}
