//! Savings goal command implementations

use anyhow::{Context, Result};
use cashminder_core::{Database, Ledger};
use chrono::{Local, NaiveDate};

use super::{progress_bar, truncate};

pub fn cmd_goals_list(ledger: &Ledger<Database>) -> Result<()> {
    let report = ledger
        .goal_report(Local::now().date_naive())
        .context("Failed to compute goal progress")?;

    if report.is_empty() {
        println!("No savings goals yet. Add one with:");
        println!("  cashminder goals add \"Emergency fund\" 5000 --deadline 2025-12-31");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in report {
        let icon = if goal.completed { "🏁" } else { "🎯" };
        println!(
            "   {} [{}] {:<24} {} {:>5.1}%",
            icon,
            goal.goal_id,
            truncate(&goal.name, 24),
            progress_bar(goal.percentage, 20),
            goal.percentage
        );

        let mut detail = format!(
            "        ${:.2} of ${:.2}",
            goal.current_amount, goal.target_amount
        );
        if let (Some(deadline), Some(days_left)) = (goal.deadline, goal.days_left) {
            if days_left < 0 {
                detail.push_str(&format!(", deadline {} passed", deadline));
            } else {
                detail.push_str(&format!(", {} days left", days_left));
            }
        }
        if let Some(monthly) = goal.monthly_required {
            detail.push_str(&format!(", save ${:.2}/month", monthly));
        }
        println!("{}", detail);
    }

    Ok(())
}

pub fn cmd_goals_add(
    ledger: &Ledger<Database>,
    name: &str,
    target: f64,
    deadline: Option<NaiveDate>,
) -> Result<()> {
    let goal = ledger
        .add_goal(name, target, deadline)
        .context("Failed to add savings goal")?;

    println!(
        "✅ Added goal '{}' (id {}): target ${:.2}",
        goal.name, goal.id, goal.target_amount
    );
    if let Some(deadline) = goal.deadline {
        println!("   Deadline: {}", deadline);
    }

    Ok(())
}

pub fn cmd_goals_contribute(ledger: &Ledger<Database>, id: i64, amount: f64) -> Result<()> {
    let goal = ledger
        .contribute_to_goal(id, amount)
        .context("Failed to contribute to goal")?;

    println!(
        "✅ Added ${:.2} to '{}': ${:.2} of ${:.2}",
        amount, goal.name, goal.current_amount, goal.target_amount
    );
    if goal.current_amount >= goal.target_amount {
        println!("   🏁 Goal reached!");
    }

    Ok(())
}

pub fn cmd_goals_delete(ledger: &Ledger<Database>, id: i64) -> Result<()> {
    if !ledger.delete_goal(id)? {
        anyhow::bail!("Savings goal {} not found", id);
    }

    println!("✅ Deleted savings goal {}", id);
    Ok(())
}
