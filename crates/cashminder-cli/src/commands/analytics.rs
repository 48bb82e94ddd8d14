//! Analytics dashboard command

use anyhow::{Context, Result};
use cashminder_core::{
    analytics::resolve_range_at, AnalyticsSummary, Database, Ledger, Polarity, RangeKey,
    TimeRange,
};
use chrono::{Local, NaiveDate, NaiveTime};

use super::{progress_bar, truncate};

/// Which period the dashboard covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Named(RangeKey),
    /// Inclusive calendar days
    Custom { from: NaiveDate, to: NaiveDate },
}

impl Period {
    /// Resolve to a concrete window as of today
    pub fn resolve(&self) -> Result<TimeRange> {
        match *self {
            Period::Named(key) => Ok(resolve_range_at(key, Local::now().naive_local())),
            Period::Custom { from, to } => TimeRange::new(
                from.and_time(NaiveTime::MIN),
                to.and_time(NaiveTime::MIN),
                format!("{} to {}", from, to),
            )
            .context("Invalid --from/--to range"),
        }
    }
}

pub fn cmd_analytics(ledger: &Ledger<Database>, period: Period, json: bool) -> Result<()> {
    let range = period.resolve()?;
    let summary = ledger
        .analytics(&range, Local::now().naive_local())
        .context("Failed to compute analytics")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

fn change_str(change: f64) -> String {
    if change > 0.0 {
        format!("▲ {:.1}%", change)
    } else if change < 0.0 {
        format!("▼ {:.1}%", change.abs())
    } else {
        "= 0.0%".to_string()
    }
}

fn print_summary(summary: &AnalyticsSummary) {
    println!();
    println!(
        "📊 {} ({} → {})",
        summary.period.label,
        summary.period.start.format("%Y-%m-%d"),
        summary.period.end.format("%Y-%m-%d")
    );
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Income:      ${:>12.2}  {}",
        summary.total_income,
        change_str(summary.income_change)
    );
    println!(
        "   Expenses:    ${:>12.2}  {}",
        summary.total_expenses,
        change_str(summary.expense_change)
    );
    println!(
        "   Net savings: ${:>12.2}  {}",
        summary.net_savings,
        change_str(summary.savings_change)
    );

    if !summary.category_data.is_empty() {
        println!();
        println!("🏷️  Spending by Category");
        println!("   ─────────────────────────────────────────────");
        for cat in &summary.category_data {
            println!(
                "   {:<20} ${:>10.2}  {} {:>5.1}%",
                truncate(&cat.category, 20),
                cat.amount,
                progress_bar(cat.percentage, 15),
                cat.percentage
            );
        }
    }

    println!();
    println!("📈 Monthly Trend");
    println!("   ─────────────────────────────────────────────");
    for month in &summary.monthly_data {
        println!(
            "   {:<4} in ${:>10.2}   out ${:>10.2}   net ${:>10.2}",
            month.month,
            month.income,
            month.expenses,
            month.savings()
        );
    }

    if !summary.insights.is_empty() {
        println!();
        println!("💡 Insights");
        println!("   ─────────────────────────────────────────────");
        for insight in &summary.insights {
            let icon = match insight.polarity {
                Polarity::Positive => "✅",
                Polarity::Negative => "⚠️ ",
                Polarity::Neutral => "ℹ️ ",
            };
            println!("   {} {}", icon, insight.title);
            println!("      {}", insight.description);
        }
    }
}
