//! Totals, monthly trend series and category breakdown for a set of transactions

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::config::AnalyticsConfig;
use crate::models::{Category, Transaction};

use super::ranges::first_of_month;
use super::types::{Aggregate, CategoryData, MonthlyData};

const UNKNOWN_CATEGORY: &str = "Unknown";

/// Aggregate transactions with the given thresholds as of `now`
pub(crate) fn aggregate_with(
    config: &AnalyticsConfig,
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDateTime,
) -> Aggregate {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    for t in transactions {
        if t.is_income {
            total_income += t.amount;
        } else {
            total_expenses += t.amount;
        }
    }

    let monthly_data = monthly_series(transactions, now, config.trend_months);
    let category_data = category_breakdown(
        transactions,
        categories,
        total_expenses,
        &config.unknown_category_color,
    );

    debug!(
        transactions = transactions.len(),
        categories = category_data.len(),
        total_income,
        total_expenses,
        "Aggregated period"
    );

    Aggregate {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        monthly_data,
        category_data,
    }
}

/// Number of calendar months between `date` and `now` (0 = same month, negative = future)
fn month_offset(now: NaiveDateTime, date: NaiveDateTime) -> i64 {
    (now.year() as i64 - date.year() as i64) * 12 + now.month() as i64 - date.month() as i64
}

/// Trailing `months` buckets ending at the month of `now`, oldest first
pub(crate) fn monthly_series(
    transactions: &[Transaction],
    now: NaiveDateTime,
    months: u32,
) -> Vec<MonthlyData> {
    let current_month = first_of_month(now.date());

    let mut series: Vec<MonthlyData> = (0..months)
        .rev()
        .map(|back| MonthlyData {
            month: month_label(current_month, back),
            income: 0.0,
            expenses: 0.0,
        })
        .collect();

    for t in transactions {
        let offset = month_offset(now, t.date);
        if offset < 0 || offset >= months as i64 {
            continue;
        }
        let bucket = &mut series[months as usize - 1 - offset as usize];
        if t.is_income {
            bucket.income += t.amount;
        } else {
            bucket.expenses += t.amount;
        }
    }

    series
}

fn month_label(current_month: NaiveDate, back: u32) -> String {
    current_month
        .checked_sub_months(Months::new(back))
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

/// Expense totals per category, largest first
///
/// Groups keep first-seen order before the (stable) sort, so equal amounts
/// stay in the order their categories first appeared.
pub(crate) fn category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
    total_expenses: f64,
    unknown_color: &str,
) -> Vec<CategoryData> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut totals: Vec<(i64, f64)> = Vec::new();

    for t in transactions.iter().filter(|t| !t.is_income) {
        match index.get(&t.category_id) {
            Some(&i) => totals[i].1 += t.amount,
            None => {
                index.insert(t.category_id, totals.len());
                totals.push((t.category_id, t.amount));
            }
        }
    }

    let mut data: Vec<CategoryData> = totals
        .into_iter()
        .map(|(category_id, amount)| {
            let (name, color) = match categories.iter().find(|c| c.id == category_id) {
                Some(c) => (c.name.clone(), c.color.clone()),
                None => {
                    warn!(category_id, "Transaction references unknown category");
                    (UNKNOWN_CATEGORY.to_string(), unknown_color.to_string())
                }
            };
            let percentage = if total_expenses > 0.0 {
                amount / total_expenses * 100.0
            } else {
                0.0
            };
            CategoryData {
                category_id,
                category: name,
                color,
                amount,
                percentage,
            }
        })
        .collect();

    data.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    data
}
