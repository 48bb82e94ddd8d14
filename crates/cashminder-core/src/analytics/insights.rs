//! Rule-based observations comparing a period with the one before it
//!
//! Rules run independently in a fixed order, so any subset may fire:
//! savings rate, category increase, top category, income trend.

use tracing::debug;

use crate::config::AnalyticsConfig;

use super::types::{Aggregate, CategoryData, Insight, InsightKind, Polarity};

/// Percent change from `previous` to `current`
///
/// A zero baseline reports 100 for any growth and 0 otherwise, so the
/// result is always finite.
pub fn calculate_percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous.abs() * 100.0
}

pub(crate) fn generate_with(
    config: &AnalyticsConfig,
    current: &Aggregate,
    previous: &Aggregate,
) -> Vec<Insight> {
    let insights: Vec<Insight> = [
        savings_rate(config, current),
        category_increase(config, current, previous),
        top_category(current),
        income_trend(config, current, previous),
    ]
    .into_iter()
    .flatten()
    .collect();

    debug!(count = insights.len(), "Generated insights");
    insights
}

fn savings_rate(config: &AnalyticsConfig, current: &Aggregate) -> Option<Insight> {
    if current.total_income <= 0.0 {
        return None;
    }

    let rate = current.net_savings / current.total_income * 100.0;
    let insight = if rate > config.savings_rate_target {
        Insight::new(
            InsightKind::SavingsRate,
            Polarity::Positive,
            format!("Saving {}% of income", rate.round() as i64),
            format!(
                "You kept {} of the {} you earned this period. Keep it up!",
                money(current.net_savings),
                money(current.total_income)
            ),
        )
    } else if rate > 0.0 {
        Insight::new(
            InsightKind::SavingsRate,
            Polarity::Neutral,
            format!("Saving {}% of income", rate.round() as i64),
            format!(
                "Aim for more than {}% to build a stronger cushion.",
                config.savings_rate_target.round() as i64
            ),
        )
    } else {
        Insight::new(
            InsightKind::SavingsRate,
            Polarity::Negative,
            "Spending exceeds income",
            "You spent everything you earned this period. Review your largest categories for places to cut back.",
        )
    };
    Some(insight)
}

fn category_increase(
    config: &AnalyticsConfig,
    current: &Aggregate,
    previous: &Aggregate,
) -> Option<Insight> {
    if current.category_data.is_empty() || previous.category_data.is_empty() {
        return None;
    }

    // Selected by dollar increase; the percentage only gates and labels it
    let mut best: Option<(&CategoryData, f64, f64)> = None;
    for cur in &current.category_data {
        let Some(prev) = previous
            .category_data
            .iter()
            .find(|p| p.category_id == cur.category_id)
        else {
            continue;
        };
        if prev.amount <= 0.0 {
            continue;
        }

        let pct = (cur.amount - prev.amount) / prev.amount * 100.0;
        if pct <= config.category_increase_threshold {
            continue;
        }

        let increase = cur.amount - prev.amount;
        if best.map_or(true, |(_, best_increase, _)| increase > best_increase) {
            best = Some((cur, increase, pct));
        }
    }

    best.map(|(category, increase, pct)| {
        Insight::new(
            InsightKind::CategoryIncrease,
            Polarity::Negative,
            format!("{} spending up {}%", category.category, pct.round() as i64),
            format!(
                "You spent {} more on {} than in the previous period.",
                money(increase),
                category.category
            ),
        )
    })
}

fn top_category(current: &Aggregate) -> Option<Insight> {
    let top = current.category_data.first()?;
    Some(Insight::new(
        InsightKind::TopCategory,
        Polarity::Neutral,
        format!("Top spending: {}", top.category),
        format!(
            "{} accounts for {}% of your expenses ({}).",
            top.category,
            top.percentage.round() as i64,
            money(top.amount)
        ),
    ))
}

fn income_trend(
    config: &AnalyticsConfig,
    current: &Aggregate,
    previous: &Aggregate,
) -> Option<Insight> {
    let pct = calculate_percentage_change(current.total_income, previous.total_income);
    if pct.abs() <= config.income_change_threshold {
        return None;
    }

    let insight = if pct > 0.0 {
        Insight::new(
            InsightKind::IncomeTrend,
            Polarity::Positive,
            format!("Income up {}%", pct.round() as i64),
            "Your income grew compared with the previous period.",
        )
    } else {
        Insight::new(
            InsightKind::IncomeTrend,
            Polarity::Negative,
            format!("Income down {}%", pct.abs().round() as i64),
            "Your income fell compared with the previous period.",
        )
    };
    Some(insight)
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, name: &str, amount: f64) -> CategoryData {
        CategoryData {
            category_id: id,
            category: name.to_string(),
            color: "#000000".to_string(),
            amount,
            percentage: 0.0,
        }
    }

    fn agg(income: f64, expenses: f64, categories: Vec<CategoryData>) -> Aggregate {
        Aggregate {
            total_income: income,
            total_expenses: expenses,
            net_savings: income - expenses,
            monthly_data: vec![],
            category_data: categories,
        }
    }

    fn empty() -> Aggregate {
        agg(0.0, 0.0, vec![])
    }

    fn generate(current: &Aggregate, previous: &Aggregate) -> Vec<Insight> {
        generate_with(&AnalyticsConfig::default(), current, previous)
    }

    fn of_kind(insights: &[Insight], kind: InsightKind) -> Option<&Insight> {
        insights.iter().find(|i| i.kind == kind)
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(calculate_percentage_change(150.0, 100.0), 50.0);
        assert_eq!(calculate_percentage_change(50.0, 100.0), -50.0);
        assert_eq!(calculate_percentage_change(500.0, 0.0), 100.0);
        assert_eq!(calculate_percentage_change(0.0, 0.0), 0.0);
        assert_eq!(calculate_percentage_change(-10.0, 0.0), 0.0);
        // Negative baseline: moving from -100 to -50 is an improvement
        assert_eq!(calculate_percentage_change(-50.0, -100.0), 50.0);
    }

    #[test]
    fn test_no_insights_for_empty_periods() {
        assert!(generate(&empty(), &empty()).is_empty());
    }

    #[test]
    fn test_savings_rate_positive() {
        let insights = generate(&agg(1000.0, 700.0, vec![]), &agg(1000.0, 0.0, vec![]));
        let rate = of_kind(&insights, InsightKind::SavingsRate).unwrap();
        assert_eq!(rate.polarity, Polarity::Positive);
        assert!(rate.title.contains("30%"));
    }

    #[test]
    fn test_savings_rate_exactly_twenty_is_neutral() {
        let insights = generate(&agg(100.0, 80.0, vec![]), &agg(100.0, 0.0, vec![]));
        let rate = of_kind(&insights, InsightKind::SavingsRate).unwrap();
        assert_eq!(rate.polarity, Polarity::Neutral);
    }

    #[test]
    fn test_savings_rate_negative_when_overspent() {
        for expenses in [100.0, 150.0] {
            let insights = generate(&agg(100.0, expenses, vec![]), &agg(100.0, 0.0, vec![]));
            let rate = of_kind(&insights, InsightKind::SavingsRate).unwrap();
            assert_eq!(rate.polarity, Polarity::Negative);
            assert_eq!(rate.title, "Spending exceeds income");
        }
    }

    #[test]
    fn test_savings_rate_skipped_without_income() {
        let insights = generate(&agg(0.0, 50.0, vec![]), &empty());
        assert!(of_kind(&insights, InsightKind::SavingsRate).is_none());
    }

    #[test]
    fn test_category_increase_picks_largest_dollar_increase() {
        // Fun: +100% but only +$20; Rent: +20% but +$200
        let current = agg(
            0.0,
            1240.0,
            vec![cat(1, "Rent", 1200.0), cat(2, "Fun", 40.0)],
        );
        let previous = agg(0.0, 1020.0, vec![cat(1, "Rent", 1000.0), cat(2, "Fun", 20.0)]);

        let insights = generate(&current, &previous);
        let inc = of_kind(&insights, InsightKind::CategoryIncrease).unwrap();
        assert_eq!(inc.polarity, Polarity::Negative);
        assert_eq!(inc.title, "Rent spending up 20%");
    }

    #[test]
    fn test_category_increase_threshold() {
        // +15% exactly does not fire
        let current = agg(0.0, 115.0, vec![cat(1, "Food", 115.0)]);
        let previous = agg(0.0, 100.0, vec![cat(1, "Food", 100.0)]);
        let insights = generate(&current, &previous);
        assert!(of_kind(&insights, InsightKind::CategoryIncrease).is_none());
    }

    #[test]
    fn test_category_increase_tie_keeps_first() {
        let current = agg(0.0, 300.0, vec![cat(1, "A", 150.0), cat(2, "B", 150.0)]);
        let previous = agg(0.0, 200.0, vec![cat(2, "B", 100.0), cat(1, "A", 100.0)]);
        let insights = generate(&current, &previous);
        let inc = of_kind(&insights, InsightKind::CategoryIncrease).unwrap();
        assert!(inc.title.starts_with("A "));
    }

    #[test]
    fn test_category_increase_ignores_new_categories() {
        let current = agg(0.0, 500.0, vec![cat(1, "New", 500.0)]);
        let previous = agg(0.0, 10.0, vec![cat(2, "Old", 10.0)]);
        let insights = generate(&current, &previous);
        assert!(of_kind(&insights, InsightKind::CategoryIncrease).is_none());
    }

    #[test]
    fn test_top_category() {
        let mut food = cat(1, "Food", 40.0);
        food.percentage = 100.0;
        let insights = generate(&agg(0.0, 40.0, vec![food]), &empty());
        let top = of_kind(&insights, InsightKind::TopCategory).unwrap();
        assert_eq!(top.polarity, Polarity::Neutral);
        assert!(top.title.contains("Food"));
        assert!(top.description.contains("100%"));
    }

    #[test]
    fn test_income_trend_from_zero() {
        let insights = generate(&agg(500.0, 0.0, vec![]), &empty());
        let trend = of_kind(&insights, InsightKind::IncomeTrend).unwrap();
        assert_eq!(trend.polarity, Polarity::Positive);
        assert_eq!(trend.title, "Income up 100%");
    }

    #[test]
    fn test_income_trend_decrease_and_threshold() {
        let insights = generate(&agg(800.0, 0.0, vec![]), &agg(1000.0, 0.0, vec![]));
        let trend = of_kind(&insights, InsightKind::IncomeTrend).unwrap();
        assert_eq!(trend.polarity, Polarity::Negative);
        assert_eq!(trend.title, "Income down 20%");

        let insights = generate(&agg(1100.0, 0.0, vec![]), &agg(1000.0, 0.0, vec![]));
        assert!(of_kind(&insights, InsightKind::IncomeTrend).is_none());
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let mut food = cat(1, "Food", 600.0);
        food.percentage = 100.0;
        let current = agg(1000.0, 600.0, vec![food]);
        let previous = agg(500.0, 100.0, vec![cat(1, "Food", 100.0)]);

        let kinds: Vec<InsightKind> = generate(&current, &previous)
            .iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::SavingsRate,
                InsightKind::CategoryIncrease,
                InsightKind::TopCategory,
                InsightKind::IncomeTrend,
            ]
        );
    }
}
