//! The ledger: validated writes, change events, and reports for one user
//!
//! `Ledger` is generic over its storage backend so the same rules apply
//! whether records live in SQLite (`Database`) or in memory (`MemoryStore`).

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::analytics::{resolve_range_at, AnalyticsEngine, AnalyticsSummary, RangeKey, TimeRange};
use crate::budgets::{budget_progress, BudgetProgress};
use crate::config::{BudgetConfig, Config};
use crate::error::{Error, Result};
use crate::events::{ChangeAction, ChangeEvent, ChangeNotifier, EntityKind};
use crate::goals::{goal_progress, GoalProgress};
use crate::models::{
    default_categories, Budget, BudgetPeriod, Category, SavingsGoal, Transaction,
    DEFAULT_USER_ID, NEW_ID,
};
use crate::query::TransactionQuery;
use crate::repository::{Repository, Storage};

pub struct Ledger<S: Storage> {
    store: S,
    notifier: ChangeNotifier,
    engine: AnalyticsEngine,
    budget_config: BudgetConfig,
    user_id: i64,
}

impl<S: Storage> Ledger<S> {
    /// Ledger for the default user with default thresholds
    pub fn new(store: S) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            notifier: ChangeNotifier::new(),
            engine: AnalyticsEngine::with_config(config.analytics.clone()),
            budget_config: config.budgets.clone(),
            user_id: DEFAULT_USER_ID,
        }
    }

    /// Scope every read and write to `user_id`
    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Register observers here to hear about every persisted change
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    fn publish(&self, entity: EntityKind, action: ChangeAction, id: i64) {
        self.notifier.publish(&ChangeEvent::new(entity, action, id));
    }

    // ========== Transactions ==========

    /// All of the user's transactions, in id order
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let all = Repository::<Transaction>::list(&self.store)?;
        Ok(all.into_iter().filter(|t| t.user_id == self.user_id).collect())
    }

    /// Run a query restricted to the ledger's user
    pub fn query_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let scoped = TransactionQuery {
            user_id: Some(self.user_id),
            ..query.clone()
        };
        self.store.query_transactions(&scoped)
    }

    pub fn add_transaction(&self, mut tx: Transaction) -> Result<Transaction> {
        tx.id = NEW_ID;
        tx.user_id = self.user_id;
        self.validate_transaction(&tx)?;

        let saved = Repository::<Transaction>::save(&self.store, tx)?;
        info!(
            id = saved.id,
            amount = saved.amount,
            direction = saved.direction().as_str(),
            "Added transaction"
        );
        self.publish(EntityKind::Transaction, ChangeAction::Created, saved.id);
        Ok(saved)
    }

    /// Replace an existing transaction; `created_at` is kept from the stored record
    pub fn update_transaction(&self, mut tx: Transaction) -> Result<Transaction> {
        let existing = self.owned_transaction(tx.id)?;
        tx.user_id = self.user_id;
        tx.created_at = existing.created_at;
        self.validate_transaction(&tx)?;

        let saved = Repository::<Transaction>::save(&self.store, tx)?;
        info!(id = saved.id, "Updated transaction");
        self.publish(EntityKind::Transaction, ChangeAction::Updated, saved.id);
        Ok(saved)
    }

    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let tx = Repository::<Transaction>::get(&self.store, id)?;
        if !tx.is_some_and(|t| t.user_id == self.user_id) {
            return Ok(false);
        }
        let deleted = Repository::<Transaction>::delete(&self.store, id)?;
        if deleted {
            info!(id, "Deleted transaction");
            self.publish(EntityKind::Transaction, ChangeAction::Deleted, id);
        }
        Ok(deleted)
    }

    fn owned_transaction(&self, id: i64) -> Result<Transaction> {
        let tx = Repository::<Transaction>::get(&self.store, id)?;
        tx.filter(|t| t.user_id == self.user_id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    fn validate_transaction(&self, tx: &Transaction) -> Result<()> {
        if !tx.amount.is_finite() || tx.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "amount must be a non-negative number, got {}",
                tx.amount
            )));
        }
        if tx.description.trim().is_empty() {
            return Err(Error::InvalidData("description cannot be empty".to_string()));
        }

        // Another user's category counts as unknown
        let category = Repository::<Category>::get(&self.store, tx.category_id)?
            .filter(|c| c.user_id == self.user_id);
        match category {
            Some(c) if c.is_income != tx.is_income => Err(Error::CategoryMismatch(format!(
                "category '{}' is for {} but the transaction is {}",
                c.name,
                c.direction(),
                tx.direction()
            ))),
            Some(_) => Ok(()),
            None => {
                warn!(
                    category_id = tx.category_id,
                    "Transaction references unknown category"
                );
                Ok(())
            }
        }
    }

    // ========== Categories ==========

    /// The user's categories, in id order
    pub fn categories(&self) -> Result<Vec<Category>> {
        let all = Repository::<Category>::list(&self.store)?;
        Ok(all.into_iter().filter(|c| c.user_id == self.user_id).collect())
    }

    pub fn add_category(&self, name: &str, color: &str, is_income: bool) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("category name cannot be empty".to_string()));
        }
        if self
            .categories()?
            .iter()
            .any(|c| c.is_income == is_income && c.name.eq_ignore_ascii_case(name))
        {
            return Err(Error::InvalidData(format!(
                "category '{}' already exists",
                name
            )));
        }

        let category = Category::new(self.user_id, name, color, is_income);
        let saved = Repository::<Category>::save(&self.store, category)?;
        info!(id = saved.id, name = %saved.name, "Added category");
        self.publish(EntityKind::Category, ChangeAction::Created, saved.id);
        Ok(saved)
    }

    /// Delete a category and its budgets; its transactions are kept
    pub fn delete_category(&self, id: i64) -> Result<bool> {
        let category = Repository::<Category>::get(&self.store, id)?;
        if !category.is_some_and(|c| c.user_id == self.user_id) {
            return Ok(false);
        }

        for budget in self.budgets()?.into_iter().filter(|b| b.category_id == id) {
            self.delete_budget(budget.id)?;
        }

        let deleted = Repository::<Category>::delete(&self.store, id)?;
        if deleted {
            info!(id, "Deleted category");
            self.publish(EntityKind::Category, ChangeAction::Deleted, id);
        }
        Ok(deleted)
    }

    /// Create the default category set for a user that has none; returns how many were added
    pub fn seed_default_categories(&self) -> Result<usize> {
        if !self.categories()?.is_empty() {
            return Ok(0);
        }

        let defaults = default_categories(self.user_id);
        let count = defaults.len();
        for category in defaults {
            let saved = Repository::<Category>::save(&self.store, category)?;
            self.publish(EntityKind::Category, ChangeAction::Created, saved.id);
        }

        info!(count, user_id = self.user_id, "Seeded default categories");
        Ok(count)
    }

    // ========== Budgets ==========

    pub fn budgets(&self) -> Result<Vec<Budget>> {
        let all = Repository::<Budget>::list(&self.store)?;
        Ok(all.into_iter().filter(|b| b.user_id == self.user_id).collect())
    }

    /// Create or replace the budget for a category and period
    pub fn set_budget(
        &self,
        category_id: i64,
        amount: f64,
        period: BudgetPeriod,
    ) -> Result<Budget> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "budget amount must be a non-negative number, got {}",
                amount
            )));
        }

        let category = Repository::<Category>::get(&self.store, category_id)?;
        let category = category
            .filter(|c| c.user_id == self.user_id)
            .ok_or_else(|| Error::NotFound(format!("category {}", category_id)))?;
        if category.is_income {
            return Err(Error::CategoryMismatch(format!(
                "budgets apply to expense categories; '{}' is an income category",
                category.name
            )));
        }

        let existing = self
            .budgets()?
            .into_iter()
            .find(|b| b.category_id == category_id && b.period == period);

        let (budget, action) = match existing {
            Some(mut b) => {
                b.amount = amount;
                (b, ChangeAction::Updated)
            }
            None => (
                Budget::new(self.user_id, category_id, amount, period),
                ChangeAction::Created,
            ),
        };

        let saved = Repository::<Budget>::save(&self.store, budget)?;
        info!(
            id = saved.id,
            category = %category.name,
            amount,
            period = period.as_str(),
            "Set budget"
        );
        self.publish(EntityKind::Budget, action, saved.id);
        Ok(saved)
    }

    pub fn delete_budget(&self, id: i64) -> Result<bool> {
        let budget = Repository::<Budget>::get(&self.store, id)?;
        if !budget.is_some_and(|b| b.user_id == self.user_id) {
            return Ok(false);
        }

        let deleted = Repository::<Budget>::delete(&self.store, id)?;
        if deleted {
            info!(id, "Deleted budget");
            self.publish(EntityKind::Budget, ChangeAction::Deleted, id);
        }
        Ok(deleted)
    }

    /// Progress of every budget in the period containing `now`
    pub fn budget_report(&self, now: NaiveDateTime) -> Result<Vec<BudgetProgress>> {
        let transactions = self.transactions()?;
        let categories = self.categories()?;
        Ok(self
            .budgets()?
            .iter()
            .map(|b| {
                budget_progress(
                    b,
                    &transactions,
                    &categories,
                    now,
                    self.budget_config.warning_percent,
                )
            })
            .collect())
    }

    // ========== Savings goals ==========

    pub fn goals(&self) -> Result<Vec<SavingsGoal>> {
        let all = Repository::<SavingsGoal>::list(&self.store)?;
        Ok(all.into_iter().filter(|g| g.user_id == self.user_id).collect())
    }

    pub fn add_goal(
        &self,
        name: &str,
        target_amount: f64,
        deadline: Option<NaiveDate>,
    ) -> Result<SavingsGoal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("goal name cannot be empty".to_string()));
        }
        if !target_amount.is_finite() || target_amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "goal target must be positive, got {}",
                target_amount
            )));
        }

        let goal = SavingsGoal::new(self.user_id, name, target_amount, deadline);
        let saved = Repository::<SavingsGoal>::save(&self.store, goal)?;
        info!(id = saved.id, name = %saved.name, target_amount, "Added savings goal");
        self.publish(EntityKind::Goal, ChangeAction::Created, saved.id);
        Ok(saved)
    }

    /// Add money to a goal; returns the updated goal
    pub fn contribute_to_goal(&self, id: i64, amount: f64) -> Result<SavingsGoal> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "contribution must be positive, got {}",
                amount
            )));
        }

        let goal = Repository::<SavingsGoal>::get(&self.store, id)?;
        let mut goal = goal
            .filter(|g| g.user_id == self.user_id)
            .ok_or_else(|| Error::NotFound(format!("savings goal {}", id)))?;
        goal.current_amount += amount;

        let saved = Repository::<SavingsGoal>::save(&self.store, goal)?;
        info!(id, amount, total = saved.current_amount, "Contributed to savings goal");
        self.publish(EntityKind::Goal, ChangeAction::Updated, id);
        Ok(saved)
    }

    pub fn delete_goal(&self, id: i64) -> Result<bool> {
        let goal = Repository::<SavingsGoal>::get(&self.store, id)?;
        if !goal.is_some_and(|g| g.user_id == self.user_id) {
            return Ok(false);
        }

        let deleted = Repository::<SavingsGoal>::delete(&self.store, id)?;
        if deleted {
            info!(id, "Deleted savings goal");
            self.publish(EntityKind::Goal, ChangeAction::Deleted, id);
        }
        Ok(deleted)
    }

    pub fn goal_report(&self, today: NaiveDate) -> Result<Vec<GoalProgress>> {
        Ok(self
            .goals()?
            .iter()
            .map(|g| goal_progress(g, today))
            .collect())
    }

    // ========== Analytics ==========

    /// Dashboard summary for an explicit range
    pub fn analytics(&self, range: &TimeRange, now: NaiveDateTime) -> Result<AnalyticsSummary> {
        let transactions = self.transactions()?;
        let categories = self.categories()?;
        Ok(self
            .engine
            .compute_at(&transactions, &categories, range, now))
    }

    /// Dashboard summary for a named range resolved against `now`
    pub fn analytics_for(&self, key: RangeKey, now: NaiveDateTime) -> Result<AnalyticsSummary> {
        self.analytics(&resolve_range_at(key, now), now)
    }
}
