//! In-process storage backend
//!
//! Keeps every record in ordered maps behind `RwLock`s. Nothing survives
//! the process; used for tests and as a scratch ledger.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Budget, Category, SavingsGoal, Transaction, NEW_ID};
use crate::query::TransactionQuery;
use crate::repository::{Record, Repository, TransactionQueries};

/// One record type's rows plus its id sequence
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn get(&self, id: i64) -> Option<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.get(&id).cloned()
    }

    fn list(&self) -> Vec<T> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        rows.values().cloned().collect()
    }

    fn save(&self, mut record: T) -> Result<T> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);

        if record.id() == NEW_ID {
            record.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        } else if !rows.contains_key(&record.id()) {
            return Err(Error::NotFound(format!("{} {}", T::KIND, record.id())));
        }

        debug!(kind = T::KIND, id = record.id(), "Saved record");
        rows.insert(record.id(), record.clone());
        Ok(record)
    }

    fn delete(&self, id: i64) -> bool {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        rows.remove(&id).is_some()
    }
}

/// Storage backend held entirely in memory
pub struct MemoryStore {
    transactions: Table<Transaction>,
    categories: Table<Category>,
    budgets: Table<Budget>,
    goals: Table<SavingsGoal>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            transactions: Table::new(),
            categories: Table::new(),
            budgets: Table::new(),
            goals: Table::new(),
        }
    }
}

macro_rules! memory_repository {
    ($record:ty, $table:ident) => {
        impl Repository<$record> for MemoryStore {
            fn get(&self, id: i64) -> Result<Option<$record>> {
                Ok(self.$table.get(id))
            }

            fn list(&self) -> Result<Vec<$record>> {
                Ok(self.$table.list())
            }

            fn save(&self, record: $record) -> Result<$record> {
                self.$table.save(record)
            }

            fn delete(&self, id: i64) -> Result<bool> {
                Ok(self.$table.delete(id))
            }
        }
    };
}

memory_repository!(Transaction, transactions);
memory_repository!(Category, categories);
memory_repository!(Budget, budgets);
memory_repository!(SavingsGoal, goals);

impl TransactionQueries for MemoryStore {
    fn query_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        query.validate()?;
        Ok(query.apply(self.transactions.list()))
    }
}
