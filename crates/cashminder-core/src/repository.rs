//! Storage abstraction shared by the SQLite database and the in-memory store
//!
//! The ledger only talks to these traits, so the backing store is chosen by
//! whoever constructs it.

use crate::error::Result;
use crate::models::{Budget, Category, SavingsGoal, Transaction};
use crate::query::TransactionQuery;

/// A persisted entity with an integer id (`NEW_ID` until saved)
pub trait Record: Clone + Send + Sync + 'static {
    /// Name used in log lines and `NotFound` errors
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

impl Record for Transaction {
    const KIND: &'static str = "transaction";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Record for Category {
    const KIND: &'static str = "category";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Record for Budget {
    const KIND: &'static str = "budget";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Record for SavingsGoal {
    const KIND: &'static str = "savings goal";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// Basic persistence for one record type
pub trait Repository<T: Record> {
    fn get(&self, id: i64) -> Result<Option<T>>;

    /// All records, in id order
    fn list(&self) -> Result<Vec<T>>;

    /// Insert when the id is `NEW_ID`, otherwise overwrite; returns the stored record
    ///
    /// Overwriting an id that does not exist is `Error::NotFound`.
    fn save(&self, record: T) -> Result<T>;

    /// Returns whether a record was removed
    fn delete(&self, id: i64) -> Result<bool>;
}

/// Filtered, sorted and paged transaction lookup
pub trait TransactionQueries {
    /// Run a query; implementations validate it first
    fn query_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;
}

/// Everything the ledger needs from a backing store
pub trait Storage:
    Repository<Transaction>
    + Repository<Category>
    + Repository<Budget>
    + Repository<SavingsGoal>
    + TransactionQueries
    + Send
    + Sync
{
}

impl<S> Storage for S where
    S: Repository<Transaction>
        + Repository<Category>
        + Repository<Budget>
        + Repository<SavingsGoal>
        + TransactionQueries
        + Send
        + Sync
{
}
