//! Change notification for ledger writes
//!
//! Observers register a callback and are told about every create, update
//! and delete after it has been persisted.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What kind of record changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Transaction,
    Category,
    Budget,
    Goal,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Transaction => "transaction",
            EntityKind::Category => "category",
            EntityKind::Budget => "budget",
            EntityKind::Goal => "goal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Created => "created",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity: EntityKind,
    pub action: ChangeAction,
    pub id: i64,
}

impl ChangeEvent {
    pub fn new(entity: EntityKind, action: ChangeAction, id: i64) -> Self {
        Self { entity, action, id }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.entity.as_str(), self.id, self.action.as_str())
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Fan-out of change events to registered observers, in registration order
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RwLock<Listeners>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.next_id += 1;
        let id = SubscriptionId(listeners.next_id);
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.entries.len();
        listeners.entries.retain(|(sid, _)| *sid != id);
        listeners.entries.len() != before
    }

    /// Deliver an event to every listener; returns how many were called
    pub fn publish(&self, event: &ChangeEvent) -> usize {
        // Snapshot so a listener may subscribe or unsubscribe without deadlocking
        let snapshot: Vec<Listener> = {
            let listeners = self
                .listeners
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            listeners.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in &snapshot {
            listener(event);
        }

        debug!(event = %event, listeners = snapshot.len(), "Published change");
        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn event(id: i64) -> ChangeEvent {
        ChangeEvent::new(EntityKind::Transaction, ChangeAction::Created, id)
    }

    #[test]
    fn test_publish_reaches_listeners_in_order() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            notifier.subscribe(move |e| seen.lock().unwrap().push((tag, e.id)));
        }

        assert_eq!(notifier.publish(&event(7)), 2);
        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let notifier = ChangeNotifier::new();
        let id = notifier.subscribe(|_| {});
        assert_eq!(notifier.listener_count(), 1);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert_eq!(notifier.publish(&event(1)), 0);
    }

    #[test]
    fn test_listener_may_unsubscribe_during_publish() {
        let notifier = Arc::new(ChangeNotifier::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let id = {
            let inner = Arc::clone(&notifier);
            let slot = Arc::clone(&slot);
            notifier.subscribe(move |_| {
                if let Some(id) = slot.lock().unwrap().take() {
                    inner.unsubscribe(id);
                }
            })
        };
        *slot.lock().unwrap() = Some(id);

        assert_eq!(notifier.publish(&event(1)), 1);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_event_display() {
        let e = ChangeEvent::new(EntityKind::Goal, ChangeAction::Deleted, 3);
        assert_eq!(e.to_string(), "goal 3 deleted");
    }
}
