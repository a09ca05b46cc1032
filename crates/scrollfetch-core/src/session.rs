//! Session-scoped tracking of the last index that triggered a fetch.
//!
//! The store outlives a single render cycle but is scoped to one app
//! session; it is injected as an explicit dependency rather than reached
//! through ambient global state, so the dispatcher stays a pure function
//! of (event, config, injected store).

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Key/value store scoped to the current browsing/app session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-process [`SessionStore`] backed by a hash map.
#[derive(Default)]
pub struct MemorySessionStore {
    values: RefCell<FxHashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

/// Storage key for the last-triggered index.
const LAST_TRIGGERED_KEY: &str = "scrollfetch.last_triggered";

/// Remembers the index that most recently fired the primary trigger.
///
/// Write-only-forward: the session always holds the most recent value, no
/// history and no rollback. An absent value means "no trigger has
/// occurred yet" and is never conflated with index 0.
#[derive(Clone)]
pub struct TriggerSession {
    store: Rc<dyn SessionStore>,
}

impl TriggerSession {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The last index that fired the primary trigger, if any.
    ///
    /// Stored text that does not parse as an index is treated as absent.
    pub fn last_triggered(&self) -> Option<usize> {
        self.store.get(LAST_TRIGGERED_KEY)?.parse().ok()
    }

    pub fn record_trigger(&self, index: usize) {
        self.store.set(LAST_TRIGGERED_KEY, &index.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_until_recorded() {
        let session = TriggerSession::new(Rc::new(MemorySessionStore::new()));
        assert_eq!(session.last_triggered(), None);

        session.record_trigger(5);
        assert_eq!(session.last_triggered(), Some(5));
    }

    #[test]
    fn test_overwrites_forward() {
        let session = TriggerSession::new(Rc::new(MemorySessionStore::new()));
        session.record_trigger(5);
        session.record_trigger(12);
        assert_eq!(session.last_triggered(), Some(12));
    }

    #[test]
    fn test_unparsable_value_treated_as_absent() {
        let store = Rc::new(MemorySessionStore::new());
        store.set(LAST_TRIGGERED_KEY, "not-an-index");

        let session = TriggerSession::new(store);
        assert_eq!(session.last_triggered(), None);
    }

    #[test]
    fn test_zero_is_a_real_value() {
        let session = TriggerSession::new(Rc::new(MemorySessionStore::new()));
        session.record_trigger(0);
        assert_eq!(session.last_triggered(), Some(0));
    }
}
