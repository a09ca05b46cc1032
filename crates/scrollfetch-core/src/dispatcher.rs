//! Trigger arbitration.
//!
//! Reconciles the two independent visibility signals (primary and fallback
//! sentinel) so that each list-growth cycle issues exactly one fetch, even
//! though the two watches deliver in unpredictable order.

use std::cell::Cell;
use std::rc::Rc;

use crate::session::TriggerSession;
use crate::trigger_point::SentinelIndices;
use crate::visibility::{VisibilityCallback, VisibilityRecord};

/// Reactive arbiter over incoming visibility events.
///
/// The dispatcher holds no per-cycle arbitration state of its own; the
/// only mutable state shared between the two watches is the
/// [`TriggerSession`], read and written within a single synchronous
/// handler invocation. That makes every event safe to evaluate
/// independently, whatever order the watches deliver in, without a
/// machine-wide lock.
///
/// Clones share the same arbiter.
#[derive(Clone)]
pub struct TriggerDispatcher {
    inner: Rc<DispatcherInner>,
}

struct DispatcherInner {
    session: TriggerSession,
    fetch_next: Box<dyn Fn()>,
    fetch_more: Cell<bool>,
    targets: Cell<Option<SentinelIndices>>,
}

impl TriggerDispatcher {
    pub fn new(session: TriggerSession, fetch_next: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(DispatcherInner {
                session,
                fetch_next: Box::new(fetch_next),
                fetch_more: Cell::new(true),
                targets: Cell::new(None),
            }),
        }
    }

    /// Master switch: while disabled, no visibility event causes a fetch.
    pub fn set_fetch_more(&self, enabled: bool) {
        self.inner.fetch_more.set(enabled);
    }

    pub fn fetch_more(&self) -> bool {
        self.inner.fetch_more.get()
    }

    /// Points the arbiter at the sentinel indices of the current cycle.
    ///
    /// `None` (empty list) suppresses all triggering until the next
    /// retarget.
    pub fn retarget(&self, targets: Option<SentinelIndices>) {
        self.inner.targets.set(targets);
    }

    pub fn targets(&self) -> Option<SentinelIndices> {
        self.inner.targets.get()
    }

    /// Handles one notification batch from a watch.
    ///
    /// Only the first record of the batch is examined: each watch observes
    /// a single sentinel, so a longer batch is a run of repeated
    /// transitions of that one element and the first entry is
    /// authoritative for the turn. An empty batch is a no-op.
    ///
    /// Runs synchronously to completion and never panics: a throwing
    /// handler would corrupt the facility's own event loop, so every
    /// unusable event degrades to "no fetch this cycle".
    pub fn on_visibility_change(&self, records: &[VisibilityRecord]) {
        let Some(first) = records.first() else {
            return;
        };
        if !first.is_visible || !self.inner.fetch_more.get() {
            return;
        }
        let Some(targets) = self.inner.targets.get() else {
            return;
        };
        let Some(position) = first.target.position else {
            log::debug!(
                "ignoring visibility event for untagged element {}",
                first.target.key
            );
            return;
        };

        if position == targets.primary {
            // Recorded before the fetch so a fallback event processed
            // later in the same turn sees the crossing and suppresses.
            self.inner.session.record_trigger(position);
            (self.inner.fetch_next)();
        } else if position == targets.fallback
            && self.inner.session.last_triggered() != Some(targets.primary)
        {
            // Backstop: the last item is in view but the primary watch has
            // not accounted for this cycle. The session keeps the primary
            // index only, so the next cycle's primary crossing still
            // fires.
            (self.inner.fetch_next)();
        }
    }

    /// A callback fixed to this dispatcher, in the shape the visibility
    /// facility expects.
    pub fn callback(&self) -> VisibilityCallback {
        let dispatcher = self.clone();
        Rc::new(move |records: &[VisibilityRecord]| dispatcher.on_visibility_change(records))
    }
}
