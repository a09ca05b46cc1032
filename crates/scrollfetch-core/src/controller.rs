//! The controller tying resolver, session, dispatcher, and watches
//! together behind a single reconfigure operation.

use std::rc::Rc;

use crate::binding::WatchBinding;
use crate::dispatcher::TriggerDispatcher;
use crate::session::{SessionStore, TriggerSession};
use crate::trigger_point::{resolve, SentinelIndices, TriggerPoint};
use crate::visibility::{ObservationOptions, SentinelElement, VisibilityObserver};

/// Configuration for a [`ScrollFetchController`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollFetchOptions {
    /// Where the primary sentinel sits. Defaults to the last item.
    pub trigger_point: TriggerPoint,
    /// Master switch; while false, no visibility event causes a fetch.
    pub fetch_more: bool,
    /// Passed through, opaquely, to the visibility facility.
    pub observation: ObservationOptions,
}

impl Default for ScrollFetchOptions {
    fn default() -> Self {
        Self {
            trigger_point: TriggerPoint::default(),
            fetch_more: true,
            observation: ObservationOptions::default(),
        }
    }
}

impl ScrollFetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trigger_point(mut self, point: TriggerPoint) -> Self {
        self.trigger_point = point;
        self
    }

    pub fn with_fetch_more(mut self, enabled: bool) -> Self {
        self.fetch_more = enabled;
        self
    }

    pub fn with_observation(mut self, observation: ObservationOptions) -> Self {
        self.observation = observation;
        self
    }
}

/// Scroll-triggered pagination controller.
///
/// Owns the two sentinel watches and re-arms them whenever the rendered
/// list changes. The caller re-invokes [`reconfigure`] after every growth
/// or shrink of the list; the derived indices live nowhere else, so the
/// invariant "handles always observe elements consistent with the current
/// indices" is enforced at that single call site.
///
/// Dropping the controller releases both watches.
///
/// [`reconfigure`]: ScrollFetchController::reconfigure
pub struct ScrollFetchController {
    facility: Rc<dyn VisibilityObserver>,
    options: ScrollFetchOptions,
    dispatcher: TriggerDispatcher,
    primary_watch: WatchBinding,
    fallback_watch: WatchBinding,
}

impl ScrollFetchController {
    pub fn new(
        facility: Rc<dyn VisibilityObserver>,
        store: Rc<dyn SessionStore>,
        options: ScrollFetchOptions,
        fetch_next: impl Fn() + 'static,
    ) -> Self {
        let dispatcher = TriggerDispatcher::new(TriggerSession::new(store), fetch_next);
        dispatcher.set_fetch_more(options.fetch_more);
        Self {
            facility,
            options,
            dispatcher,
            primary_watch: WatchBinding::new(),
            fallback_watch: WatchBinding::new(),
        }
    }

    /// Recomputes the sentinel indices for `item_count` and re-arms both
    /// watches on the elements the render layer supplies.
    ///
    /// `element_at` maps a sentinel index to its rendered element, or
    /// `None` if that item is not currently rendered; an unrendered
    /// sentinel leaves its watch unarmed until the next reconfigure. An
    /// empty list arms nothing.
    pub fn reconfigure<F>(&mut self, item_count: usize, element_at: F)
    where
        F: Fn(usize) -> Option<SentinelElement>,
    {
        let indices = resolve(item_count, self.options.trigger_point);
        self.dispatcher.retarget(indices);

        // Disconnect-before-connect, unconditionally: a stale watch must
        // never outlive the index set it was armed for.
        self.primary_watch.unbind();
        self.fallback_watch.unbind();

        let Some(indices) = indices else {
            log::debug!("reconfigure with empty list; no sentinel armed");
            return;
        };

        self.arm(true, indices.primary, &element_at);

        // A coincident fallback shares the primary watch; arming a second
        // one would double-deliver every transition of that element.
        if indices.coincide() {
            return;
        }
        self.arm(false, indices.fallback, &element_at);
    }

    fn arm<F>(&mut self, primary: bool, index: usize, element_at: &F)
    where
        F: Fn(usize) -> Option<SentinelElement>,
    {
        let Some(element) = element_at(index) else {
            log::debug!(
                "{} sentinel {} not rendered; watch left unarmed",
                if primary { "primary" } else { "fallback" },
                index
            );
            return;
        };
        let watch = if primary {
            &mut self.primary_watch
        } else {
            &mut self.fallback_watch
        };
        watch.bind(
            self.facility.as_ref(),
            element,
            &self.options.observation,
            self.dispatcher.callback(),
        );
    }

    /// Toggles the master switch without rebinding.
    pub fn set_fetch_more(&self, enabled: bool) {
        self.dispatcher.set_fetch_more(enabled);
    }

    /// Moves the primary trigger position. Takes effect on the next
    /// [`reconfigure`](ScrollFetchController::reconfigure).
    pub fn set_trigger_point(&mut self, point: TriggerPoint) {
        self.options.trigger_point = point;
    }

    /// The sentinel indices of the current cycle, if the list is
    /// non-empty.
    pub fn indices(&self) -> Option<SentinelIndices> {
        self.dispatcher.targets()
    }

    pub fn armed_watches(&self) -> usize {
        usize::from(self.primary_watch.is_bound()) + usize::from(self.fallback_watch.is_bound())
    }

    pub fn dispatcher(&self) -> &TriggerDispatcher {
        &self.dispatcher
    }

    /// Releases both watches. Safe to call at any time, including from
    /// within a visibility handler; a disconnected handle is never
    /// re-entered. `Drop` gives the same guarantee.
    pub fn disconnect(&mut self) {
        self.primary_watch.unbind();
        self.fallback_watch.unbind();
    }
}
