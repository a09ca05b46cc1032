//! Watch lifecycle: arming and releasing visibility observations.

use crate::visibility::{
    ObservationHandle, ObservationOptions, SentinelElement, VisibilityCallback,
    VisibilityObserver,
};

/// Owns at most one armed observation.
///
/// Rebinding always disconnects the previous observation first, so a
/// handle is never left watching a stale or detached element. Dropping
/// the binding releases the observation; the exit path is guaranteed, not
/// best-effort.
#[derive(Default)]
pub struct WatchBinding {
    active: Option<Box<dyn ObservationHandle>>,
}

impl WatchBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms this binding on `element`, releasing any previous observation
    /// first (disconnect-before-connect).
    pub fn bind(
        &mut self,
        facility: &dyn VisibilityObserver,
        element: SentinelElement,
        options: &ObservationOptions,
        on_change: VisibilityCallback,
    ) {
        self.unbind();
        self.active = Some(facility.observe(element, options, on_change));
    }

    /// Releases the current observation. Idempotent: calling with nothing
    /// bound is a no-op, never an error.
    pub fn unbind(&mut self) {
        if let Some(mut handle) = self.active.take() {
            handle.disconnect();
        }
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for WatchBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::VisibilityRecord;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        Observed(u64),
        Disconnected(u64),
    }

    #[derive(Clone, Default)]
    struct RecordingFacility {
        events: Rc<RefCell<Vec<Event>>>,
    }

    struct RecordingHandle {
        key: u64,
        events: Rc<RefCell<Vec<Event>>>,
        connected: Cell<bool>,
    }

    impl ObservationHandle for RecordingHandle {
        fn disconnect(&mut self) {
            if self.connected.replace(false) {
                self.events.borrow_mut().push(Event::Disconnected(self.key));
            }
        }
    }

    impl VisibilityObserver for RecordingFacility {
        fn observe(
            &self,
            element: SentinelElement,
            _options: &ObservationOptions,
            _on_change: VisibilityCallback,
        ) -> Box<dyn ObservationHandle> {
            self.events.borrow_mut().push(Event::Observed(element.key));
            Box::new(RecordingHandle {
                key: element.key,
                events: self.events.clone(),
                connected: Cell::new(true),
            })
        }
    }

    fn noop_callback() -> VisibilityCallback {
        Rc::new(|_records: &[VisibilityRecord]| {})
    }

    #[test]
    fn test_rebind_disconnects_before_connect() {
        let facility = RecordingFacility::default();
        let mut binding = WatchBinding::new();
        let options = ObservationOptions::default();

        binding.bind(
            &facility,
            SentinelElement::new(1, 0),
            &options,
            noop_callback(),
        );
        binding.bind(
            &facility,
            SentinelElement::new(2, 1),
            &options,
            noop_callback(),
        );

        assert_eq!(
            *facility.events.borrow(),
            vec![
                Event::Observed(1),
                Event::Disconnected(1),
                Event::Observed(2),
            ]
        );
    }

    #[test]
    fn test_unbind_is_idempotent() {
        let facility = RecordingFacility::default();
        let mut binding = WatchBinding::new();

        // Nothing bound yet: a no-op.
        binding.unbind();
        assert!(facility.events.borrow().is_empty());

        binding.bind(
            &facility,
            SentinelElement::new(7, 3),
            &ObservationOptions::default(),
            noop_callback(),
        );
        binding.unbind();
        binding.unbind();

        assert_eq!(
            *facility.events.borrow(),
            vec![Event::Observed(7), Event::Disconnected(7)]
        );
        assert!(!binding.is_bound());
    }

    #[test]
    fn test_drop_releases_observation() {
        let facility = RecordingFacility::default();
        {
            let mut binding = WatchBinding::new();
            binding.bind(
                &facility,
                SentinelElement::new(9, 4),
                &ObservationOptions::default(),
                noop_callback(),
            );
        }
        assert_eq!(
            *facility.events.borrow(),
            vec![Event::Observed(9), Event::Disconnected(9)]
        );
    }

    #[test]
    fn test_bindings_are_independent() {
        let facility = RecordingFacility::default();
        let options = ObservationOptions::default();
        let mut primary = WatchBinding::new();
        let mut fallback = WatchBinding::new();

        primary.bind(
            &facility,
            SentinelElement::new(1, 5),
            &options,
            noop_callback(),
        );
        fallback.bind(
            &facility,
            SentinelElement::new(2, 9),
            &options,
            noop_callback(),
        );

        primary.unbind();
        assert!(!primary.is_bound());
        assert!(fallback.is_bound());
    }
}
