//! In-memory stand-ins for the external collaborators.
//!
//! [`FakeViewport`] plays the visibility facility: it records armed
//! watches and lets a test script visibility transitions against them.
//! [`FetchCounter`] plays the fetch action.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use scrollfetch_core::{
    ObservationHandle, ObservationOptions, SentinelElement, VisibilityCallback,
    VisibilityObserver, VisibilityRecord,
};

/// Counts invocations of the fetch action.
#[derive(Clone, Default)]
pub struct FetchCounter {
    calls: Rc<Cell<usize>>,
}

impl FetchCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.get()
    }

    /// The zero-argument fetch action to hand to the controller.
    pub fn action(&self) -> impl Fn() + 'static {
        let calls = self.calls.clone();
        move || calls.set(calls.get() + 1)
    }
}

struct Watch {
    element: SentinelElement,
    options: ObservationOptions,
    callback: VisibilityCallback,
    connected: Cell<bool>,
}

/// Fake visibility facility.
///
/// Every `observe` call appends a watch; `disconnect` severs delivery but
/// keeps the record so tests can assert on lifecycle order. Clones share
/// the same facility.
#[derive(Clone, Default)]
pub struct FakeViewport {
    inner: Rc<ViewportInner>,
}

#[derive(Default)]
struct ViewportInner {
    watches: RefCell<Vec<Rc<Watch>>>,
    disconnects: Cell<usize>,
}

impl FakeViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently connected watches.
    pub fn armed_count(&self) -> usize {
        self.inner
            .watches
            .borrow()
            .iter()
            .filter(|watch| watch.connected.get())
            .count()
    }

    /// Total disconnects observed, for teardown assertions.
    pub fn disconnect_count(&self) -> usize {
        self.inner.disconnects.get()
    }

    /// Positions currently under observation, in arming order.
    pub fn observed_positions(&self) -> Vec<usize> {
        self.inner
            .watches
            .borrow()
            .iter()
            .filter(|watch| watch.connected.get())
            .filter_map(|watch| watch.element.position)
            .collect()
    }

    /// Options the most recent watch was armed with.
    pub fn last_options(&self) -> Option<ObservationOptions> {
        self.inner
            .watches
            .borrow()
            .last()
            .map(|watch| watch.options.clone())
    }

    /// Delivers a visibility transition to every connected watch whose
    /// element sits at `position`. Each matching watch gets its own
    /// single-record batch, the way a real facility notifies per
    /// observer.
    pub fn emit(&self, position: usize, is_visible: bool) {
        let targets: SmallVec<[Rc<Watch>; 2]> = self
            .inner
            .watches
            .borrow()
            .iter()
            .filter(|watch| watch.connected.get() && watch.element.position == Some(position))
            .cloned()
            .collect();
        if targets.is_empty() {
            log::debug!("no connected watch at position {position}");
        }
        for watch in targets {
            let record = VisibilityRecord {
                target: watch.element,
                is_visible,
            };
            (watch.callback)(&[record]);
        }
    }

    /// Delivers one multi-record batch to the first connected watch, for
    /// tests of within-batch ordering.
    pub fn emit_batch(&self, records: &[VisibilityRecord]) {
        let first = self
            .inner
            .watches
            .borrow()
            .iter()
            .find(|watch| watch.connected.get())
            .cloned();
        if let Some(watch) = first {
            (watch.callback)(records);
        }
    }
}

struct FakeHandle {
    watch: Rc<Watch>,
    inner: Rc<ViewportInner>,
}

impl ObservationHandle for FakeHandle {
    fn disconnect(&mut self) {
        if self.watch.connected.replace(false) {
            self.inner.disconnects.set(self.inner.disconnects.get() + 1);
        }
    }
}

impl VisibilityObserver for FakeViewport {
    fn observe(
        &self,
        element: SentinelElement,
        options: &ObservationOptions,
        on_change: VisibilityCallback,
    ) -> Box<dyn ObservationHandle> {
        let watch = Rc::new(Watch {
            element,
            options: options.clone(),
            callback: on_change,
            connected: Cell::new(true),
        });
        self.inner.watches.borrow_mut().push(watch.clone());
        Box::new(FakeHandle {
            watch,
            inner: self.inner.clone(),
        })
    }
}
