//! Scenario harness: wires a controller to the fake collaborators and
//! scripts list growth and scrolling, in the manner of a UI test robot.
//!
//! # Example
//!
//! ```
//! use scrollfetch_core::{ScrollFetchOptions, TriggerPoint};
//! use scrollfetch_testing::ScrollScenario;
//!
//! let mut scenario = ScrollScenario::new(
//!     ScrollFetchOptions::new().with_trigger_point(TriggerPoint::HALF),
//! );
//! scenario.render(10);
//! scenario.scroll_into_view(5);
//! assert_eq!(scenario.fetch_count(), 1);
//! ```

use std::rc::Rc;

use scrollfetch_core::{
    MemorySessionStore, ScrollFetchController, ScrollFetchOptions, SentinelElement,
    SentinelIndices,
};

use crate::fake_viewport::{FakeViewport, FetchCounter};

/// Drives a [`ScrollFetchController`] against the fake viewport and a
/// fresh in-memory session store.
pub struct ScrollScenario {
    viewport: FakeViewport,
    fetches: FetchCounter,
    controller: ScrollFetchController,
    item_count: usize,
}

impl ScrollScenario {
    pub fn new(options: ScrollFetchOptions) -> Self {
        let viewport = FakeViewport::new();
        let fetches = FetchCounter::new();
        let controller = ScrollFetchController::new(
            Rc::new(viewport.clone()),
            Rc::new(MemorySessionStore::new()),
            options,
            fetches.action(),
        );
        Self {
            viewport,
            fetches,
            controller,
            item_count: 0,
        }
    }

    /// Renders `count` items and re-arms the watches. Every item is
    /// tagged with its position; keys stay stable across growth.
    pub fn render(&mut self, count: usize) {
        self.item_count = count;
        self.controller.reconfigure(count, |index| {
            (index < count).then(|| SentinelElement::new(index as u64, index))
        });
    }

    /// Scrolls the item at `position` into view.
    pub fn scroll_into_view(&self, position: usize) {
        self.viewport.emit(position, true);
    }

    /// Scrolls the item at `position` out of view.
    pub fn scroll_out_of_view(&self, position: usize) {
        self.viewport.emit(position, false);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.count()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn indices(&self) -> Option<SentinelIndices> {
        self.controller.indices()
    }

    pub fn viewport(&self) -> &FakeViewport {
        &self.viewport
    }

    pub fn controller(&mut self) -> &mut ScrollFetchController {
        &mut self.controller
    }
}
