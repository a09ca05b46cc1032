//! Interfaces to the external visibility-observation facility.
//!
//! The facility reports "element became visible / not visible",
//! asynchronously, at a granularity controlled by caller-supplied
//! [`ObservationOptions`]. The controller never blocks waiting for a
//! visibility change; it only reacts to delivered batches.

use std::rc::Rc;

/// Options passed through, opaquely, to the visibility facility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObservationOptions {
    /// Fraction of the sentinel that must be visible before the facility
    /// reports an intersection.
    pub threshold: Option<f32>,
    /// Margin around the observed region, in the facility's own syntax
    /// (e.g. `"200px 0px"`).
    pub root_margin: Option<String>,
}

impl ObservationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = Some(margin.into());
        self
    }
}

/// A rendered list element the controller can ask the facility to watch.
///
/// The render layer tags each element with its stable list position so the
/// visibility callback can recover the observed index from a fired event.
/// An element without a tag produces unidentifiable events, which the
/// dispatcher ignores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentinelElement {
    /// Stable identity of the element, assigned by the render layer.
    pub key: u64,
    /// Position identifier recovered by the visibility callback.
    pub position: Option<usize>,
}

impl SentinelElement {
    pub fn new(key: u64, position: usize) -> Self {
        Self {
            key,
            position: Some(position),
        }
    }

    /// An element the render layer failed to tag with a position.
    pub fn untagged(key: u64) -> Self {
        Self { key, position: None }
    }
}

/// One entry in a visibility notification batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityRecord {
    pub target: SentinelElement,
    pub is_visible: bool,
}

impl VisibilityRecord {
    pub fn visible(target: SentinelElement) -> Self {
        Self {
            target,
            is_visible: true,
        }
    }

    pub fn hidden(target: SentinelElement) -> Self {
        Self {
            target,
            is_visible: false,
        }
    }
}

/// Callback the facility invokes with each notification batch.
///
/// Batches arrive asynchronously relative to the code that armed the
/// watch, but each invocation runs synchronously to completion.
pub type VisibilityCallback = Rc<dyn Fn(&[VisibilityRecord])>;

/// An armed watch on a single element.
///
/// `disconnect` releases the observation eagerly; implementations must
/// tolerate repeated calls.
pub trait ObservationHandle {
    fn disconnect(&mut self);
}

/// The external visibility-observation facility.
pub trait VisibilityObserver {
    /// Begins observing `element`, delivering batches to `on_change`.
    fn observe(
        &self,
        element: SentinelElement,
        options: &ObservationOptions,
        on_change: VisibilityCallback,
    ) -> Box<dyn ObservationHandle>;
}
