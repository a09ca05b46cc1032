//! Scroll-triggered pagination controller.
//!
//! Decides exactly once per list-growth cycle when to request the next page
//! of data, based on visibility transitions of two sentinel items: a
//! configurable primary position and a fallback at the end of the list.
//!
//! The visibility facility, the fetch action, the session store, and the
//! render layer are external collaborators expressed as traits; the crate
//! itself contains only the trigger arbitration.

pub mod binding;
pub mod controller;
pub mod dispatcher;
pub mod session;
pub mod trigger_point;
pub mod visibility;

pub use binding::WatchBinding;
pub use controller::{ScrollFetchController, ScrollFetchOptions};
pub use dispatcher::TriggerDispatcher;
pub use session::{MemorySessionStore, SessionStore, TriggerSession};
pub use trigger_point::{resolve, SentinelIndices, TriggerPoint};
pub use visibility::{
    ObservationHandle, ObservationOptions, SentinelElement, VisibilityCallback,
    VisibilityObserver, VisibilityRecord,
};

pub mod prelude {
    pub use crate::binding::WatchBinding;
    pub use crate::controller::{ScrollFetchController, ScrollFetchOptions};
    pub use crate::dispatcher::TriggerDispatcher;
    pub use crate::session::{MemorySessionStore, SessionStore, TriggerSession};
    pub use crate::trigger_point::{resolve, SentinelIndices, TriggerPoint};
    pub use crate::visibility::{
        ObservationHandle, ObservationOptions, SentinelElement, VisibilityCallback,
        VisibilityObserver, VisibilityRecord,
    };
}
