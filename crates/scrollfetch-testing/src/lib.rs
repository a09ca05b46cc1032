//! Fake collaborators and a scenario harness for exercising the
//! pagination controller without a real viewport.

pub mod fake_viewport;
pub mod scenario;

pub use fake_viewport::{FakeViewport, FetchCounter};
pub use scenario::ScrollScenario;

pub mod prelude {
    pub use crate::fake_viewport::{FakeViewport, FetchCounter};
    pub use crate::scenario::ScrollScenario;
}
