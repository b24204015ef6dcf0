//! Motion primitives: fling physics, easing curves, velocity tracking.

pub mod easing;
pub mod fling;
pub mod velocity;

pub use easing::Easing;
pub use fling::{FlingPhysics, FlingSegment};
pub use velocity::VelocityTracker;
