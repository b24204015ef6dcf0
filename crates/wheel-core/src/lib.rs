//! Wheel picker core
//!
//! A vertically scrolling, optionally cyclic item picker: inertial scroll
//! engine with snap-to-item justification, a recycling row window over an
//! adapter-backed item source, tap/swipe gesture classification with
//! contextual affordances, and synchronous listener fan-out.
//!
//! The crate is headless and single-threaded: the host feeds touch events
//! and animation ticks into a [`Wheel`] and reads back the materialized row
//! window and scroll offset each render pass.

pub mod adapter;
pub mod config;
pub mod events;
pub mod gesture;
pub mod motion;
pub mod scroller;
pub mod wheel;
pub mod window;

pub use adapter::WheelAdapter;
pub use config::WheelConfig;
pub use events::{ListenerId, WheelClickListener, WheelScrollListener};
pub use gesture::{Affordance, Gesture, Point, Rect, TouchPhase};
pub use scroller::ScrollEvent;
pub use wheel::Wheel;
pub use window::{ItemsRange, RowRole};

pub mod prelude {
    pub use crate::adapter::WheelAdapter;
    pub use crate::config::WheelConfig;
    pub use crate::events::{ListenerId, WheelClickListener, WheelScrollListener};
    pub use crate::gesture::{Affordance, Point, Rect, TouchPhase};
    pub use crate::wheel::Wheel;
}
