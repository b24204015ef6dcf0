//! Testing utilities and robot driver for the wheel picker
//!
//! Provides a robot-style API for driving a headless [`wheel_core::Wheel`]
//! through synthetic touch streams and frame ticks, plus simple adapters and
//! recording listeners for asserting on notification traffic.

pub mod adapters;
pub mod recording;
pub mod robot;

pub use adapters::StringsAdapter;
pub use recording::{Event, RecordingListener};
pub use robot::WheelRobot;

pub mod prelude {
    pub use crate::adapters::StringsAdapter;
    pub use crate::recording::{Event, RecordingListener};
    pub use crate::robot::WheelRobot;
}
