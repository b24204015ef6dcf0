//! Robot driver for headless wheel testing.
//!
//! Feeds synthetic touch streams and frame ticks into a [`Wheel`] with a
//! monotonic millisecond clock, so integration tests read like a script:
//!
//! ```
//! use wheel_testing::{StringsAdapter, WheelRobot};
//!
//! let mut robot = WheelRobot::new(StringsAdapter::countries());
//! robot.wheel_mut().set_current_item(1, false);
//! robot.drag((100.0, 150.0), (100.0, 100.0));
//! robot.settle();
//! assert_eq!(robot.wheel().current_item(), 2);
//! ```

use wheel_core::{TouchPhase, Wheel, WheelAdapter};

/// Frame cadence of the synthetic clock.
pub const FRAME_MS: i64 = 16;

/// Hold time before release that lets the tracked velocity decay, so a drag
/// settles through justification instead of flinging.
const RELEASE_HOLD_MS: i64 = 50;

/// Drives a wheel through touch streams and animation frames.
pub struct WheelRobot<A: WheelAdapter> {
    wheel: Wheel<A>,
    now_ms: i64,
}

impl<A: WheelAdapter> WheelRobot<A> {
    /// Wheel with the default 320x250 viewport and 50px rows (5 visible).
    pub fn new(adapter: A) -> Self {
        let mut wheel = Wheel::new(adapter);
        wheel.set_viewport(320.0, 250.0);
        wheel.set_item_extent(50.0);
        Self { wheel, now_ms: 0 }
    }

    /// Wraps an already configured wheel.
    pub fn with_wheel(wheel: Wheel<A>) -> Self {
        Self { wheel, now_ms: 0 }
    }

    pub fn wheel(&self) -> &Wheel<A> {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut Wheel<A> {
        &mut self.wheel
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Center of the selection band.
    pub fn band_center(&self) -> (f32, f32) {
        let band = self.wheel.selection_band();
        ((band.left + band.right) / 2.0, band.center_y())
    }

    /// A point `items` rows below (positive) or above (negative) the band
    /// center.
    pub fn point_at_items(&self, items: i32) -> (f32, f32) {
        let (x, y) = self.band_center();
        (x, y + items as f32 * self.wheel.item_extent())
    }

    /// Runs animation frames for `ms` of synthetic time.
    pub fn advance(&mut self, ms: i64) {
        let end = self.now_ms + ms;
        while self.now_ms < end {
            self.now_ms = (self.now_ms + FRAME_MS).min(end);
            self.wheel.on_frame(self.now_ms);
        }
    }

    /// Runs frames until any in-flight scroll settles.
    pub fn settle(&mut self) {
        for _ in 0..600 {
            if !self.wheel.is_scroll_in_progress() {
                return;
            }
            self.now_ms += FRAME_MS;
            self.wheel.on_frame(self.now_ms);
        }
        log::warn!("scroll did not settle within the frame budget");
    }

    /// Tap: down and up at the same point.
    pub fn tap(&mut self, x: f32, y: f32) {
        self.wheel.on_touch(TouchPhase::Down, x, y, self.now_ms);
        self.now_ms += FRAME_MS;
        self.wheel.on_touch(TouchPhase::Up, x, y, self.now_ms);
    }

    /// Drag in 8 steps, holding still before release so no fling starts.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.drag_steps(from, to, 8, true);
    }

    /// Drag and release at speed, letting the tracked velocity fling.
    pub fn fling(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.drag_steps(from, to, 4, false);
    }

    /// Swipe: fast horizontal motion released immediately.
    pub fn swipe(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.wheel.on_touch(TouchPhase::Down, from.0, from.1, self.now_ms);
        self.now_ms += FRAME_MS;
        self.wheel.on_touch(TouchPhase::Up, to.0, to.1, self.now_ms);
    }

    fn drag_steps(&mut self, from: (f32, f32), to: (f32, f32), steps: u32, hold: bool) {
        self.wheel.on_touch(TouchPhase::Down, from.0, from.1, self.now_ms);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.now_ms += FRAME_MS;
            self.wheel.on_touch(TouchPhase::Move, x, y, self.now_ms);
        }
        if hold {
            self.now_ms += RELEASE_HOLD_MS;
        } else {
            self.now_ms += FRAME_MS;
        }
        self.wheel.on_touch(TouchPhase::Up, to.0, to.1, self.now_ms);
    }
}
