//! Scroll state machine: drag tracking, inertial fling, justification.
//!
//! The scroller owns the raw-motion side of scrolling. It consumes vertical
//! touch input and animation ticks, and emits typed [`ScrollEvent`]s that the
//! wheel applies to its offset/index state. Phases:
//!
//! - `Idle` — nothing happening.
//! - `Pressed` — finger down, drag slop not yet passed.
//! - `Dragging` — slop passed; every move emits a scroll delta.
//! - `Animating` — a fling or a fixed-duration tween is in flight, advanced
//!   by [`WheelScroller::on_frame`].
//! - `Settling` — the animation ended and `Justify` was emitted; unless the
//!   wheel starts a justification segment, the next frame emits `Finished`.
//!
//! A new touch-down cancels an in-flight animation deterministically: the
//! pending segment is discarded, never merged.
//!
//! Animated segments follow the original scroller convention: the emitted
//! deltas of a segment of distance `d` sum to `-d`, so a justification pass
//! hands in the residual offset itself and a programmatic item scroll hands
//! in `items * extent - offset`.

use smallvec::SmallVec;

use crate::config::WheelConfig;
use crate::gesture::TouchPhase;
use crate::motion::{Easing, FlingPhysics, FlingSegment, VelocityTracker};

/// Typed output of the scroll state machine, applied by the wheel in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Scrolling started (drag passed slop, or an animation began).
    Started,
    /// Raw scroll delta in px, positive when content moves down.
    Scrolled(f32),
    /// A segment finished; the wheel may start a justification scroll.
    Justify,
    /// Scrolling fully settled. Only emitted when a `Started` preceded it.
    Finished,
}

enum Segment {
    Fling(FlingSegment),
    Tween { distance: f32, duration_ms: i64 },
}

impl Segment {
    fn position(&self, elapsed_ms: i64, easing: Easing) -> f32 {
        match self {
            Segment::Fling(fling) => fling.position(elapsed_ms),
            Segment::Tween {
                distance,
                duration_ms,
            } => {
                let fraction = if *duration_ms > 0 {
                    (elapsed_ms as f32 / *duration_ms as f32).min(1.0)
                } else {
                    1.0
                };
                distance * easing.transform(fraction)
            }
        }
    }

    fn final_position(&self) -> f32 {
        match self {
            Segment::Fling(fling) => fling.position(fling.duration_ms),
            Segment::Tween { distance, .. } => *distance,
        }
    }

    fn is_finished(&self, elapsed_ms: i64) -> bool {
        match self {
            Segment::Fling(fling) => fling.is_finished(elapsed_ms),
            Segment::Tween { duration_ms, .. } => elapsed_ms >= *duration_ms,
        }
    }
}

enum Phase {
    Idle,
    Pressed { down_y: f32 },
    Dragging { last_y: f32 },
    Animating {
        segment: Segment,
        start_ms: Option<i64>,
        last_position: f32,
    },
    Settling,
}

/// Converts vertical touch motion and animation ticks into scroll events.
pub struct WheelScroller {
    phase: Phase,
    tracker: VelocityTracker,
    physics: FlingPhysics,
    easing: Easing,
    drag_slop: f32,
    min_scroll_delta: f32,
    min_fling_velocity: f32,
    max_fling_velocity: f32,
    default_duration_ms: i64,
    /// Edge flag behind `Started`/`Finished`; survives a catch (touch-down
    /// during an animation) so the eventual settle still emits `Finished`.
    scrolling: bool,
    events: SmallVec<[ScrollEvent; 4]>,
}

impl WheelScroller {
    pub fn new(config: &WheelConfig) -> Self {
        Self {
            phase: Phase::Idle,
            tracker: VelocityTracker::new(),
            physics: FlingPhysics::new(config.fling_friction, config.density),
            easing: config.easing,
            drag_slop: config.drag_slop,
            min_scroll_delta: config.min_scroll_delta,
            min_fling_velocity: config.min_fling_velocity,
            max_fling_velocity: config.max_fling_velocity,
            default_duration_ms: config.scroll_duration_ms,
            scrolling: false,
            events: SmallVec::new(),
        }
    }

    /// Replaces the interpolator used by fixed-duration segments.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Whether a drag or animation is currently in progress.
    pub fn is_scroll_in_progress(&self) -> bool {
        self.scrolling
    }

    /// Drains the events produced since the last call, in order.
    pub fn take_events(&mut self) -> SmallVec<[ScrollEvent; 4]> {
        std::mem::take(&mut self.events)
    }

    /// Feeds one touch phase. Only the vertical coordinate drives scrolling.
    pub fn on_touch(&mut self, phase: TouchPhase, y: f32, time_ms: i64) {
        match phase {
            TouchPhase::Down => {
                // Catch: discard any in-flight segment.
                self.tracker.reset();
                self.tracker.add_sample(time_ms, y);
                self.phase = Phase::Pressed { down_y: y };
            }
            TouchPhase::Move => {
                self.tracker.add_sample(time_ms, y);
                match self.phase {
                    Phase::Pressed { down_y } => {
                        let travel = y - down_y;
                        if travel.abs() > self.drag_slop {
                            self.start_scrolling();
                            self.events.push(ScrollEvent::Scrolled(travel));
                            self.phase = Phase::Dragging { last_y: y };
                        }
                    }
                    Phase::Dragging { last_y } => {
                        let delta = y - last_y;
                        if delta != 0.0 {
                            self.events.push(ScrollEvent::Scrolled(delta));
                        }
                        self.phase = Phase::Dragging { last_y: y };
                    }
                    _ => {}
                }
            }
            TouchPhase::Up => {
                self.tracker.add_sample(time_ms, y);
                match self.phase {
                    Phase::Dragging { .. } => {
                        let velocity = self.tracker.velocity_capped(self.max_fling_velocity);
                        if velocity.abs() >= self.min_fling_velocity {
                            log::trace!("fling released at {velocity} px/s");
                            // Negated: segment deltas are `last - current`.
                            self.phase = Phase::Animating {
                                segment: Segment::Fling(self.physics.fling(-velocity)),
                                start_ms: None,
                                last_position: 0.0,
                            };
                        } else {
                            self.finish_segment();
                        }
                    }
                    Phase::Pressed { .. } => self.finish_segment(),
                    _ => {}
                }
            }
            TouchPhase::Cancel => match self.phase {
                Phase::Dragging { .. } | Phase::Pressed { .. } => self.finish_segment(),
                _ => {}
            },
        }
    }

    /// Starts a fixed-duration scroll segment whose deltas sum to
    /// `-distance`. A zero duration selects the default scroll duration.
    pub fn animate(&mut self, distance: f32, duration_ms: i64) {
        self.start_scrolling();
        let duration_ms = if duration_ms != 0 {
            duration_ms
        } else {
            self.default_duration_ms
        };
        self.phase = Phase::Animating {
            segment: Segment::Tween {
                distance,
                duration_ms,
            },
            start_ms: None,
            last_position: 0.0,
        };
    }

    /// Force-finishes an in-flight animation; the next frames run the normal
    /// justify/finish sequence.
    pub fn stop(&mut self) {
        if matches!(self.phase, Phase::Animating { .. }) {
            self.finish_segment();
        }
    }

    /// Advances any in-flight animation to `now_ms`.
    pub fn on_frame(&mut self, now_ms: i64) {
        match &mut self.phase {
            Phase::Animating {
                segment,
                start_ms,
                last_position,
            } => {
                let start = *start_ms.get_or_insert(now_ms);
                let elapsed = now_ms - start;
                let mut position = segment.position(elapsed, self.easing);
                let mut done = segment.is_finished(elapsed);
                // Snap when within the minimum delta of the endpoint.
                let final_position = segment.final_position();
                if (position - final_position).abs() < self.min_scroll_delta {
                    position = final_position;
                    done = true;
                }
                let delta = *last_position - position;
                *last_position = position;
                if delta != 0.0 {
                    self.events.push(ScrollEvent::Scrolled(delta));
                }
                if done {
                    self.finish_segment();
                }
            }
            Phase::Settling => {
                if self.scrolling {
                    self.scrolling = false;
                    self.events.push(ScrollEvent::Finished);
                }
                self.phase = Phase::Idle;
            }
            _ => {}
        }
    }

    fn start_scrolling(&mut self) {
        if !self.scrolling {
            self.scrolling = true;
            self.events.push(ScrollEvent::Started);
        }
    }

    fn finish_segment(&mut self) {
        self.phase = Phase::Settling;
        self.events.push(ScrollEvent::Justify);
    }
}
