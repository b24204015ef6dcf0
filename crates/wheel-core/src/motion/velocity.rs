//! Velocity tracking for fling gesture support.
//!
//! Impulse-strategy 1D tracker over absolute touch positions: velocity is
//! derived from the kinetic energy imparted by the most recent samples.

/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute to the velocity.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Impulse-based 1D velocity tracker.
///
/// Feed it absolute positions with a monotonic millisecond time base during
/// a drag; ask for the velocity at release.
#[derive(Clone, Default)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position sample at the given time.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/second, 0.0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[current] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (previous.time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }
            previous = sample;

            positions[count] = sample.position;
            times[count] = -age;
            current = if current == 0 { HISTORY_SIZE - 1 } else { current - 1 };
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions, &times, count) * 1000.0
    }

    /// Velocity in units/second, clamped to `±max_velocity`.
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    /// Discards all tracked samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse strategy: accumulate the work each inter-sample velocity change
/// contributes, then convert the resulting kinetic energy back to velocity.
fn impulse_velocity(positions: &[f32; HISTORY_SIZE], times: &[f32; HISTORY_SIZE], count: usize) -> f32 {
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];
    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }
        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// E = ½mv² with m = 1.
#[inline]
fn energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
