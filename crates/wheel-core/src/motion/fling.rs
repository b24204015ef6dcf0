//! Fling physics for inertial wheel scrolling.
//!
//! Port of the Android `Scroller` fling spline: a release velocity maps to a
//! total travel distance and duration, and position/velocity can be sampled
//! at any elapsed time. The wheel samples this once per animation tick.

use std::sync::LazyLock;

/// Tension curve inflection point.
const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

/// Number of samples in the spline lookup table.
const NB_SAMPLES: usize = 100;

/// Earth's gravity in SI units (m/s²).
const GRAVITY_EARTH: f32 = 9.80665;
/// Inches per meter, for density conversion.
const INCHES_PER_METER: f32 = 39.37;
/// Deceleration rate constant, (ln(0.78) / ln(0.9)).abs().
const DECELERATION_RATE: f32 = 2.358_201_6;

/// Solves `time_curve(t) = alpha` for `t` by bisection and returns the
/// distance curve evaluated at that parameter. Runs in f64 so the
/// convergence tolerance is always reachable.
fn solve_distance_at(alpha: f64, low: &mut f64) -> f32 {
    let mut high = 1.0f64;
    loop {
        let mid = *low + (high - *low) / 2.0;
        let coef = 3.0 * mid * (1.0 - mid);
        let value = coef * ((1.0 - mid) * P1 as f64 + mid * P2 as f64) + mid * mid * mid;
        if (value - alpha).abs() < 1e-5 {
            let distance =
                coef * ((1.0 - mid) * START_TENSION as f64 + mid) + mid * mid * mid;
            return distance as f32;
        }
        if value > alpha {
            high = mid;
        } else {
            *low = mid;
        }
    }
}

/// Precomputed distance-by-time table for the fling spline.
static SPLINE_POSITIONS: LazyLock<[f32; NB_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; NB_SAMPLES + 1];
    let mut low = 0.0f64;
    for (i, position) in positions.iter_mut().enumerate().take(NB_SAMPLES) {
        *position = solve_distance_at(i as f64 / NB_SAMPLES as f64, &mut low);
    }
    positions[NB_SAMPLES] = 1.0;
    positions
});

/// Distance and velocity coefficients at one point of the fling curve.
#[derive(Debug, Clone, Copy)]
pub struct SplineSample {
    /// Fraction of the total distance traveled, 0.0 to 1.0.
    pub distance_coefficient: f32,
    /// Instantaneous velocity coefficient at this point.
    pub velocity_coefficient: f32,
}

/// Samples the fling spline at a normalized time in `[0, 1]`.
pub fn sample_spline(time: f32) -> SplineSample {
    let t = time.clamp(0.0, 1.0);
    let index = (NB_SAMPLES as f32 * t) as usize;
    let (distance, velocity) = if index < NB_SAMPLES {
        let t_inf = index as f32 / NB_SAMPLES as f32;
        let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
        let d_inf = SPLINE_POSITIONS[index];
        let d_sup = SPLINE_POSITIONS[index + 1];
        let v = (d_sup - d_inf) / (t_sup - t_inf);
        (d_inf + (t - t_inf) * v, v)
    } else {
        (1.0, 0.0)
    };
    SplineSample {
        distance_coefficient: distance,
        velocity_coefficient: velocity,
    }
}

/// Computes natural fling travel from a release velocity.
///
/// Uses Android `Scroller` physics: friction and screen density determine a
/// physical deceleration, and the spline shapes the decay.
#[derive(Debug, Clone, Copy)]
pub struct FlingPhysics {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingPhysics {
    /// Default scroll friction, matches `ViewConfiguration.getScrollFriction`.
    pub const DEFAULT_FRICTION: f32 = 0.015;

    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64
            / (self.friction * self.physical_coefficient) as f64)
            .ln()
    }

    /// Total fling duration in milliseconds.
    pub fn duration_ms(&self, velocity: f32) -> i64 {
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = DECELERATION_RATE as f64 - 1.0;
        (1000.0 * (l / decel_minus_one).exp()) as i64
    }

    /// Total distance the fling travels, unsigned.
    pub fn distance(&self, velocity: f32) -> f32 {
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = DECELERATION_RATE as f64 - 1.0;
        self.friction
            * self.physical_coefficient
            * (DECELERATION_RATE as f64 / decel_minus_one * l).exp() as f32
    }

    /// Builds a sampleable fling segment for the given release velocity.
    pub fn fling(&self, velocity: f32) -> FlingSegment {
        FlingSegment {
            velocity,
            distance: self.distance(velocity),
            duration_ms: self.duration_ms(velocity),
        }
    }
}

/// One in-flight fling: signed sampling of position and velocity over time.
#[derive(Debug, Clone, Copy)]
pub struct FlingSegment {
    /// Release velocity in px/sec (signed).
    pub velocity: f32,
    /// Unsigned total travel distance in px.
    pub distance: f32,
    /// Total duration in milliseconds.
    pub duration_ms: i64,
}

impl FlingSegment {
    /// Signed position offset from the fling origin at `elapsed_ms`.
    pub fn position(&self, elapsed_ms: i64) -> f32 {
        let t = if self.duration_ms > 0 {
            elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        };
        self.distance * self.velocity.signum() * sample_spline(t).distance_coefficient
    }

    /// Signed instantaneous velocity in px/sec at `elapsed_ms`.
    pub fn velocity_at(&self, elapsed_ms: i64) -> f32 {
        let t = if self.duration_ms > 0 {
            elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        };
        sample_spline(t).velocity_coefficient * self.velocity.signum() * self.distance
            / self.duration_ms as f32
            * 1000.0
    }

    pub fn is_finished(&self, elapsed_ms: i64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}
