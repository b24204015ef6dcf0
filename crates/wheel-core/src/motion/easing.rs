//! Easing curves for fixed-duration scroll segments (justification and
//! programmatic item scrolls).

/// Interpolator applied to the justification / programmatic scroll tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease in and out; the default scroll interpolator.
    #[default]
    EaseInOut,
    /// Fast out, slow in (material design standard curve).
    FastOutSlowIn,
}

impl Easing {
    /// Applies the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier evaluated at an x fraction via Newton-Raphson with a
/// bisection fallback.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }
    fn derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;
        while t1 - t0 > 1e-6 {
            t = (t0 + t1) / 2.0;
            if sample(ax, bx, cx, t) < fraction {
                t0 = t;
            } else {
                t1 = t;
            }
        }
    }

    sample(ay, by, cy, t)
}
