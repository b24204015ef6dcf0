//! Wheel configuration.

use crate::motion::Easing;

/// Default count of visible items.
pub const DEFAULT_VISIBLE_ITEMS: usize = 5;

/// Tuning knobs for scrolling, gestures, and affordance geometry.
///
/// The defaults reproduce the stock widget feel; hosts usually only touch
/// `visible_items` and `density`.
#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// Desired count of visible items.
    pub visible_items: usize,

    /// Minimum horizontal travel (px) for a gesture to classify as a swipe.
    pub swipe_threshold: f32,

    /// Residual offsets below this magnitude (px) are not worth justifying.
    pub min_scroll_delta: f32,

    /// Vertical travel (px) before a touch stream becomes a drag.
    pub drag_slop: f32,

    /// Duration of the justification / programmatic scroll tween.
    pub scroll_duration_ms: i64,

    /// Interpolator for fixed-duration scroll segments.
    pub easing: Easing,

    /// Release velocities below this (px/sec) settle without a fling.
    pub min_fling_velocity: f32,

    /// Release velocities are capped to this magnitude (px/sec).
    pub max_fling_velocity: f32,

    /// Fling deceleration friction.
    pub fling_friction: f32,

    /// Screen density factor for fling physics (1.0 = mdpi).
    pub density: f32,

    /// Selection band height as a multiple of the item extent.
    pub band_scale: f32,

    /// Width (px) of the delete affordance hit-region.
    pub delete_affordance_width: f32,

    /// Width (px) of the action affordance hit-region.
    pub action_affordance_width: f32,

    /// Height (px) of both affordance hit-regions.
    pub affordance_height: f32,

    /// Gap (px) between an affordance and the right edge.
    pub affordance_padding: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            visible_items: DEFAULT_VISIBLE_ITEMS,
            swipe_threshold: 40.0,
            min_scroll_delta: 1.0,
            drag_slop: 10.0,
            scroll_duration_ms: 400,
            easing: Easing::default(),
            min_fling_velocity: 1.0,
            max_fling_velocity: 8000.0,
            fling_friction: crate::motion::FlingPhysics::DEFAULT_FRICTION,
            density: 1.0,
            band_scale: 1.2,
            delete_affordance_width: 128.0,
            action_affordance_width: 65.0,
            affordance_height: 65.0,
            affordance_padding: 14.0,
        }
    }
}
