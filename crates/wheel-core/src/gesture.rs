//! Touch classification and contextual affordance state.
//!
//! One touch stream feeds two interpretations: vertical scrolling (owned by
//! the scroll engine) and tap/swipe classification. The classifier arbitrates
//! with an explicit state machine: it evaluates a gesture only if no scroll
//! started during it, and while a scroll is in progress every touch-up
//! belongs to the scroll engine.
//!
//! Swipes over the selection band reveal one of two contextual affordances
//! on the selected row. Mutual exclusion is enforced at the reveal site: a
//! reveal always replaces whatever was shown before, and scroll-start
//! collapses any revealed affordance.

/// Touch phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// 2D point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, half-open on the right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Outcome of classifying a completed (down, up) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Finger travelled right over the band. Reveals the delete affordance,
    /// gated by the swipe-right listeners' vote.
    SwipeRight,
    /// Finger travelled left over the band. Reveals the action affordance.
    SwipeLeft,
    /// Tap on the selected row inside the band.
    TapSelect,
    /// Tap below the band.
    TapBelow,
    /// Tap above the band.
    TapAbove,
    /// Tap inside the revealed affordance's rectangle.
    AffordanceTap,
}

/// Geometry snapshot the classifier needs at touch-up.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext {
    pub item_extent: f32,
    /// Selection band rectangle, centered in the viewport.
    pub band: Rect,
    /// Hit-region of the currently revealed affordance, if any.
    pub affordance: Option<Rect>,
}

enum ClassifierState {
    Idle,
    /// Finger down, no scroll detected yet.
    Evaluating { down: Point },
    /// The scroll engine took over; taps and swipes are off until settle.
    Scrolling,
}

/// Tap/swipe arbiter over a shared touch stream.
pub struct GestureClassifier {
    state: ClassifierState,
    swipe_threshold: f32,
}

impl GestureClassifier {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            state: ClassifierState::Idle,
            swipe_threshold,
        }
    }

    pub fn on_down(&mut self, point: Point) {
        if !matches!(self.state, ClassifierState::Scrolling) {
            self.state = ClassifierState::Evaluating { down: point };
        }
    }

    /// The scroll engine passed its slop; this gesture is a scroll.
    pub fn scroll_started(&mut self) {
        self.state = ClassifierState::Scrolling;
    }

    /// The scroll fully settled; the next touch-down starts fresh.
    pub fn scroll_settled(&mut self) {
        if matches!(self.state, ClassifierState::Scrolling) {
            self.state = ClassifierState::Idle;
        }
    }

    pub fn on_cancel(&mut self) {
        if matches!(self.state, ClassifierState::Evaluating { .. }) {
            self.state = ClassifierState::Idle;
        }
    }

    /// Classifies at touch-up. Returns `None` while a scroll owns the stream
    /// or when the motion matches no gesture.
    pub fn on_up(&mut self, up: Point, ctx: &ClassifyContext) -> Option<Gesture> {
        let down = match self.state {
            ClassifierState::Evaluating { down } => down,
            // Touch-up during or after a scroll is the engine's business.
            ClassifierState::Scrolling => return None,
            ClassifierState::Idle => return None,
        };
        self.state = ClassifierState::Idle;
        classify(down, up, self.swipe_threshold, ctx)
    }
}

fn classify(down: Point, up: Point, swipe_threshold: f32, ctx: &ClassifyContext) -> Option<Gesture> {
    if let Some(rect) = ctx.affordance {
        if rect.contains(up) {
            return Some(Gesture::AffordanceTap);
        }
    }

    let delta_x = down.x - up.x;
    let delta_y = down.y - up.y;
    if delta_x.abs() > swipe_threshold
        && delta_y.abs() < ctx.item_extent
        && ctx.band.contains(down)
    {
        return Some(if delta_x < 0.0 {
            Gesture::SwipeRight
        } else {
            Gesture::SwipeLeft
        });
    }

    let items = items_delta(up.y - ctx.band.center_y(), ctx.item_extent);
    let in_band = ctx.band.contains(down);
    match items {
        0 if in_band => Some(Gesture::TapSelect),
        d if d > 0 && !in_band => Some(Gesture::TapBelow),
        d if d < 0 && !in_band => Some(Gesture::TapAbove),
        _ => None,
    }
}

/// Number of whole items between the tap and the band center, rounded away
/// from zero with a half-item bias.
fn items_delta(distance: f32, item_extent: f32) -> i32 {
    if item_extent <= 0.0 {
        return 0;
    }
    let biased = distance + distance.signum() * item_extent / 2.0;
    (biased / item_extent).trunc() as i32
}

/// The two contextual actions a swipe can reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Delete,
    Action,
}

/// Visibility and enablement of the contextual affordances.
///
/// At most one affordance is revealed at a time; `reveal` replaces any
/// previous one, so both-revealed is unrepresentable.
#[derive(Debug, Default)]
pub struct AffordanceState {
    revealed: Option<Affordance>,
    delete_disabled: bool,
    action_disabled: bool,
}

impl AffordanceState {
    pub fn revealed(&self) -> Option<Affordance> {
        self.revealed
    }

    /// Reveals `kind` if it is enabled, hiding the other one either way.
    pub fn reveal(&mut self, kind: Affordance) {
        let disabled = match kind {
            Affordance::Delete => self.delete_disabled,
            Affordance::Action => self.action_disabled,
        };
        self.revealed = if disabled { None } else { Some(kind) };
    }

    pub fn collapse(&mut self) {
        self.revealed = None;
    }

    pub fn set_delete_enabled(&mut self, enabled: bool) {
        self.delete_disabled = !enabled;
        if !enabled && self.revealed == Some(Affordance::Delete) {
            self.revealed = None;
        }
    }

    pub fn set_action_enabled(&mut self, enabled: bool) {
        self.action_disabled = !enabled;
        if !enabled && self.revealed == Some(Affordance::Action) {
            self.revealed = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ClassifyContext {
        ClassifyContext {
            item_extent: 50.0,
            // Band centered at y=150 in a 300px viewport.
            band: Rect::new(0.0, 120.0, 320.0, 180.0),
            affordance: None,
        }
    }

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(40.0)
    }

    #[test]
    fn rightward_swipe_in_band_classifies_swipe_right() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 150.0));
        let gesture = c.on_up(Point::new(160.0, 145.0), &ctx());
        assert_eq!(gesture, Some(Gesture::SwipeRight));
    }

    #[test]
    fn leftward_swipe_in_band_classifies_swipe_left() {
        let mut c = classifier();
        c.on_down(Point::new(160.0, 150.0));
        let gesture = c.on_up(Point::new(100.0, 150.0), &ctx());
        assert_eq!(gesture, Some(Gesture::SwipeLeft));
    }

    #[test]
    fn swipe_outside_band_is_not_a_swipe() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 50.0));
        let gesture = c.on_up(Point::new(160.0, 50.0), &ctx());
        assert_ne!(gesture, Some(Gesture::SwipeRight));
    }

    #[test]
    fn tall_diagonal_is_not_a_swipe() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 150.0));
        // delta_y of 60 exceeds the item extent.
        let gesture = c.on_up(Point::new(160.0, 90.0), &ctx());
        assert_ne!(gesture, Some(Gesture::SwipeRight));
    }

    #[test]
    fn tap_in_band_selects() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 150.0));
        let gesture = c.on_up(Point::new(102.0, 152.0), &ctx());
        assert_eq!(gesture, Some(Gesture::TapSelect));
    }

    #[test]
    fn tap_below_band() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 200.0));
        let gesture = c.on_up(Point::new(100.0, 200.0), &ctx());
        assert_eq!(gesture, Some(Gesture::TapBelow));
    }

    #[test]
    fn tap_above_band() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 95.0));
        let gesture = c.on_up(Point::new(100.0, 95.0), &ctx());
        assert_eq!(gesture, Some(Gesture::TapAbove));
    }

    #[test]
    fn scroll_takeover_suppresses_classification() {
        let mut c = classifier();
        c.on_down(Point::new(100.0, 150.0));
        c.scroll_started();
        assert_eq!(c.on_up(Point::new(160.0, 150.0), &ctx()), None);
        // Still owned by the scroll until it settles.
        c.on_down(Point::new(100.0, 150.0));
        assert_eq!(c.on_up(Point::new(102.0, 150.0), &ctx()), None);
        c.scroll_settled();
        c.on_down(Point::new(100.0, 150.0));
        assert_eq!(c.on_up(Point::new(102.0, 150.0), &ctx()), Some(Gesture::TapSelect));
    }

    #[test]
    fn tap_on_revealed_affordance_wins() {
        let mut c = classifier();
        let mut context = ctx();
        context.affordance = Some(Rect::new(200.0, 120.0, 300.0, 180.0));
        c.on_down(Point::new(250.0, 150.0));
        let gesture = c.on_up(Point::new(250.0, 150.0), &context);
        assert_eq!(gesture, Some(Gesture::AffordanceTap));
    }

    #[test]
    fn items_delta_uses_half_item_bias() {
        assert_eq!(items_delta(0.0, 50.0), 0);
        assert_eq!(items_delta(24.0, 50.0), 0);
        assert_eq!(items_delta(26.0, 50.0), 1);
        assert_eq!(items_delta(-26.0, 50.0), -1);
        assert_eq!(items_delta(80.0, 50.0), 2);
    }

    #[test]
    fn reveal_replaces_and_collapse_hides() {
        let mut state = AffordanceState::default();
        state.reveal(Affordance::Delete);
        assert_eq!(state.revealed(), Some(Affordance::Delete));
        state.reveal(Affordance::Action);
        assert_eq!(state.revealed(), Some(Affordance::Action));
        state.collapse();
        assert_eq!(state.revealed(), None);
    }

    #[test]
    fn disabled_affordance_never_reveals() {
        let mut state = AffordanceState::default();
        state.set_delete_enabled(false);
        state.reveal(Affordance::Delete);
        assert_eq!(state.revealed(), None);
        state.reveal(Affordance::Action);
        state.set_action_enabled(false);
        assert_eq!(state.revealed(), None);
    }
}
