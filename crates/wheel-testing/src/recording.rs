//! Recording listeners for asserting on notification traffic.

use std::cell::{Cell, RefCell};

use wheel_core::{Wheel, WheelAdapter, WheelClickListener, WheelScrollListener};

/// One observed notification, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Changed { old: usize, new: usize },
    Selected(usize),
    ScrollStarted,
    ScrollFinished,
    Tapped(usize),
    SwipeRight(usize),
    SwipeLeft(usize),
    DeleteActivated(usize),
    ActionActivated(usize),
    TappedBelow(usize),
    TappedAbove(usize),
}

/// Records every notification it receives; implements both the scroll and
/// the click listener traits, so one instance can watch everything.
///
/// The swipe-right vote defaults to `true` (allow the delete affordance);
/// flip it with [`set_swipe_right_response`](Self::set_swipe_right_response)
/// to test the veto path.
pub struct RecordingListener {
    events: RefCell<Vec<Event>>,
    swipe_right_response: Cell<bool>,
}

impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingListener {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            swipe_right_response: Cell::new(true),
        }
    }

    pub fn set_swipe_right_response(&self, allow: bool) {
        self.swipe_right_response.set(allow);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn contains(&self, event: Event) -> bool {
        self.events.borrow().contains(&event)
    }
}

impl<A: WheelAdapter> WheelScrollListener<A> for RecordingListener {
    fn scrolling_started(&self, _wheel: &mut Wheel<A>) {
        self.record(Event::ScrollStarted);
    }

    fn scrolling_finished(&self, _wheel: &mut Wheel<A>) {
        self.record(Event::ScrollFinished);
    }
}

impl<A: WheelAdapter> WheelClickListener<A> for RecordingListener {
    fn item_tapped(&self, _wheel: &mut Wheel<A>, index: usize) {
        self.record(Event::Tapped(index));
    }

    fn item_selected(&self, _wheel: &mut Wheel<A>, index: usize) {
        self.record(Event::Selected(index));
    }

    fn swipe_right(&self, _wheel: &mut Wheel<A>, index: usize) -> bool {
        self.record(Event::SwipeRight(index));
        self.swipe_right_response.get()
    }

    fn swipe_left(&self, _wheel: &mut Wheel<A>, index: usize) -> bool {
        self.record(Event::SwipeLeft(index));
        true
    }

    fn action_activated(&self, _wheel: &mut Wheel<A>, index: usize) {
        self.record(Event::ActionActivated(index));
    }

    fn delete_activated(&self, _wheel: &mut Wheel<A>, index: usize) {
        self.record(Event::DeleteActivated(index));
    }

    fn tapped_below_band(&self, _wheel: &mut Wheel<A>, index: usize) {
        self.record(Event::TappedBelow(index));
    }

    fn tapped_above_band(&self, _wheel: &mut Wheel<A>, index: usize) {
        self.record(Event::TappedAbove(index));
    }
}
