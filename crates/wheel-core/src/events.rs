//! Listener registration and fan-out.
//!
//! Three listener categories mirror the three concerns observers care about:
//! value changes (a closure per listener), scroll lifecycle, and the
//! click/swipe/affordance family. Notification is synchronous, in
//! registration order, and re-entrant-safe: the wheel snapshots the
//! registry before iterating, so a listener may register or remove
//! listeners, or mutate the wheel (e.g. call
//! [`set_current_item`](crate::Wheel::set_current_item)), from inside its
//! callback.
//!
//! Every callback receives `&mut Wheel` so observers can drive the wheel
//! directly, the way the stock swipe demo re-centers on a below-band tap.

use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::adapter::WheelAdapter;
use crate::wheel::Wheel;

/// Handle for removing a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Value-change callback: `(wheel, old_index, new_index)`.
pub type ChangedListener<A> = dyn Fn(&mut Wheel<A>, usize, usize);

/// Scroll lifecycle observer.
pub trait WheelScrollListener<A: WheelAdapter> {
    fn scrolling_started(&self, wheel: &mut Wheel<A>) {
        let _ = wheel;
    }

    fn scrolling_finished(&self, wheel: &mut Wheel<A>) {
        let _ = wheel;
    }
}

/// Tap, swipe, and affordance observer. All methods default to no-ops so
/// observers implement only what they care about.
pub trait WheelClickListener<A: WheelAdapter> {
    /// Tap on the selected row inside the selection band.
    fn item_tapped(&self, wheel: &mut Wheel<A>, index: usize) {
        let _ = (wheel, index);
    }

    /// The wheel settled with `index` selected. Deduplicated against the
    /// previously notified index.
    fn item_selected(&self, wheel: &mut Wheel<A>, index: usize) {
        let _ = (wheel, index);
    }

    /// Rightward swipe over the band. Return true to let the delete
    /// affordance reveal; it stays hidden unless some listener agrees.
    fn swipe_right(&self, wheel: &mut Wheel<A>, index: usize) -> bool {
        let _ = (wheel, index);
        false
    }

    /// Leftward swipe over the band. The return value is currently not
    /// consulted; the action affordance reveals regardless.
    fn swipe_left(&self, wheel: &mut Wheel<A>, index: usize) -> bool {
        let _ = (wheel, index);
        true
    }

    /// The revealed action affordance was tapped.
    fn action_activated(&self, wheel: &mut Wheel<A>, index: usize) {
        let _ = (wheel, index);
    }

    /// The revealed delete affordance was tapped.
    fn delete_activated(&self, wheel: &mut Wheel<A>, index: usize) {
        let _ = (wheel, index);
    }

    fn tapped_below_band(&self, wheel: &mut Wheel<A>, index: usize) {
        let _ = (wheel, index);
    }

    fn tapped_above_band(&self, wheel: &mut Wheel<A>, index: usize) {
        let _ = (wheel, index);
    }
}

/// Registries for all listener categories, keyed by id so removal does not
/// disturb registration order.
pub(crate) struct ListenerRegistry<A: WheelAdapter> {
    next_id: u64,
    pub(crate) changed: IndexMap<u64, Rc<ChangedListener<A>>>,
    pub(crate) scroll: IndexMap<u64, Rc<dyn WheelScrollListener<A>>>,
    pub(crate) click: IndexMap<u64, Rc<dyn WheelClickListener<A>>>,
}

impl<A: WheelAdapter> Default for ListenerRegistry<A> {
    fn default() -> Self {
        Self {
            next_id: 0,
            changed: IndexMap::new(),
            scroll: IndexMap::new(),
            click: IndexMap::new(),
        }
    }
}

impl<A: WheelAdapter> ListenerRegistry<A> {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn add_changed(&mut self, listener: Rc<ChangedListener<A>>) -> ListenerId {
        let id = self.next();
        self.changed.insert(id, listener);
        ListenerId(id)
    }

    pub(crate) fn add_scroll(&mut self, listener: Rc<dyn WheelScrollListener<A>>) -> ListenerId {
        let id = self.next();
        self.scroll.insert(id, listener);
        ListenerId(id)
    }

    pub(crate) fn add_click(&mut self, listener: Rc<dyn WheelClickListener<A>>) -> ListenerId {
        let id = self.next();
        self.click.insert(id, listener);
        ListenerId(id)
    }

    /// Removes from whichever registry holds the id.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.changed.shift_remove(&id.0).is_some()
            || self.scroll.shift_remove(&id.0).is_some()
            || self.click.shift_remove(&id.0).is_some()
    }

    pub(crate) fn changed_snapshot(&self) -> SmallVec<[Rc<ChangedListener<A>>; 4]> {
        self.changed.values().cloned().collect()
    }

    pub(crate) fn scroll_snapshot(&self) -> SmallVec<[Rc<dyn WheelScrollListener<A>>; 4]> {
        self.scroll.values().cloned().collect()
    }

    pub(crate) fn click_snapshot(&self) -> SmallVec<[Rc<dyn WheelClickListener<A>>; 4]> {
        self.click.values().cloned().collect()
    }
}
