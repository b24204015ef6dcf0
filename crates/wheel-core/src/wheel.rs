//! The wheel facade: scroll engine, selection state, and event fan-out.
//!
//! `Wheel` ties the pieces together. Touch input is forwarded to both the
//! scroll state machine and the gesture classifier; the scroller's typed
//! events drive the offset/index updates; the classifier's verdict at
//! touch-up drives taps, swipes, and the contextual affordances. The host
//! calls [`Wheel::on_frame`] per animation tick and
//! [`Wheel::rebuild_if_needed`] per render pass.
//!
//! Scroll positions are split into a whole part (`current_item`) and a
//! fractional part (`scroll_offset`, in px). Every applied delta is folded
//! back so the offset stays within one item extent of the selection point;
//! index crossings are committed immediately and fire value-changed.

use std::rc::Rc;

use crate::adapter::WheelAdapter;
use crate::config::WheelConfig;
use crate::events::{ListenerId, ListenerRegistry, WheelClickListener, WheelScrollListener};
use crate::gesture::{
    Affordance, AffordanceState, ClassifyContext, Gesture, GestureClassifier, Point, Rect,
    TouchPhase,
};
use crate::scroller::{ScrollEvent, WheelScroller};
use crate::window::{ItemsRange, RowRole, RowWindow};

/// A vertically scrolling, optionally cyclic item picker.
pub struct Wheel<A: WheelAdapter> {
    adapter: A,
    config: WheelConfig,
    cyclic: bool,

    current_item: usize,
    /// Fractional scroll position in px, positive when content moved down.
    scroll_offset: f32,
    /// Explicit row extent; 0 means derive from the viewport.
    item_extent: f32,
    viewport_width: f32,
    viewport_height: f32,

    scroller: WheelScroller,
    classifier: GestureClassifier,
    affordances: AffordanceState,
    window: RowWindow<A::Row>,
    window_dirty: bool,

    is_scrolling: bool,
    last_selected: Option<usize>,
    listeners: ListenerRegistry<A>,
}

impl<A: WheelAdapter> Wheel<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_config(adapter, WheelConfig::default())
    }

    pub fn with_config(adapter: A, config: WheelConfig) -> Self {
        Self {
            scroller: WheelScroller::new(&config),
            classifier: GestureClassifier::new(config.swipe_threshold),
            affordances: AffordanceState::default(),
            window: RowWindow::new(),
            window_dirty: true,
            adapter,
            config,
            cyclic: false,
            current_item: 0,
            scroll_offset: 0.0,
            item_extent: 0.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            is_scrolling: false,
            last_selected: None,
            listeners: ListenerRegistry::default(),
        }
    }

    // ---- host-facing state ------------------------------------------------

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable adapter access; call [`content_changed`](Self::content_changed)
    /// or [`content_invalidated`](Self::content_invalidated) afterwards.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn current_item(&self) -> usize {
        self.current_item
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn set_cyclic(&mut self, cyclic: bool) {
        self.cyclic = cyclic;
        self.invalidate(false);
    }

    pub fn visible_items(&self) -> usize {
        self.config.visible_items
    }

    pub fn set_visible_items(&mut self, count: usize) {
        self.config.visible_items = count.max(1);
        self.window_dirty = true;
    }

    pub fn is_scroll_in_progress(&self) -> bool {
        self.is_scrolling
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if (width, height) != (self.viewport_width, self.viewport_height) {
            self.viewport_width = width;
            self.viewport_height = height;
            self.window_dirty = true;
        }
    }

    pub fn set_item_extent(&mut self, extent: f32) {
        if extent != self.item_extent {
            self.item_extent = extent;
            self.window_dirty = true;
        }
    }

    /// Row extent in px: the measured extent, or an even share of the
    /// viewport when none was supplied.
    pub fn item_extent(&self) -> f32 {
        if self.item_extent > 0.0 {
            self.item_extent
        } else if self.viewport_height > 0.0 {
            self.viewport_height / self.config.visible_items as f32
        } else {
            0.0
        }
    }

    // ---- listeners --------------------------------------------------------

    pub fn add_changed_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&mut Wheel<A>, usize, usize) + 'static,
    {
        self.listeners.add_changed(Rc::new(listener))
    }

    pub fn add_scroll_listener(&mut self, listener: Rc<dyn WheelScrollListener<A>>) -> ListenerId {
        self.listeners.add_scroll(listener)
    }

    pub fn add_click_listener(&mut self, listener: Rc<dyn WheelClickListener<A>>) -> ListenerId {
        self.listeners.add_click(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // ---- selection --------------------------------------------------------

    /// Selects `index`, optionally animating through the scroll machinery.
    ///
    /// Empty source: no-op. Non-cyclic out-of-range: ignored, logged at warn
    /// level. Cyclic: any integer normalizes modulo the count; animation
    /// takes the shorter wrap direction. An unanimated set discards any
    /// in-flight animation and settles at the new index.
    pub fn set_current_item(&mut self, index: i64, animated: bool) {
        let item_count = self.adapter.item_count() as i64;
        if item_count == 0 {
            return;
        }
        let index = if index < 0 || index >= item_count {
            if self.cyclic {
                index.rem_euclid(item_count)
            } else {
                log::warn!("ignoring out-of-range item {index} of {item_count}");
                return;
            }
        } else {
            index
        };
        if index as usize == self.current_item {
            return;
        }

        if animated {
            let current = self.current_item as i64;
            let mut items = index - current;
            if self.cyclic {
                let wrap = item_count + index.min(current) - index.max(current);
                if wrap < items.abs() {
                    items = if items < 0 { wrap } else { -wrap };
                }
            }
            self.scroll_items(items, 0);
        } else {
            // Discard any in-flight segment; the queued settle then
            // finishes at the new index.
            self.scroller.stop();
            self.scroll_offset = 0.0;
            let old = self.current_item;
            self.current_item = index as usize;
            self.window_dirty = true;
            self.notify_changed(old, index as usize);
            self.process_scroll_events();
        }
        if !self.is_scrolling {
            self.notify_selected(self.current_item);
        }
    }

    /// Scrolls by a signed number of items through the animated path.
    pub fn scroll_items(&mut self, items: i64, duration_ms: i64) {
        let extent = self.item_extent();
        if self.adapter.item_count() == 0 || extent <= 0.0 {
            return;
        }
        let distance = items as f32 * extent - self.scroll_offset;
        self.scroller.animate(distance, duration_ms);
        self.process_scroll_events();
    }

    /// Force-finishes any in-flight scroll; it settles through the normal
    /// justify/finish sequence.
    pub fn stop_scrolling(&mut self) {
        self.scroller.stop();
        self.process_scroll_events();
    }

    /// Resets the scroll offset and schedules a rebuild. Materialized rows
    /// are recycled for rebinding; `clear_caches` discards them and the
    /// pools outright.
    pub fn invalidate(&mut self, clear_caches: bool) {
        if clear_caches {
            self.window.clear();
        } else {
            self.window.recycle_all();
        }
        self.scroll_offset = 0.0;
        self.window_dirty = true;
    }

    /// The backing data changed in place; rows are rebound on the next
    /// render pass.
    pub fn content_changed(&mut self) {
        self.invalidate(false);
    }

    /// The backing data was replaced; cached rows must not be rebound.
    pub fn content_invalidated(&mut self) {
        self.invalidate(true);
    }

    // ---- affordances ------------------------------------------------------

    pub fn revealed_affordance(&self) -> Option<Affordance> {
        self.affordances.revealed()
    }

    pub fn set_delete_enabled(&mut self, enabled: bool) {
        self.affordances.set_delete_enabled(enabled);
    }

    pub fn set_action_enabled(&mut self, enabled: bool) {
        self.affordances.set_action_enabled(enabled);
    }

    /// Selection band rectangle, centered in the viewport.
    pub fn selection_band(&self) -> Rect {
        let center = self.viewport_height / 2.0;
        let half = self.item_extent() * self.config.band_scale / 2.0;
        Rect::new(0.0, center - half, self.viewport_width, center + half)
    }

    /// Hit-region for `kind`, right-aligned within the selection band.
    pub fn affordance_rect(&self, kind: Affordance) -> Rect {
        let width = match kind {
            Affordance::Delete => self.config.delete_affordance_width,
            Affordance::Action => self.config.action_affordance_width,
        };
        let right = self.viewport_width - self.config.affordance_padding;
        let center = self.viewport_height / 2.0;
        let half = self.config.affordance_height / 2.0;
        Rect::new(right - width, center - half, right, center + half)
    }

    fn revealed_affordance_rect(&self) -> Option<Rect> {
        self.affordances.revealed().map(|kind| self.affordance_rect(kind))
    }

    // ---- input ------------------------------------------------------------

    /// Feeds one touch event with a monotonic millisecond time base.
    pub fn on_touch(&mut self, phase: TouchPhase, x: f32, y: f32, time_ms: i64) {
        let point = Point::new(x, y);
        match phase {
            TouchPhase::Down => {
                self.classifier.on_down(point);
                self.scroller.on_touch(phase, y, time_ms);
                self.process_scroll_events();
            }
            TouchPhase::Move => {
                self.scroller.on_touch(phase, y, time_ms);
                self.process_scroll_events();
            }
            TouchPhase::Up => {
                self.scroller.on_touch(phase, y, time_ms);
                self.process_scroll_events();
                let ctx = ClassifyContext {
                    item_extent: self.item_extent(),
                    band: self.selection_band(),
                    affordance: self.revealed_affordance_rect(),
                };
                if let Some(gesture) = self.classifier.on_up(point, &ctx) {
                    self.handle_gesture(gesture);
                }
            }
            TouchPhase::Cancel => {
                self.classifier.on_cancel();
                self.scroller.on_touch(phase, y, time_ms);
                self.process_scroll_events();
            }
        }
    }

    /// Advances in-flight animation; call once per animation frame.
    pub fn on_frame(&mut self, now_ms: i64) {
        self.scroller.on_frame(now_ms);
        self.process_scroll_events();
    }

    // ---- rendering --------------------------------------------------------

    /// Reconciles the row window when anything marked it dirty. Returns true
    /// if the window contents changed.
    pub fn rebuild_if_needed(&mut self) -> bool {
        if !self.window_dirty {
            return false;
        }
        self.window_dirty = false;
        let extent = self.item_extent();
        if extent <= 0.0 || self.adapter.item_count() == 0 {
            self.window.clear();
            return true;
        }
        let viewport = if self.viewport_height > 0.0 {
            self.viewport_height
        } else {
            extent * self.config.visible_items as f32
        };
        let range = ItemsRange::around(
            self.current_item as i64,
            viewport,
            extent,
            self.scroll_offset,
        );
        self.window
            .rebuild(range, &self.adapter, self.adapter.item_count(), self.cyclic)
    }

    /// Display index of the first materialized row.
    pub fn first_index(&self) -> Option<i64> {
        self.window.range().map(|r| r.first())
    }

    /// Materialized rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = (i64, RowRole, &A::Row)> {
        self.window.rows()
    }

    // ---- scroll engine ----------------------------------------------------

    fn process_scroll_events(&mut self) {
        loop {
            let events = self.scroller.take_events();
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle_scroll_event(event);
            }
        }
    }

    fn handle_scroll_event(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::Started => {
                self.is_scrolling = true;
                self.classifier.scroll_started();
                self.affordances.collapse();
                self.notify_scroll_started();
            }
            ScrollEvent::Scrolled(delta) => {
                self.apply_scroll(delta);
                let height = self.viewport_height;
                if height > 0.0 && self.scroll_offset.abs() > height {
                    log::debug!(
                        "runaway scroll offset {} clamped to viewport {height}",
                        self.scroll_offset
                    );
                    self.scroll_offset = self.scroll_offset.clamp(-height, height);
                    self.scroller.stop();
                }
            }
            ScrollEvent::Justify => {
                if self.scroll_offset.abs() > self.config.min_scroll_delta {
                    self.scroller.animate(self.scroll_offset, 0);
                }
            }
            ScrollEvent::Finished => {
                if self.is_scrolling {
                    self.is_scrolling = false;
                    self.classifier.scroll_settled();
                    self.notify_scroll_finished();
                    self.notify_selected(self.current_item);
                }
                self.scroll_offset = 0.0;
                self.window_dirty = true;
            }
        }
    }

    /// Folds a raw scroll delta into the offset, committing any whole-item
    /// crossings.
    fn apply_scroll(&mut self, delta: f32) {
        let item_count = self.adapter.item_count() as i64;
        let extent = self.item_extent();
        if item_count == 0 || extent <= 0.0 {
            return;
        }
        self.scroll_offset += delta;

        let mut count = (self.scroll_offset / extent).trunc() as i64;
        let mut pos = self.current_item as i64 - count;
        // `%` keeps the dividend's sign; a residual within half an item is
        // not a crossing, which keeps the snap point from oscillating.
        let mut residual = self.scroll_offset % extent;
        if residual.abs() <= extent / 2.0 {
            residual = 0.0;
        }

        if self.cyclic {
            if residual > 0.0 {
                pos -= 1;
                count += 1;
            } else if residual < 0.0 {
                pos += 1;
                count -= 1;
            }
            pos = pos.rem_euclid(item_count);
        } else if pos < 0 {
            count = self.current_item as i64;
            pos = 0;
        } else if pos >= item_count {
            count = self.current_item as i64 - item_count + 1;
            pos = item_count - 1;
        } else if pos > 0 && residual > 0.0 {
            pos -= 1;
            count += 1;
        } else if pos < item_count - 1 && residual < 0.0 {
            pos += 1;
            count -= 1;
        }

        if pos as usize != self.current_item {
            let old = self.current_item;
            self.current_item = pos as usize;
            self.notify_changed(old, pos as usize);
            if !self.is_scrolling {
                self.notify_selected(pos as usize);
            }
        }
        self.scroll_offset -= count as f32 * extent;
        self.window_dirty = true;
    }

    // ---- gestures ---------------------------------------------------------

    fn handle_gesture(&mut self, gesture: Gesture) {
        if self.adapter.item_count() == 0 {
            return;
        }
        log::trace!("gesture {gesture:?} at item {}", self.current_item);
        let index = self.current_item;
        match gesture {
            Gesture::SwipeRight => {
                // A rightward swipe hides whatever was revealed even when
                // the vote below vetoes the delete affordance.
                self.affordances.collapse();
                let mut reveal = false;
                for listener in self.listeners.click_snapshot() {
                    reveal |= listener.swipe_right(self, index);
                }
                if reveal {
                    self.affordances.reveal(Affordance::Delete);
                }
            }
            Gesture::SwipeLeft => {
                // The vote is collected but not consulted on this side.
                for listener in self.listeners.click_snapshot() {
                    let _ = listener.swipe_left(self, index);
                }
                self.affordances.reveal(Affordance::Action);
            }
            Gesture::TapSelect => {
                for listener in self.listeners.click_snapshot() {
                    listener.item_tapped(self, index);
                }
            }
            Gesture::TapBelow => {
                for listener in self.listeners.click_snapshot() {
                    listener.tapped_below_band(self, index);
                }
            }
            Gesture::TapAbove => {
                for listener in self.listeners.click_snapshot() {
                    listener.tapped_above_band(self, index);
                }
            }
            Gesture::AffordanceTap => {
                let revealed = self.affordances.revealed();
                self.affordances.collapse();
                match revealed {
                    Some(Affordance::Delete) => {
                        for listener in self.listeners.click_snapshot() {
                            listener.delete_activated(self, index);
                        }
                    }
                    Some(Affordance::Action) => {
                        for listener in self.listeners.click_snapshot() {
                            listener.action_activated(self, index);
                        }
                    }
                    None => {}
                }
            }
        }
    }

    // ---- notification fan-out ---------------------------------------------

    fn notify_changed(&mut self, old: usize, new: usize) {
        for listener in self.listeners.changed_snapshot() {
            listener(self, old, new);
        }
    }

    fn notify_selected(&mut self, index: usize) {
        if self.last_selected == Some(index) {
            return;
        }
        self.last_selected = Some(index);
        for listener in self.listeners.click_snapshot() {
            listener.item_selected(self, index);
        }
    }

    fn notify_scroll_started(&mut self) {
        for listener in self.listeners.scroll_snapshot() {
            listener.scrolling_started(self);
        }
    }

    fn notify_scroll_finished(&mut self) {
        for listener in self.listeners.scroll_snapshot() {
            listener.scrolling_finished(self);
        }
    }
}
