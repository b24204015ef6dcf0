//! Visible-row window and row recycling.
//!
//! The window owns the materialized rows for the currently visible index
//! range. On every rebuild it reconciles the previous row set against the new
//! range: rows that stay visible are kept as-is, rows that scrolled out are
//! recycled into role-keyed pools, and newly visible indices are bound
//! through the adapter, preferring a pooled row of the same role.
//!
//! Display indices are kept unnormalized (they can be negative or beyond the
//! item count); a cyclic wheel normalizes them modulo the item count only
//! when talking to the adapter, so the window itself never wraps.

use smallvec::SmallVec;

use crate::adapter::WheelAdapter;

/// Contiguous range of display indices covering the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsRange {
    first: i64,
    count: usize,
}

impl ItemsRange {
    pub fn new(first: i64, count: usize) -> Self {
        Self { first, count }
    }

    /// Range covering a viewport centered on `current`: grown symmetrically
    /// until the rows span the viewport, then widened toward the direction a
    /// scroll offset exposes. A fast drag can carry an offset of several
    /// item extents between rebuilds; the extension keeps the window gapless
    /// by adding one row per crossed extent plus one for the fraction.
    pub fn around(current: i64, viewport_extent: f32, item_extent: f32, offset: f32) -> Self {
        if item_extent <= 0.0 {
            return Self::new(current, 1);
        }
        let mut first = current;
        let mut count = 1usize;
        while (count as f32) * item_extent < viewport_extent {
            first -= 1;
            count += 2;
        }
        if offset != 0.0 {
            let extra = 1 + (offset.abs() / item_extent) as usize;
            if offset > 0.0 {
                // Content shifted down: earlier items peek in at the top.
                first -= extra as i64;
            }
            count += extra;
        }
        Self { first, count }
    }

    pub fn first(&self) -> i64 {
        self.first
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last(&self) -> i64 {
        self.first + self.count as i64 - 1
    }

    pub fn contains(&self, index: i64) -> bool {
        index >= self.first && index <= self.last()
    }
}

/// Pool role of a recycled row. Item rows and placeholder rows never mix:
/// a recycled item row is only offered back for item binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Item,
    Placeholder,
}

struct RowEntry<R> {
    index: i64,
    role: RowRole,
    row: R,
}

/// Role-keyed recycle pools.
#[derive(Default)]
struct RowPool<R> {
    items: SmallVec<[R; 8]>,
    placeholders: SmallVec<[R; 2]>,
}

impl<R> RowPool<R> {
    fn recycle(&mut self, role: RowRole, row: R) {
        match role {
            RowRole::Item => self.items.push(row),
            RowRole::Placeholder => self.placeholders.push(row),
        }
    }

    fn take(&mut self, role: RowRole) -> Option<R> {
        match role {
            RowRole::Item => self.items.pop(),
            RowRole::Placeholder => self.placeholders.pop(),
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.placeholders.clear();
    }
}

/// Materialized rows for the visible range, ordered by display index.
pub struct RowWindow<R> {
    rows: Vec<RowEntry<R>>,
    pool: RowPool<R>,
    range: Option<ItemsRange>,
}

impl<R> Default for RowWindow<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RowWindow<R> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            pool: RowPool {
                items: SmallVec::new(),
                placeholders: SmallVec::new(),
            },
            range: None,
        }
    }

    /// Range covered by the last rebuild.
    pub fn range(&self) -> Option<ItemsRange> {
        self.range
    }

    /// Rows in display order as `(display_index, role, row)`.
    pub fn rows(&self) -> impl Iterator<Item = (i64, RowRole, &R)> {
        self.rows.iter().map(|e| (e.index, e.role, &e.row))
    }

    /// The row bound at `display_index`, if visible.
    pub fn row_at(&self, display_index: i64) -> Option<&R> {
        self.rows
            .iter()
            .find(|e| e.index == display_index)
            .map(|e| &e.row)
    }

    /// Recycles every row and discards the pools. Used when the adapter data
    /// was invalidated and cached rows must not be rebound.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.pool.clear();
        self.range = None;
    }

    /// Recycles every row into the pools so the next rebuild rebinds them.
    /// Used when the adapter data changed in place.
    pub fn recycle_all(&mut self) {
        for entry in self.rows.drain(..) {
            self.pool.recycle(entry.role, entry.row);
        }
        self.range = None;
    }

    /// Reconciles the window to `range`, binding rows through `adapter`.
    ///
    /// `item_count` is the adapter count snapshot the caller already took.
    /// Returns true if any row was created or rebound.
    pub fn rebuild<A>(
        &mut self,
        range: ItemsRange,
        adapter: &A,
        item_count: usize,
        cyclic: bool,
    ) -> bool
    where
        A: WheelAdapter<Row = R>,
    {
        let unchanged = self.range == Some(range)
            && self.rows.len() == range.count()
            && self
                .rows
                .iter()
                .all(|e| e.role == role_for(e.index, item_count, cyclic));
        if unchanged {
            return false;
        }

        // Recycle rows that left the range or whose role no longer matches
        // (an item count change can turn an item slot into a placeholder).
        let mut kept: Vec<RowEntry<R>> = Vec::with_capacity(range.count());
        for entry in self.rows.drain(..) {
            if range.contains(entry.index)
                && entry.role == role_for(entry.index, item_count, cyclic)
            {
                kept.push(entry);
            } else {
                self.pool.recycle(entry.role, entry.row);
            }
        }

        let mut changed = false;
        let mut next = Vec::with_capacity(range.count());
        for index in range.first()..=range.last() {
            if let Some(pos) = kept.iter().position(|e| e.index == index) {
                next.push(kept.swap_remove(pos));
                continue;
            }
            let role = role_for(index, item_count, cyclic);
            let reusable = self.pool.take(role);
            let row = match role {
                RowRole::Item => {
                    let bound = normalize_index(index, item_count)
                        .unwrap_or_default();
                    adapter.row(bound, reusable)
                }
                RowRole::Placeholder => adapter.placeholder_row(reusable),
            };
            next.push(RowEntry { index, role, row });
            changed = true;
        }

        // Anything left in `kept` fell out during reconciliation.
        for entry in kept {
            self.pool.recycle(entry.role, entry.row);
        }

        self.rows = next;
        self.range = Some(range);
        changed
    }
}

/// Role a display index binds as, given the current item count.
fn role_for(index: i64, item_count: usize, cyclic: bool) -> RowRole {
    if normalize_index_with(index, item_count, cyclic).is_some() {
        RowRole::Item
    } else {
        RowRole::Placeholder
    }
}

/// Maps a display index to an adapter index, wrapping when cyclic.
pub fn normalize_index_with(index: i64, item_count: usize, cyclic: bool) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    if cyclic {
        normalize_index(index, item_count)
    } else if index >= 0 && (index as usize) < item_count {
        Some(index as usize)
    } else {
        None
    }
}

/// Euclidean wrap of a display index into `[0, item_count)`.
fn normalize_index(index: i64, item_count: usize) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    Some(index.rem_euclid(item_count as i64) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingAdapter {
        count: usize,
        builds: Cell<usize>,
        rebinds: Cell<usize>,
    }

    impl CountingAdapter {
        fn new(count: usize) -> Self {
            Self {
                count,
                builds: Cell::new(0),
                rebinds: Cell::new(0),
            }
        }
    }

    impl WheelAdapter for CountingAdapter {
        type Row = String;

        fn item_count(&self) -> usize {
            self.count
        }

        fn row(&self, index: usize, reusable: Option<String>) -> String {
            match reusable {
                Some(_) => self.rebinds.set(self.rebinds.get() + 1),
                None => self.builds.set(self.builds.get() + 1),
            }
            format!("item {index}")
        }

        fn placeholder_row(&self, reusable: Option<String>) -> String {
            if reusable.is_none() {
                self.builds.set(self.builds.get() + 1);
            }
            String::new()
        }
    }

    #[test]
    fn range_around_covers_viewport_symmetrically() {
        // 250px viewport, 50px rows: 5 rows centered on the current item.
        let range = ItemsRange::around(4, 250.0, 50.0, 0.0);
        assert_eq!(range.first(), 2);
        assert_eq!(range.count(), 5);
        assert_eq!(range.last(), 6);
    }

    #[test]
    fn positive_offset_extends_upward() {
        let range = ItemsRange::around(4, 250.0, 50.0, 12.0);
        assert_eq!(range.first(), 1);
        assert_eq!(range.count(), 6);
    }

    #[test]
    fn negative_offset_extends_downward() {
        let range = ItemsRange::around(4, 250.0, 50.0, -12.0);
        assert_eq!(range.first(), 2);
        assert_eq!(range.count(), 6);
        assert_eq!(range.last(), 7);
    }

    #[test]
    fn fast_drag_offset_extends_one_row_per_crossed_extent() {
        let range = ItemsRange::around(4, 250.0, 50.0, 120.0);
        assert_eq!(range.first(), -1);
        assert_eq!(range.count(), 8);
    }

    #[test]
    fn rebuild_binds_whole_range() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        let changed = window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        assert!(changed);
        let rows: Vec<_> = window.rows().map(|(i, _, r)| (i, r.clone())).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], (2, "item 2".to_string()));
        assert_eq!(rows[4], (6, "item 6".to_string()));
        assert_eq!(adapter.builds.get(), 5);
    }

    #[test]
    fn identical_rebuild_is_a_noop() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        let changed = window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        assert!(!changed);
        assert_eq!(adapter.builds.get(), 5);
    }

    #[test]
    fn shifted_rebuild_recycles_overlap() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        // Shift by one: 4 rows overlap, the evicted row is rebound.
        window.rebuild(ItemsRange::new(3, 5), &adapter, 9, false);
        assert_eq!(adapter.builds.get(), 5);
        assert_eq!(adapter.rebinds.get(), 1);
        assert_eq!(window.row_at(7).map(String::as_str), Some("item 7"));
        assert!(window.row_at(2).is_none());
    }

    #[test]
    fn edges_bind_placeholders_when_not_cyclic() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(-2, 5), &adapter, 9, false);
        let roles: Vec<_> = window.rows().map(|(_, role, _)| role).collect();
        assert_eq!(
            roles,
            vec![
                RowRole::Placeholder,
                RowRole::Placeholder,
                RowRole::Item,
                RowRole::Item,
                RowRole::Item,
            ]
        );
    }

    #[test]
    fn cyclic_wraps_instead_of_placeholders() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(-2, 5), &adapter, 9, true);
        let rows: Vec<_> = window.rows().map(|(i, _, r)| (i, r.clone())).collect();
        assert_eq!(rows[0], (-2, "item 7".to_string()));
        assert_eq!(rows[1], (-1, "item 8".to_string()));
        assert_eq!(rows[2], (0, "item 0".to_string()));
    }

    #[test]
    fn clear_forces_fresh_builds() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        window.clear();
        window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        assert_eq!(adapter.builds.get(), 10);
        assert_eq!(adapter.rebinds.get(), 0);
    }

    #[test]
    fn recycle_all_rebinds_from_the_pool() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        window.recycle_all();
        window.rebuild(ItemsRange::new(2, 5), &adapter, 9, false);
        assert_eq!(adapter.builds.get(), 5);
        assert_eq!(adapter.rebinds.get(), 5);
    }

    #[test]
    fn count_shrink_demotes_rows_to_placeholders() {
        let adapter = CountingAdapter::new(9);
        let mut window = RowWindow::new();
        window.rebuild(ItemsRange::new(5, 5), &adapter, 9, false);
        // Count dropped to 6: indices 6..=9 are no longer valid items.
        let changed = window.rebuild(ItemsRange::new(5, 5), &adapter, 6, false);
        assert!(changed);
        let roles: Vec<_> = window.rows().map(|(_, role, _)| role).collect();
        assert_eq!(roles[0], RowRole::Item);
        assert!(roles[1..].iter().all(|r| *r == RowRole::Placeholder));
    }
}
