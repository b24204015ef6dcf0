//! Item source contract.
//!
//! The wheel never interprets row content; it asks the adapter for a row per
//! index and hands back recycled rows for rebinding. Out-of-range indices in
//! non-cyclic mode are rendered as placeholder rows.

/// Backing item source for a wheel.
///
/// `Row` is whatever the host paints: a widget handle, a string, a texture
/// id. The wheel only stores and recycles it.
///
/// Data changes are reported to the wheel by the host through
/// [`Wheel::content_changed`](crate::Wheel::content_changed) and
/// [`Wheel::content_invalidated`](crate::Wheel::content_invalidated); the
/// rebuild is deferred to the next render pass.
pub trait WheelAdapter {
    type Row;

    /// Number of items in the source.
    fn item_count(&self) -> usize;

    /// Produces (or rebinds) the row for `index`.
    ///
    /// `index` is always in `[0, item_count)` at call time. `reusable` is a
    /// previously materialized row of the same role to rebind instead of
    /// building a fresh one.
    fn row(&self, index: usize, reusable: Option<Self::Row>) -> Self::Row;

    /// Produces (or rebinds) a placeholder row shown for indices outside the
    /// valid range when the wheel is not cyclic.
    fn placeholder_row(&self, reusable: Option<Self::Row>) -> Self::Row;
}
