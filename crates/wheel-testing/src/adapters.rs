//! Simple adapters backing test wheels.

use wheel_core::WheelAdapter;

/// Adapter over an owned list of strings; rows are the strings themselves.
pub struct StringsAdapter {
    items: Vec<String>,
}

impl StringsAdapter {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// The nine-country list the stock swipe demo ships with.
    pub fn countries() -> Self {
        Self::new([
            "0.Taiwan",
            "1.台灣",
            "2.USA",
            "3.Canada",
            "4.Ukraine",
            "5.France",
            "6.Japan",
            "7.Korea",
            "8.Africa",
        ])
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<String> {
        &mut self.items
    }
}

impl WheelAdapter for StringsAdapter {
    type Row = String;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn row(&self, index: usize, reusable: Option<String>) -> String {
        let mut row = reusable.unwrap_or_default();
        row.clear();
        row.push_str(&self.items[index]);
        row
    }

    fn placeholder_row(&self, reusable: Option<String>) -> String {
        let mut row = reusable.unwrap_or_default();
        row.clear();
        row
    }
}
