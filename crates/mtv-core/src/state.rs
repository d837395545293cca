//! Per-panel view state, mutated only by interaction handlers.

use mtv_model::{FilterSelection, SortDirection, SortKey};

/// Sort, filter and last-pressed category for one panel instance.
///
/// Created with defaults on mount and discarded on unmount; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub filter: FilterSelection,
    /// Label of the last category button pressed (presentation only).
    pub last_interacted_category: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column-header click: the active key flips direction, any other key
    /// becomes active in ascending order.
    pub fn select_sort_key(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn select_filter(&mut self, filter: FilterSelection) {
        self.filter = filter;
    }

    pub fn record_category_press(&mut self, category: impl Into<String>) {
        self.last_interacted_category = Some(category.into());
    }
}
