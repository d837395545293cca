//! View materialization: filter, then sort, with an explicit memo cache.

use tracing::debug;

use mtv_model::{FilterSelection, MeasurementRecord, SortDirection, SortKey};

use crate::category::CategoryTable;
use crate::filter::filter;
use crate::sort::sort;
use crate::state::ViewState;
use crate::store::RecordStore;

// =============================================================================
// DERIVED VIEW
// =============================================================================

/// The filtered and sorted records currently shown.
///
/// Holds positions into the borrowed record slice; records are never copied.
#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    records: &'a [MeasurementRecord],
    order: Vec<usize>,
}

impl<'a> DerivedView<'a> {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Record at a view position.
    pub fn get(&self, index: usize) -> Option<&'a MeasurementRecord> {
        self.order.get(index).map(|&position| &self.records[position])
    }

    /// Positions of the shown records within the store.
    pub fn positions(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MeasurementRecord> + '_ {
        let records = self.records;
        self.order.iter().map(move |&position| &records[position])
    }

    pub fn uids(&self) -> Vec<&'a str> {
        self.iter().map(|record| record.uid.as_str()).collect()
    }
}

/// `sort(filter(records, selection), key, direction)`.
pub fn materialize<'a>(
    records: &'a [MeasurementRecord],
    selection: &FilterSelection,
    key: SortKey,
    direction: SortDirection,
    table: &CategoryTable,
) -> DerivedView<'a> {
    let kept = filter(records, selection, table);
    let order = sort(records, &kept, key, direction);
    DerivedView { records, order }
}

// =============================================================================
// MEMO CACHE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    generation: u64,
    filter: FilterSelection,
    sort_key: SortKey,
    sort_direction: SortDirection,
    table: CategoryTable,
}

/// Memoizes the last materialized ordering.
///
/// Keyed on the store generation, the sort/filter state and the category
/// table; a hit returns the same ordering a recompute would.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    key: Option<CacheKey>,
    order: Vec<usize>,
    recomputes: usize,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view for `store` under `state`, recomputed only on input change.
    pub fn view<'a>(
        &mut self,
        store: &'a RecordStore,
        state: &ViewState,
        table: &CategoryTable,
    ) -> DerivedView<'a> {
        let fresh = self.key.as_ref().is_some_and(|key| {
            key.generation == store.generation()
                && key.filter == state.filter
                && key.sort_key == state.sort_key
                && key.sort_direction == state.sort_direction
                && key.table == *table
        });
        if !fresh {
            let view = materialize(
                store.records(),
                &state.filter,
                state.sort_key,
                state.sort_direction,
                table,
            );
            self.recomputes += 1;
            debug!(
                generation = store.generation(),
                filter = %state.filter,
                sort_key = %state.sort_key,
                sort_direction = state.sort_direction.short(),
                records = store.len(),
                shown = view.len(),
                "view recomputed"
            );
            self.order = view.order;
            self.key = Some(CacheKey {
                generation: store.generation(),
                filter: state.filter.clone(),
                sort_key: state.sort_key,
                sort_direction: state.sort_direction,
                table: table.clone(),
            });
        }
        DerivedView {
            records: store.records(),
            order: self.order.clone(),
        }
    }

    /// Number of times the view was recomputed rather than served from cache.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
