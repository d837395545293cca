//! Category filter stage.

use mtv_model::{FilterSelection, MeasurementRecord};

use crate::category::{CategoryTable, resolve_category};

/// Positions of the records that pass `selection`, in input order.
///
/// `All` passes every record through; a category keeps exactly the records
/// whose resolved category equals it.
pub fn filter(
    records: &[MeasurementRecord],
    selection: &FilterSelection,
    table: &CategoryTable,
) -> Vec<usize> {
    match selection {
        FilterSelection::All => (0..records.len()).collect(),
        FilterSelection::Category(category) => records
            .iter()
            .enumerate()
            .filter(|(_, record)| resolve_category(record, table) == Some(category.as_str()))
            .map(|(position, _)| position)
            .collect(),
    }
}
