use serde::{Deserialize, Serialize};

/// Placeholder written for labels and values that cannot be resolved.
pub const EMPTY_FIELD: &str = "(empty)";

/// One exported row. Field order is part of the export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// 1-based position in the exported view.
    pub index: usize,
    pub label: String,
    pub value: String,
}

/// Ordered export of the view as displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportSnapshot {
    pub entries: Vec<ExportEntry>,
}

impl ExportSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExportEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ExportSnapshot {
    type Item = &'a ExportEntry;
    type IntoIter = std::slice::Iter<'a, ExportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
