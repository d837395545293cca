//! Host-supplied record set.

use std::sync::atomic::{AtomicU64, Ordering};

use mtv_model::MeasurementRecord;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// The ordered record set for the current render cycle.
///
/// The host replaces the records wholesale; the engine never edits them.
/// Every construction or replacement gets a process-unique generation, which
/// identifies the input for view memoization.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<MeasurementRecord>,
    generation: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecordStore {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self {
            records,
            generation: next_generation(),
        }
    }

    /// Swap in a new record set from the host.
    pub fn replace(&mut self, records: Vec<MeasurementRecord>) {
        self.records = records;
        self.generation = next_generation();
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, uid: &str) -> Option<&MeasurementRecord> {
        self.records.iter().find(|record| record.uid == uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacement_changes_generation() {
        let mut store = RecordStore::new(vec![MeasurementRecord::new("a")]);
        let first = store.generation();
        store.replace(vec![MeasurementRecord::new("a")]);
        assert_ne!(store.generation(), first);
        assert!(store.find("a").is_some());
        assert!(store.find("b").is_none());
    }

    #[test]
    fn separate_stores_have_distinct_generations() {
        let a = RecordStore::default();
        let b = RecordStore::default();
        assert_ne!(a.generation(), b.generation());
        assert!(a.is_empty());
    }
}
