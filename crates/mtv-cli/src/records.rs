//! Loading host records from disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, trace, warn};

use mtv_core::RecordStore;
use mtv_model::MeasurementRecord;

use crate::logging::redact_value;

/// Read a JSON array of measurement records into a store.
///
/// Duplicate uids are kept (the store preserves host order) but reported.
pub fn load_records(path: &Path) -> Result<RecordStore> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let records = parse_records(&content).with_context(|| format!("parse {}", path.display()))?;
    info!(path = %path.display(), count = records.len(), "records loaded");
    Ok(RecordStore::new(records))
}

/// Parse a JSON array of measurement records.
pub fn parse_records(content: &str) -> Result<Vec<MeasurementRecord>> {
    let records: Vec<MeasurementRecord> =
        serde_json::from_str(content).context("expected a JSON array of measurement records")?;
    for uid in duplicate_uids(&records) {
        warn!(uid = %uid, "duplicate measurement uid");
    }
    for record in &records {
        trace!(
            uid = %record.uid,
            label = redact_value(record.display_label()),
            value = redact_value(record.resolved_value().unwrap_or("")),
            "record"
        );
    }
    Ok(records)
}

/// Uids that occur more than once, in sorted order.
pub fn duplicate_uids(records: &[MeasurementRecord]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for record in records {
        if !seen.insert(record.uid.as_str()) {
            duplicates.insert(record.uid.as_str());
        }
    }
    duplicates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_records() {
        let records = parse_records(
            r#"[
                {"uid": "a", "label": "PA length", "toolName": "Length", "value": "12"},
                {"uid": "b", "displayText": {"primary": ["30°"]}, "isUnmapped": true}
            ]"#,
        )
        .expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tool_name.as_deref(), Some("Length"));
        assert_eq!(records[1].resolved_value(), Some("30°"));
        assert!(records[1].is_unmapped);
        assert!(records[1].is_visible);
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_records(r#"{"uid": "a"}"#).is_err());
    }

    #[test]
    fn reports_duplicate_uids() {
        let records = vec![
            MeasurementRecord::new("b"),
            MeasurementRecord::new("a"),
            MeasurementRecord::new("b"),
            MeasurementRecord::new("a"),
            MeasurementRecord::new("c"),
        ];
        assert_eq!(duplicate_uids(&records), vec!["a", "b"]);
    }
}
