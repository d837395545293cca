pub mod action;
pub mod record;
pub mod snapshot;
pub mod view;

pub use action::{ActionCommand, ActionEvent};
pub use record::{DisplayText, MeasurementRecord};
pub use snapshot::{EMPTY_FIELD, ExportEntry, ExportSnapshot};
pub use view::{ALL_CATEGORIES, FilterSelection, SortDirection, SortKey};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_host_payload() {
        let json = r#"{
            "uid": "m-1",
            "label": "PA length",
            "displayText": { "primary": ["12.4 mm"], "secondary": ["S:1 I:3"] },
            "toolName": "Length",
            "isSelected": true,
            "isUnmapped": true,
            "statusTooltip": "Not mapped to a finding"
        }"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("deserialize record");
        assert_eq!(record.uid, "m-1");
        assert_eq!(record.tool_name.as_deref(), Some("Length"));
        assert!(record.is_selected);
        assert!(record.is_visible);
        assert!(!record.is_locked);
        assert_eq!(record.resolved_value(), Some("12.4 mm"));
    }

    #[test]
    fn resolved_value_prefers_value_over_display_text() {
        let record = MeasurementRecord::new("a")
            .with_value("5.2")
            .with_primary_text(vec!["5.2 mm".to_string()]);
        assert_eq!(record.resolved_value(), Some("5.2"));
        assert_eq!(MeasurementRecord::new("b").resolved_value(), None);
        assert_eq!(MeasurementRecord::new("b").display_label(), "");
    }

    #[test]
    fn action_event_uses_host_command_names() {
        let event = ActionEvent::for_record(ActionCommand::SelectMeasurement, "m-7");
        let json = serde_json::to_string(&event).expect("serialize event");
        assert_eq!(json, r#"{"command":"jumpToMeasurement","uid":"m-7"}"#);
        assert_eq!(
            ActionCommand::RecolorMeasurement.to_string(),
            "changeMeasurementColor"
        );
        assert!(ActionCommand::RemoveMeasurement.is_editing());
        assert!(!ActionCommand::ToggleLock.is_editing());
    }

    #[test]
    fn filter_selection_round_trips_labels() {
        assert_eq!(FilterSelection::from_label("All"), FilterSelection::All);
        assert_eq!(
            FilterSelection::from_label("Canal angle"),
            FilterSelection::Category("Canal angle".to_string())
        );
        assert_eq!(FilterSelection::All.label(), ALL_CATEGORIES);
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
    }

    #[test]
    fn snapshot_serializes_as_array() {
        let snapshot = ExportSnapshot {
            entries: vec![ExportEntry {
                index: 1,
                label: "Crown width".to_string(),
                value: "5.2".to_string(),
            }],
        };
        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        assert_eq!(json, r#"[{"index":1,"label":"Crown width","value":"5.2"}]"#);
    }
}
