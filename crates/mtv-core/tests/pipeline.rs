//! End-to-end view scenarios: filter, sort, export and panel interaction.

use mtv_core::{
    ActionDispatcher, CategoryEntry, CategoryTable, ExportFormat, MemorySink, RecordStore,
    ViewCache, ViewState, category_options, materialize, snapshot,
};
use mtv_model::{ActionEvent, FilterSelection, MeasurementRecord, SortDirection, SortKey};

fn dental_records() -> Vec<MeasurementRecord> {
    vec![
        MeasurementRecord::new("a")
            .with_label("Crown width")
            .with_tool("Length")
            .with_value("5.2"),
        MeasurementRecord::new("b")
            .with_label("Canal angle")
            .with_tool("Angle")
            .with_value("30"),
        MeasurementRecord::new("c")
            .with_label("PA length")
            .with_tool("Length")
            .with_value("12"),
    ]
}

fn tool_table() -> CategoryTable {
    CategoryTable::new(vec![
        CategoryEntry::new("Length", "Length").with_tool("Length"),
        CategoryEntry::new("Angle", "Angle").with_tool("Angle"),
    ])
    .expect("valid table")
}

fn labels(options: &[FilterSelection]) -> Vec<&str> {
    options.iter().map(FilterSelection::label).collect()
}

#[test]
fn value_sort_is_numeric_and_export_follows_view() {
    let records = dental_records();
    let table = CategoryTable::default();
    let view = materialize(
        &records,
        &FilterSelection::All,
        SortKey::Value,
        SortDirection::Ascending,
        &table,
    );
    assert_eq!(view.uids(), vec!["a", "c", "b"]);

    let snapshot = snapshot(&view, &table);
    let rows: Vec<(usize, &str, &str)> = snapshot
        .iter()
        .map(|entry| (entry.index, entry.label.as_str(), entry.value.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "Crown width", "5.2"),
            (2, "PA length", "12"),
            (3, "Canal angle", "30"),
        ]
    );
}

#[test]
fn tool_tag_table_filters_by_tool_category() {
    let records = dental_records();
    let table = tool_table();
    let view = materialize(
        &records,
        &FilterSelection::Category("Length".to_string()),
        SortKey::Label,
        SortDirection::Ascending,
        &table,
    );
    assert_eq!(view.uids(), vec!["a", "c"]);
    assert_eq!(labels(&category_options(&records, &table)), vec!["All", "Length", "Angle"]);
}

#[test]
fn label_fallback_options_follow_first_seen_order() {
    let records = dental_records();
    let options = category_options(&records, &CategoryTable::default());
    assert_eq!(
        labels(&options),
        vec!["All", "Crown width", "Canal angle", "PA length"]
    );

    let view = materialize(
        &records,
        &FilterSelection::Category("Canal angle".to_string()),
        SortKey::Index,
        SortDirection::Ascending,
        &CategoryTable::default(),
    );
    assert_eq!(view.uids(), vec!["b"]);
}

#[test]
fn toggling_the_active_key_reverses_the_view() {
    let store = RecordStore::new(dental_records());
    let table = CategoryTable::default();
    let mut state = ViewState::new();
    let mut cache = ViewCache::new();

    state.select_sort_key(SortKey::Index);
    let ascending = cache.view(&store, &state, &table).uids();
    state.select_sort_key(SortKey::Index);
    let descending = cache.view(&store, &state, &table).uids();

    assert_eq!(ascending, vec!["a", "b", "c"]);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn host_replacement_is_picked_up_by_the_view() {
    let mut store = RecordStore::new(dental_records());
    let table = CategoryTable::default();
    let state = ViewState::new();
    let mut cache = ViewCache::new();
    assert_eq!(cache.view(&store, &state, &table).len(), 3);

    let mut records = dental_records();
    records.pop();
    store.replace(records);
    assert_eq!(cache.view(&store, &state, &table).uids(), vec!["b", "a"]);
}

#[test]
fn panel_export_matches_filtered_sorted_view() {
    struct Silent;
    impl mtv_core::PanelRenderer for Silent {
        fn header(&mut self, _: &mtv_core::HeaderContext<'_>) {}
        fn row(&mut self, _: &mtv_core::RowContext<'_>) {}
        fn empty(&mut self, _: &str) {}
    }

    let store = RecordStore::new(dental_records());
    let mut panel = mtv_core::MeasurementPanel::new(Silent, tool_table());
    panel.select_filter(FilterSelection::Category("Length".to_string()));
    panel.select_sort_key(SortKey::Value);
    panel.select_sort_key(SortKey::Value);

    let mut sink = MemorySink::new();
    let artifact = panel
        .export(&store, ExportFormat::Json, &mut sink)
        .expect("export")
        .expect("non-empty view");

    assert_eq!(artifact.name, "measurements-length-value-desc.json");
    assert_eq!(artifact.entries, 2);
    let (_, content) = &sink.downloads[0];
    let exported: serde_json::Value = serde_json::from_slice(content).expect("json");
    assert_eq!(exported[0]["label"], "Length");
    assert_eq!(exported[0]["value"], "12");
    assert_eq!(exported[1]["value"], "5.2");
    assert_eq!(sink.live_registrations(), 0);
}

#[test]
fn category_buttons_forward_add_requests() {
    let events = std::cell::RefCell::new(Vec::<ActionEvent>::new());
    let handler = |event: &ActionEvent| events.borrow_mut().push(event.clone());
    let dispatcher = ActionDispatcher::new(&handler);
    let table = CategoryTable::default();
    let mut state = ViewState::new();

    for entry in table.entries() {
        dispatcher.press_category_button(&mut state, entry);
    }

    let events = events.into_inner();
    let tags: Vec<&str> = events
        .iter()
        .filter_map(|event| event.value.as_deref())
        .collect();
    assert_eq!(
        tags,
        vec!["periapicalLength", "canalAngle", "crownWidth", "rootLength"]
    );
    assert_eq!(state.last_interacted_category.as_deref(), Some("Root length"));
}
