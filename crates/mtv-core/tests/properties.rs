//! Property tests for the filter, sort and export stages.

use mtv_core::{CategoryTable, category_options, filter, materialize, resolve_category, snapshot, sort};
use mtv_model::{FilterSelection, MeasurementRecord, SortDirection, SortKey};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = MeasurementRecord> {
    (
        prop::option::of(prop::sample::select(vec![
            "Crown width",
            "crown WIDTH",
            "Canal angle",
            "PA length",
            "Root",
            "",
        ])),
        prop::option::of(prop::sample::select(vec![
            "5.2", "12", "30", "-1", "0.50", "abc", "7 mm",
        ])),
        prop::option::of(prop::sample::select(vec![
            "Length",
            "Angle",
            "canalAngle",
            "rootLength",
        ])),
    )
        .prop_map(|(label, value, tool)| MeasurementRecord {
            label: label.map(str::to_string),
            value: value.map(str::to_string),
            tool_name: tool.map(str::to_string),
            ..MeasurementRecord::new("")
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<MeasurementRecord>> {
    prop::collection::vec(record_strategy(), 0..24).prop_map(|mut records| {
        for (position, record) in records.iter_mut().enumerate() {
            record.uid = format!("m{position}");
        }
        records
    })
}

fn key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Index),
        Just(SortKey::Label),
        Just(SortKey::Value)
    ]
}

fn direction_strategy() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn all_positions(records: &[MeasurementRecord]) -> Vec<usize> {
    (0..records.len()).collect()
}

proptest! {
    #[test]
    fn all_filter_keeps_every_record(records in records_strategy()) {
        let table = CategoryTable::default();
        prop_assert_eq!(filter(&records, &FilterSelection::All, &table), all_positions(&records));
    }

    #[test]
    fn category_filter_keeps_exactly_matching_records(
        records in records_strategy(),
        pick in 0usize..8,
    ) {
        let table = CategoryTable::default();
        let options = category_options(&records, &table);
        if options.len() < 2 {
            return Ok(());
        }
        let selection = options[1 + pick % (options.len() - 1)].clone();
        let kept = filter(&records, &selection, &table);

        prop_assert!(kept.windows(2).all(|pair| pair[0] < pair[1]));
        for (position, record) in records.iter().enumerate() {
            let matches = resolve_category(record, &table) == Some(selection.label());
            prop_assert_eq!(kept.contains(&position), matches);
        }
    }

    #[test]
    fn label_sort_is_stable(records in records_strategy(), direction in direction_strategy()) {
        let order = sort(&records, &all_positions(&records), SortKey::Label, direction);
        for (left, &earlier) in order.iter().enumerate() {
            for &later in &order[left + 1..] {
                let same_label = records[earlier].display_label().to_lowercase()
                    == records[later].display_label().to_lowercase();
                if same_label {
                    prop_assert!(earlier < later);
                }
            }
        }
    }

    #[test]
    fn sort_is_a_permutation(
        records in records_strategy(),
        key in key_strategy(),
        direction in direction_strategy(),
    ) {
        let mut order = sort(&records, &all_positions(&records), key, direction);
        order.sort_unstable();
        prop_assert_eq!(order, all_positions(&records));
    }

    #[test]
    fn index_direction_toggle_reverses(records in records_strategy()) {
        let positions = all_positions(&records);
        let ascending = sort(&records, &positions, SortKey::Index, SortDirection::Ascending);
        let mut descending = sort(&records, &positions, SortKey::Index, SortDirection::Descending);
        descending.reverse();
        prop_assert_eq!(&ascending, &positions);
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn label_toggle_reverses_distinct_labels(count in 0usize..16, seed in any::<u64>()) {
        let records: Vec<MeasurementRecord> = (0..count)
            .map(|position| {
                let scrambled = (seed.wrapping_mul(position as u64 + 1)) % 1000;
                MeasurementRecord::new(format!("m{position}"))
                    .with_label(format!("{scrambled:03}-{position:02}"))
            })
            .collect();
        let positions = all_positions(&records);
        let ascending = sort(&records, &positions, SortKey::Label, SortDirection::Ascending);
        let mut descending = sort(&records, &positions, SortKey::Label, SortDirection::Descending);
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn export_reflects_view_order(
        records in records_strategy(),
        key in key_strategy(),
        direction in direction_strategy(),
    ) {
        let table = CategoryTable::default();
        let view = materialize(&records, &FilterSelection::All, key, direction, &table);
        let snapshot = snapshot(&view, &table);

        prop_assert_eq!(snapshot.len(), view.len());
        for (position, (entry, record)) in snapshot.iter().zip(view.iter()).enumerate() {
            prop_assert_eq!(entry.index, position + 1);
            prop_assert_eq!(
                entry.label.as_str(),
                resolve_category(record, &table).unwrap_or("(empty)")
            );
            prop_assert_eq!(
                entry.value.as_str(),
                record.resolved_value().unwrap_or("(empty)")
            );
        }
    }

    #[test]
    fn unfiltered_view_equals_sort(
        records in records_strategy(),
        key in key_strategy(),
        direction in direction_strategy(),
    ) {
        let table = CategoryTable::default();
        let view = materialize(&records, &FilterSelection::All, key, direction, &table);
        let sorted = sort(&records, &all_positions(&records), key, direction);
        prop_assert_eq!(view.positions(), sorted.as_slice());
    }
}
