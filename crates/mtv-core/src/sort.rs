//! Sort stage: type-aware, stable ordering of a filtered view.

use std::cmp::Ordering;

use mtv_model::{MeasurementRecord, SortDirection, SortKey};

/// Order `positions` (indices into `records`) by `key` and `direction`.
///
/// `SortKey::Index` compares places within `positions` itself, so ascending
/// keeps the input order and descending reverses it. Ties keep input order.
pub fn sort(
    records: &[MeasurementRecord],
    positions: &[usize],
    key: SortKey,
    direction: SortDirection,
) -> Vec<usize> {
    let mut ranked: Vec<(usize, usize)> = positions.iter().copied().enumerate().collect();
    let mut compare = |a: &(usize, usize), b: &(usize, usize)| {
        let ordering = match key {
            SortKey::Index => a.0.cmp(&b.0),
            SortKey::Label | SortKey::Value => compare_records(&records[a.1], &records[b.1], key),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    };
    stable_sort_by(&mut ranked, &mut compare);
    ranked.into_iter().map(|(_, position)| position).collect()
}

/// Compare two records by a content key. `SortKey::Index` has no content
/// ordering and compares equal.
pub fn compare_records(a: &MeasurementRecord, b: &MeasurementRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Index => Ordering::Equal,
        SortKey::Label => compare_text(a.display_label(), b.display_label()),
        SortKey::Value => compare_values(
            a.resolved_value().unwrap_or(""),
            b.resolved_value().unwrap_or(""),
        ),
    }
}

/// Numeric when both sides are finite decimals, case-insensitive otherwise.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        _ => compare_text(a, b),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Bottom-up merge sort.
///
/// The value comparator is not a total order when numeric and textual values
/// are mixed, and `slice::sort_by` may panic on such comparators.
fn stable_sort_by<T: Copy>(items: &mut [T], compare: &mut impl FnMut(&T, &T) -> Ordering) {
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut buffer = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buffer[start..end], &mut *compare);
            start = end;
        }
        items.copy_from_slice(&buffer);
        width *= 2;
    }
}

fn merge<T: Copy>(
    left: &[T],
    right: &[T],
    out: &mut [T],
    compare: &mut impl FnMut(&T, &T) -> Ordering,
) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Left wins ties.
        let take_left =
            j >= right.len() || (i < left.len() && compare(&right[j], &left[i]) != Ordering::Less);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valued(uid: &str, value: &str) -> MeasurementRecord {
        MeasurementRecord::new(uid).with_value(value)
    }

    fn uids(records: &[MeasurementRecord], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| records[i].uid.clone()).collect()
    }

    #[test]
    fn values_compare_numerically() {
        let records = vec![valued("ten", "10"), valued("two", "2"), valued("half", "0.5")];
        let order = sort(&records, &[0, 1, 2], SortKey::Value, SortDirection::Ascending);
        assert_eq!(uids(&records, &order), vec!["half", "two", "ten"]);
    }

    #[test]
    fn non_numeric_values_compare_case_insensitively() {
        let records = vec![valued("a", "beta"), valued("b", "Alpha"), valued("c", "gamma")];
        let order = sort(&records, &[0, 1, 2], SortKey::Value, SortDirection::Ascending);
        assert_eq!(uids(&records, &order), vec!["b", "a", "c"]);
    }

    #[test]
    fn value_falls_back_to_primary_display_text() {
        let records = vec![
            MeasurementRecord::new("a").with_primary_text(vec!["30".to_string()]),
            valued("b", "4"),
            MeasurementRecord::new("c"),
        ];
        let order = sort(&records, &[0, 1, 2], SortKey::Value, SortDirection::Ascending);
        // "" is not numeric, so the missing value compares lexically and sorts first.
        assert_eq!(uids(&records, &order), vec!["c", "b", "a"]);
    }

    #[test]
    fn missing_label_sorts_first_ascending() {
        let records = vec![
            MeasurementRecord::new("a").with_label("root"),
            MeasurementRecord::new("b"),
            MeasurementRecord::new("c").with_label("Canal"),
        ];
        let order = sort(&records, &[0, 1, 2], SortKey::Label, SortDirection::Ascending);
        assert_eq!(uids(&records, &order), vec!["b", "c", "a"]);
        let order = sort(&records, &[0, 1, 2], SortKey::Label, SortDirection::Descending);
        assert_eq!(uids(&records, &order), vec!["a", "c", "b"]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let records = vec![
            MeasurementRecord::new("a").with_label("Same"),
            MeasurementRecord::new("b").with_label("same"),
            MeasurementRecord::new("c").with_label("Other"),
            MeasurementRecord::new("d").with_label("SAME"),
        ];
        let asc = sort(&records, &[0, 1, 2, 3], SortKey::Label, SortDirection::Ascending);
        assert_eq!(uids(&records, &asc), vec!["c", "a", "b", "d"]);
        let desc = sort(&records, &[0, 1, 2, 3], SortKey::Label, SortDirection::Descending);
        assert_eq!(uids(&records, &desc), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn index_key_uses_stage_input_order() {
        let records = vec![valued("a", "1"), valued("b", "2"), valued("c", "3")];
        let asc = sort(&records, &[2, 0], SortKey::Index, SortDirection::Ascending);
        assert_eq!(asc, vec![2, 0]);
        let desc = sort(&records, &[2, 0], SortKey::Index, SortDirection::Descending);
        assert_eq!(desc, vec![0, 2]);
    }

    #[test]
    fn mixed_values_do_not_panic() {
        let records = vec![
            valued("a", "10"),
            valued("b", "9"),
            valued("c", "1a"),
            valued("d", "x"),
            valued("e", "-3"),
            valued("f", "NaN"),
        ];
        let order = sort(
            &records,
            &[0, 1, 2, 3, 4, 5],
            SortKey::Value,
            SortDirection::Ascending,
        );
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn non_finite_text_is_not_numeric() {
        assert_eq!(compare_values("inf", "2"), Ordering::Greater);
        assert_eq!(compare_values(" 2 ", "10"), Ordering::Less);
    }
}
