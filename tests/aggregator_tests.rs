use fleetboard::aggregator::{
    assign_colors, grouped_count, single_field_count, ColorScheme, Label,
};
use fleetboard::record::{parse_payload_str, FieldValue, Record};
use pretty_assertions::assert_eq;

fn value(v: impl Into<FieldValue>) -> Label {
    Label::Value(v.into())
}

fn zone_sdk_records() -> Vec<Record> {
    parse_payload_str(
        r#"[
            {"zone": "A", "sdk_int": 28},
            {"zone": "A", "sdk_int": 30},
            {"zone": "B", "sdk_int": 28}
        ]"#,
    )
    .unwrap()
}

fn fleet() -> Vec<Record> {
    parse_payload_str(
        r#"{"data": [
            {"username": "a", "zone": "North", "device_brand": "Samsung", "sdk_int": 30, "vehicle_cc": 150},
            {"username": "b", "zone": "South", "device_brand": "Xiaomi", "sdk_int": 29, "vehicle_cc": 125},
            {"username": "c", "zone": null, "device_brand": "Samsung", "sdk_int": 30},
            {"username": "d", "zone": "North", "sdk_int": "30", "vehicle_cc": 150},
            {"username": "e", "device_brand": "Oppo", "sdk_int": 31, "vehicle_cc": 200},
            {"username": "f", "zone": "South", "device_brand": "Samsung", "sdk_int": 29, "vehicle_cc": 150}
        ]}"#,
    )
    .unwrap()
}

#[test]
fn test_single_field_scenario() {
    let counts = single_field_count(&zone_sdk_records(), "zone");
    assert_eq!(counts.labels, vec![value("A"), value("B")]);
    assert_eq!(counts.counts, vec![2, 1]);
}

#[test]
fn test_grouped_scenario() {
    let grouped = grouped_count(&zone_sdk_records(), "zone", "sdk_int", ColorScheme::Palette);

    assert_eq!(grouped.labels, vec![value("A"), value("B")]);
    assert_eq!(grouped.inner_labels, vec![value(28i64), value(30i64)]);
    assert_eq!(grouped.series_for(&value("A")).unwrap().counts, vec![1, 1]);
    assert_eq!(grouped.series_for(&value("B")).unwrap().counts, vec![1, 0]);
}

#[test]
fn test_null_scenario() {
    let records = parse_payload_str(r#"[{"zone": null}, {"zone": "A"}, {"zone": null}]"#).unwrap();
    let counts = single_field_count(&records, "zone");
    assert_eq!(counts.labels, vec![Label::Unknown, value("A")]);
    assert_eq!(counts.counts, vec![2, 1]);
}

#[test]
fn test_counts_sum_to_record_count() {
    let records = fleet();
    for field in ["zone", "device_brand", "sdk_int", "vehicle_cc", "username", "missing"] {
        let counts = single_field_count(&records, field);
        assert_eq!(counts.total(), records.len() as u64, "field {}", field);
        assert_eq!(counts.labels.len(), counts.counts.len());
    }
}

#[test]
fn test_single_unknown_label() {
    let counts = single_field_count(&fleet(), "zone");
    let unknowns = counts.labels.iter().filter(|l| l.is_unknown()).count();
    assert_eq!(unknowns, 1);
    assert_eq!(counts.count_of(&Label::Unknown), 2);
}

#[test]
fn test_labels_are_distinct_values() {
    let records = fleet();
    let counts = single_field_count(&records, "device_brand");
    assert_eq!(
        counts.labels,
        vec![value("Samsung"), value("Xiaomi"), Label::Unknown, value("Oppo")]
    );
}

#[test]
fn test_no_coercion_between_number_and_string() {
    let counts = single_field_count(&fleet(), "sdk_int");
    assert_eq!(
        counts.labels,
        vec![value(30i64), value(29i64), value("30"), value(31i64)]
    );
    assert_eq!(counts.counts, vec![2, 2, 1, 1]);

    let records = parse_payload_str(r#"[{"v": 0}, {"v": "0"}, {"v": false}, {"v": ""}]"#).unwrap();
    let counts = single_field_count(&records, "v");
    assert_eq!(counts.labels.len(), 4);
    assert!(counts.labels.iter().all(|l| !l.is_unknown()));
}

#[test]
fn test_grouped_row_sums_match_outer_counts() {
    let records = fleet();
    let grouped = grouped_count(&records, "zone", "vehicle_cc", ColorScheme::Random);
    let outer = single_field_count(&records, "zone");

    assert_eq!(grouped.labels, outer.labels);
    for series in &grouped.series {
        assert_eq!(series.counts.len(), grouped.inner_labels.len());
        assert_eq!(series.counts.iter().sum::<u64>(), outer.count_of(&series.label));
    }
    assert_eq!(grouped.total(), records.len() as u64);
}

#[test]
fn test_grouped_inner_labels_are_global() {
    let records = fleet();
    let grouped = grouped_count(&records, "zone", "vehicle_cc", ColorScheme::Palette);
    let inner = single_field_count(&records, "vehicle_cc");
    assert_eq!(grouped.inner_labels, inner.labels);
}

#[test]
fn test_idempotent_ignoring_colors() {
    let records = fleet();
    assert_eq!(
        single_field_count(&records, "zone"),
        single_field_count(&records, "zone")
    );

    let first = grouped_count(&records, "zone", "sdk_int", ColorScheme::Random);
    let second = grouped_count(&records, "zone", "sdk_int", ColorScheme::Random);
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.inner_labels, second.inner_labels);
    let counts = |g: &fleetboard::aggregator::GroupedCounts| {
        g.series.iter().map(|s| s.counts.clone()).collect::<Vec<_>>()
    };
    assert_eq!(counts(&first), counts(&second));
}

#[test]
fn test_empty_input() {
    let single = single_field_count(&[], "zone");
    assert!(single.labels.is_empty());
    assert!(single.counts.is_empty());

    let grouped = grouped_count(&[], "zone", "sdk_int", ColorScheme::Palette);
    assert!(grouped.labels.is_empty());
    assert!(grouped.inner_labels.is_empty());
    assert!(grouped.series.is_empty());
}

#[test]
fn test_one_color_per_series() {
    let grouped = grouped_count(&fleet(), "zone", "sdk_int", ColorScheme::Palette);
    let colors: Vec<_> = grouped.series.iter().map(|s| s.color).collect();
    assert_eq!(colors, assign_colors(grouped.series.len(), ColorScheme::Palette));
}

#[test]
fn test_records_not_mutated() {
    let records = fleet();
    let before = records.clone();
    let _ = single_field_count(&records, "zone");
    let _ = grouped_count(&records, "zone", "sdk_int", ColorScheme::Palette);
    assert_eq!(records, before);
}

#[test]
fn test_signed_zero_shares_one_label() {
    let records = parse_payload_str(r#"[{"v": 0.0}, {"v": -0.0}]"#).unwrap();
    let counts = single_field_count(&records, "v");

    assert_eq!(counts.labels.len(), 1);
    assert_eq!(counts.counts, vec![2]);
    assert_eq!(counts.count_of(&counts.labels[0]), 2);
}
