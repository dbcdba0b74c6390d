//! Tests for row-index remapping.

use pedgene_model::IndexedFrame;
use pedgene_transform::{IndexMap, TransformError, remap_index};
use polars::prelude::*;
use proptest::prelude::*;

fn letter_map() -> IndexMap {
    IndexMap::new(
        Column::new("target".into(), [10i64, 20]),
        Column::new("source".into(), ["a", "b"]),
    )
    .unwrap()
}

fn letter_table() -> IndexedFrame {
    let df = df! {
        "key" => ["b", "c"],
        "value" => [1.0, 2.0],
    }
    .unwrap();
    IndexedFrame::with_index(df, "key").unwrap()
}

fn index_i64(frame: &IndexedFrame) -> Vec<Option<i64>> {
    frame
        .index_values()
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn unmapped_rows_are_dropped() {
    let out = remap_index(letter_table(), &letter_map(), "index", true).unwrap();

    assert_eq!(out.index_name(), Some("index"));
    assert_eq!(index_i64(&out), vec![Some(20)]);
    let values = out.data().column("value").unwrap().f64().unwrap();
    assert_eq!(values.get(0), Some(1.0));
    // The old index column is gone.
    assert!(out.data().column("key").is_err());
}

#[test]
fn unmapped_rows_are_kept_as_null() {
    let out = remap_index(letter_table(), &letter_map(), "index", false).unwrap();

    assert_eq!(out.height(), 2);
    assert_eq!(index_i64(&out), vec![Some(20), None]);
}

#[test]
fn first_duplicate_source_wins() {
    let map = IndexMap::new(
        Column::new("target".into(), [1i64, 2, 3]),
        Column::new("source".into(), ["x", "y", "x"]),
    )
    .unwrap();
    let df = df! { "key" => ["x", "y"] }.unwrap();
    let table = IndexedFrame::with_index(df, "key").unwrap();

    let out = remap_index(table, &map, "id", true).unwrap();
    assert_eq!(index_i64(&out), vec![Some(1), Some(2)]);
}

#[test]
fn empty_map_leaves_every_row_unmapped() {
    let map = IndexMap::new(
        Column::new("target".into(), Vec::<i64>::new()),
        Column::new("source".into(), Vec::<String>::new()),
    )
    .unwrap();
    assert!(map.is_empty());

    let kept = remap_index(letter_table(), &map, "index", false).unwrap();
    assert_eq!(index_i64(&kept), vec![None, None]);

    let dropped = remap_index(letter_table(), &map, "index", true).unwrap();
    assert_eq!(dropped.height(), 0);
}

#[test]
fn positional_index_is_remapped() {
    let map = IndexMap::new(
        Column::new("depmap_id".into(), ["ACH-000001", "ACH-000002"]),
        Column::new("row".into(), [1i64, 0]),
    )
    .unwrap();
    let df = df! { "score" => [0.5, 0.7, 0.9] }.unwrap();

    let out = remap_index(IndexedFrame::positional(df), &map, "cell_line", true).unwrap();

    let index: Vec<Option<&str>> = out
        .data()
        .column("cell_line")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(index, vec![Some("ACH-000002"), Some("ACH-000001")]);
    assert_eq!(out.data().get_column_names()[0].as_str(), "cell_line");
}

#[test]
fn new_index_replaces_same_named_column() {
    let df = df! {
        "key" => ["a", "b"],
        "index" => ["old", "old"],
    }
    .unwrap();
    let table = IndexedFrame::with_index(df, "key").unwrap();

    let out = remap_index(table, &letter_map(), "index", false).unwrap();
    assert_eq!(out.data().width(), 1);
    assert_eq!(index_i64(&out), vec![Some(10), Some(20)]);
}

#[test]
fn index_map_from_frame_uses_row_index_as_targets() {
    let df = df! {
        "entrez" => [7157i64, 672],
        "symbol" => ["TP53", "BRCA1"],
    }
    .unwrap();
    let map_frame = IndexedFrame::with_index(df, "entrez").unwrap();
    let map = IndexMap::from_frame(&map_frame, "symbol").unwrap();

    let df = df! { "gene" => ["BRCA1", "MYCN"], "effect" => [-1.2, -0.4] }.unwrap();
    let table = IndexedFrame::with_index(df, "gene").unwrap();

    let out = remap_index(table, &map, "geneID", true).unwrap();
    assert_eq!(index_i64(&out), vec![Some(672)]);
}

#[test]
fn index_map_rejects_mismatched_lengths() {
    let err = IndexMap::new(
        Column::new("target".into(), [1i64]),
        Column::new("source".into(), ["a", "b"]),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TransformError::MapLengthMismatch {
            targets: 1,
            sources: 2
        }
    ));
}

#[test]
fn index_map_from_frame_requires_value_column() {
    let df = df! { "symbol" => ["TP53"] }.unwrap();
    let frame = IndexedFrame::positional(df);
    let err = IndexMap::from_frame(&frame, "missing").unwrap_err();
    assert!(matches!(err, TransformError::ColumnNotFound(name) if name == "missing"));
}

#[test]
fn integer_keys_match_float_sources_by_value() {
    let map = IndexMap::new(
        Column::new("target".into(), ["ACH-1", "ACH-2", "ACH-3"]),
        Column::new("source".into(), [Some(1.0f64), None, Some(2.0)]),
    )
    .unwrap();
    let df = df! { "key" => [1i64, 2, 3], "value" => [0.1, 0.2, 0.3] }.unwrap();
    let table = IndexedFrame::with_index(df, "key").unwrap();

    let out = remap_index(table, &map, "cell_line", true).unwrap();

    let index: Vec<Option<&str>> = out
        .data()
        .column("cell_line")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(index, vec![Some("ACH-1"), Some("ACH-3")]);
}

#[test]
fn integer_widths_compare_by_value() {
    let map = IndexMap::new(
        Column::new("target".into(), [10i64, 20]),
        Column::new("source".into(), [7u32, 8]),
    )
    .unwrap();
    let df = df! { "key" => [8i64, 9] }.unwrap();
    let table = IndexedFrame::with_index(df, "key").unwrap();

    let out = remap_index(table, &map, "index", false).unwrap();
    assert_eq!(index_i64(&out), vec![Some(20), None]);
}

#[test]
fn float_nan_never_matches() {
    let map = IndexMap::new(
        Column::new("target".into(), [10i64, 20]),
        Column::new("source".into(), [f64::NAN, 0.0]),
    )
    .unwrap();
    let df = df! { "key" => [f64::NAN, -0.0] }.unwrap();
    let table = IndexedFrame::with_index(df, "key").unwrap();

    let out = remap_index(table, &map, "index", false).unwrap();
    assert_eq!(index_i64(&out), vec![None, Some(20)]);
}

#[test]
fn string_keys_do_not_match_numeric_sources() {
    let map = IndexMap::new(
        Column::new("target".into(), [10i64]),
        Column::new("source".into(), [1i64]),
    )
    .unwrap();
    let df = df! { "key" => ["1"] }.unwrap();
    let table = IndexedFrame::with_index(df, "key").unwrap();

    let err = remap_index(table, &map, "index", true).unwrap_err();
    assert!(matches!(err, TransformError::KeyTypeMismatch { .. }));
    insta::assert_snapshot!(
        err,
        @"index keys of type str cannot be matched against map values of type i64"
    );
}

fn build(keys: &[i64], sources: &[i64]) -> (IndexedFrame, IndexMap) {
    let rows: Vec<u32> = (0..keys.len() as u32).collect();
    let df = DataFrame::new(vec![
        Column::new("key".into(), keys.to_vec()),
        Column::new("row".into(), rows),
    ])
    .unwrap();
    let targets: Vec<i64> = (0..sources.len() as i64).map(|pos| pos * 100).collect();
    let map = IndexMap::new(
        Column::new("target".into(), targets),
        Column::new("source".into(), sources.to_vec()),
    )
    .unwrap();
    (IndexedFrame::with_index(df, "key").unwrap(), map)
}

proptest! {
    #[test]
    fn keeping_unmapped_preserves_row_count(
        keys in prop::collection::vec(0i64..8, 0..12),
        sources in prop::collection::vec(0i64..8, 0..12),
    ) {
        let (table, map) = build(&keys, &sources);
        let out = remap_index(table, &map, "index", false).unwrap();
        prop_assert_eq!(out.height(), keys.len());
    }

    #[test]
    fn dropping_removes_exactly_the_unmatched_rows(
        keys in prop::collection::vec(0i64..8, 0..12),
        sources in prop::collection::vec(0i64..8, 0..12),
    ) {
        let (table, map) = build(&keys, &sources);
        let out = remap_index(table, &map, "index", true).unwrap();

        let absent = keys.iter().filter(|key| !sources.contains(key)).count();
        prop_assert_eq!(out.height(), keys.len() - absent);

        let index = out.data().column("index").unwrap().i64().unwrap();
        let rows = out.data().column("row").unwrap().u32().unwrap();
        for (target, row) in index.into_iter().zip(rows.into_iter()) {
            let target = target.unwrap();
            let key = keys[row.unwrap() as usize];
            let first = sources.iter().position(|source| *source == key).unwrap();
            prop_assert_eq!(target, first as i64 * 100);
        }
    }
}
