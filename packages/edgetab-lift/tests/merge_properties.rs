//! Merge join behaviour and cross-strategy properties
//!
//! - merge join over presorted files
//! - in-memory and merge joins agree on presorted data
//! - empty-column suppression only ever narrows the schema

mod common;

use common::*;
use edgetab_io::{MemoryTable, Row};
use edgetab_lift::{LiftConfig, LiftMode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn merge_config() -> LiftConfig {
    LiftConfig::default()
        .columns_to_lift(["node1"])
        .input_file_is_presorted(true)
        .label_file_is_presorted(true)
}

// ============================================================================
// Merge join
// ============================================================================

#[test]
fn test_merge_lifts_presorted_keys() {
    let input = edge_table(&[
        &["A", "P1", "x", "e1"],
        &["A", "P2", "y", "e2"],
        &["B", "P1", "z", "e3"],
        &["C", "P1", "w", "e4"],
    ]);
    let labels = edge_table(&[&["A", "label", "va", "l1"], &["B", "label", "vb", "l2"]]);

    let out = LiftRunBuilder::new(input)
        .with_config(merge_config())
        .with_labels(labels)
        .run()
        .unwrap();

    assert_eq!(out.stats.mode, LiftMode::Merge);
    assert_eq!(out.column("node1;label"), vec!["va", "va", "vb", ""]);
    assert_eq!(out.stats.labels_found, 2);
    assert_eq!(out.stats.rows_lifted, 3);
}

#[test]
fn test_merge_accumulates_multi_valued_labels() {
    let input = edge_table(&[&["A", "P1", "x", "e1"]]);
    let labels = edge_table(&[
        &["A", "label", "'b'", "l1"],
        &["A", "label", "'a'", "l2"],
        &["A", "label", "'b'", "l3"],
    ]);

    let merged = LiftRunBuilder::new(input.clone())
        .with_config(merge_config())
        .with_labels(labels.clone())
        .run()
        .unwrap();
    assert_eq!(merged.column("node1;label"), vec!["'a'|'b'"]);

    let concatenated = LiftRunBuilder::new(input)
        .with_config(merge_config().suppress_duplicate_labels(false))
        .with_labels(labels)
        .run()
        .unwrap();
    assert_eq!(concatenated.column("node1;label"), vec!["'b'|'a'|'b'"]);
}

#[test]
fn test_merge_selector_skips_rows_without_advancing() {
    let input = edge_table(&[
        &["A", "P279", "x", "e1"],
        &["A", "P31", "y", "e2"],
        &["B", "P279", "z", "e3"],
        &["B", "P31", "w", "e4"],
    ]);
    let labels = edge_table(&[&["A", "label", "va", "l1"], &["B", "label", "vb", "l2"]]);
    let config = merge_config()
        .input_select_value("P31")
        .update_select_value("P31;lifted");

    let out = LiftRunBuilder::new(input)
        .with_config(config)
        .with_labels(labels)
        .run()
        .unwrap();

    assert_eq!(out.column("node1;label"), vec!["", "va", "", "vb"]);
    assert_eq!(out.column("label"), vec!["P279", "P31;lifted", "P279", "P31;lifted"]);
}

#[test]
fn test_merge_label_source_exhausted_early() {
    let input = edge_table(&[&["B", "P1", "x", "e1"], &["C", "P1", "y", "e2"]]);
    let labels = edge_table(&[&["A", "label", "va", "l1"]]);

    let out = LiftRunBuilder::new(input)
        .with_config(merge_config())
        .with_labels(labels)
        .run()
        .unwrap();

    assert_eq!(out.column("node1;label"), vec!["", ""]);
    assert_eq!(out.stats.labels_found, 0);
}

#[test]
fn test_suppress_empty_columns_forces_in_memory() {
    let input = edge_table(&[&["A", "P1", "x", "e1"]]);
    let labels = edge_table(&[&["A", "label", "va", "l1"]]);

    let out = LiftRunBuilder::new(input)
        .with_config(merge_config().suppress_empty_columns(true))
        .with_labels(labels)
        .run()
        .unwrap();

    assert_eq!(out.stats.mode, LiftMode::InMemory);
    assert_eq!(out.column("node1;label"), vec!["va"]);
}

// ============================================================================
// Properties
// ============================================================================

fn to_table(rows: &[Row]) -> MemoryTable {
    let refs: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect();
    let slices: Vec<&[&str]> = refs.iter().map(Vec::as_slice).collect();
    edge_table(&slices)
}

/// Input rows sorted on node1
fn sorted_input() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(("[a-d]", prop::sample::select(vec!["P1", "P2"])), 0..12).prop_map(
        |mut keys| {
            keys.sort();
            keys.into_iter()
                .enumerate()
                .map(|(i, (key, pred))| row(&[&key, pred, "o", &format!("e{i}")]))
                .collect()
        },
    )
}

/// Label rows sorted on node1, mixing label and non-label selectors
fn sorted_labels() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        ("[a-e]", prop::sample::select(vec!["label", "alias"]), "[xyz]{0,2}"),
        0..12,
    )
    .prop_map(|mut rows| {
        // stable: keeps the file order of values within one key
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows.into_iter()
            .enumerate()
            .map(|(i, (key, sel, value))| row(&[&key, sel, &value, &format!("l{i}")]))
            .collect()
    })
}

/// Unsorted rows over a small key space
fn edge_rows(prefix: &'static str) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(("[a-d]", "[a-d]", "[a-d]"), 0..10).prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (n1, l, n2))| row(&[&n1, &l, &n2, &format!("{prefix}{i}")]))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_in_memory_and_merge_agree(
        input in sorted_input(),
        labels in sorted_labels(),
        dedup in any::<bool>(),
        select in any::<bool>(),
    ) {
        let mut config = merge_config()
            .ok_if_no_labels(true)
            .suppress_duplicate_labels(dedup);
        if select {
            config = config.input_select_value("P1");
        }
        let in_memory_config = config
            .clone()
            .input_file_is_presorted(false)
            .label_file_is_presorted(false);

        let merged = LiftRunBuilder::new(to_table(&input))
            .with_config(config)
            .with_labels(to_table(&labels))
            .run()
            .unwrap();
        let in_memory = LiftRunBuilder::new(to_table(&input))
            .with_config(in_memory_config)
            .with_labels(to_table(&labels))
            .run()
            .unwrap();

        prop_assert_eq!(merged.stats.mode, LiftMode::Merge);
        prop_assert_eq!(in_memory.stats.mode, LiftMode::InMemory);
        prop_assert_eq!(&merged.columns, &in_memory.columns);
        prop_assert_eq!(&merged.rows, &in_memory.rows);
    }

    #[test]
    fn prop_suppress_empty_columns_only_narrows(
        input in edge_rows("e"),
        labels in edge_rows("l"),
    ) {
        // keys and values share one alphabet, so some lifts hit
        let labels: Vec<Row> = labels
            .into_iter()
            .map(|mut r| { r[1] = "label".to_string(); r })
            .collect();
        let base = LiftConfig::default().ok_if_no_labels(true);

        let full = LiftRunBuilder::new(to_table(&input))
            .with_config(base.clone())
            .with_labels(to_table(&labels))
            .run()
            .unwrap();
        let narrow = LiftRunBuilder::new(to_table(&input))
            .with_config(base.suppress_empty_columns(true))
            .with_labels(to_table(&labels))
            .run()
            .unwrap();

        prop_assert!(narrow.columns.len() <= full.columns.len());
        for name in &full.columns {
            let values = full.column(name);
            if values.iter().any(|v| !v.is_empty()) {
                prop_assert!(narrow.has_column(name));
                prop_assert_eq!(narrow.column(name), values);
            }
        }
    }
}
