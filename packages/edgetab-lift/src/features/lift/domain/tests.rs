use ahash::AHashSet;

use super::*;
use crate::config::LiftConfig;

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// LabelTable
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_empty_values_never_stored() {
    let mut table = LabelTable::new(DuplicatePolicy::Merge);
    table.add("Q1", "", None);
    assert!(table.is_empty());

    table.add("Q1", "'dog'@en", None);
    table.add("Q1", "", None);
    assert_eq!(table.get("Q1"), Some("'dog'@en"));
}

#[test]
fn test_duplicate_merge_suppresses_exact_duplicates() {
    let mut table = LabelTable::new(DuplicatePolicy::Merge);
    table.add("Q2", "'cat'@en", None);
    table.add("Q2", "'cat'@en", None);
    assert_eq!(table.get("Q2"), Some("'cat'@en"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_concatenate_keeps_order() {
    let mut table = LabelTable::new(DuplicatePolicy::Concatenate);
    table.add("Q2", "'cat'@en", None);
    table.add("Q2", "'feline'@en", None);
    assert_eq!(table.get("Q2"), Some("'cat'@en|'feline'@en"));
}

#[test]
fn test_needed_filter_only_gates_new_keys() {
    let needed: AHashSet<String> = ["Q1".to_string()].into_iter().collect();
    let mut table = LabelTable::new(DuplicatePolicy::Merge);

    table.add("Q1", "a", Some(&needed));
    table.add("Q9", "z", Some(&needed));
    table.add("Q1", "b", Some(&needed));

    assert_eq!(table.get("Q1"), Some("a|b"));
    assert!(!table.contains("Q9"));
}

#[test]
fn test_accumulate_skips_empty_and_seeds_first_value() {
    let mut acc = String::new();
    DuplicatePolicy::Concatenate.accumulate(&mut acc, "");
    assert!(acc.is_empty());
    DuplicatePolicy::Concatenate.accumulate(&mut acc, "va");
    DuplicatePolicy::Concatenate.accumulate(&mut acc, "vb");
    assert_eq!(acc, "va|vb");
}

#[test]
fn test_policy_from_config() {
    let config = LiftConfig::default();
    assert_eq!(DuplicatePolicy::from_config(&config), DuplicatePolicy::Merge);

    let config = config.suppress_duplicate_labels(false);
    assert_eq!(
        DuplicatePolicy::from_config(&config),
        DuplicatePolicy::Concatenate
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// RowSelection
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_selection_without_rules_lifts_everything() {
    let selection = RowSelection::default();
    let r = row(&["Q1", "label", "x"]);
    assert!(!selection.is_label_row(&r));
    assert!(selection.is_input_selected(&r));
    assert!(selection.is_liftable(&r));
}

#[test]
fn test_selection_rules() {
    let config = LiftConfig::default().input_select_value("P31");
    let selection = RowSelection::new(&config, Some(1), Some(1));

    assert!(selection.is_label_row(&row(&["Q1", "label", "'dog'@en"])));
    assert!(!selection.is_liftable(&row(&["Q1", "label", "'dog'@en"])));
    assert!(selection.is_liftable(&row(&["Q1", "P31", "Q5"])));
    assert!(!selection.is_liftable(&row(&["Q1", "P279", "Q5"])));
}

#[test]
fn test_input_select_column_without_value_is_inactive() {
    // resolved because of update_select_value only
    let config = LiftConfig::default().update_select_value("done");
    let selection = RowSelection::new(&config, None, Some(1));
    assert!(selection.input_select.is_none());
    assert!(selection.is_input_selected(&row(&["Q1", "anything"])));
}
