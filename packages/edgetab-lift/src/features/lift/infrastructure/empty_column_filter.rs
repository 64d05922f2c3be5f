//! Empty lift column suppression
//!
//! Changes which output columns exist, never the values written.

use edgetab_io::{Row, TableHeader};
use tracing::info;

use crate::features::lift::domain::{LabelTable, RowSelection};

/// Positions within `candidates` (ascending) whose column hits the label
/// table in at least one liftable row. Stops scanning once every candidate
/// has had a hit.
pub fn non_empty_lift_columns(
    candidates: &[usize],
    rows: &[Row],
    labels: &LabelTable,
    selection: &RowSelection,
) -> Vec<usize> {
    let mut still_empty = vec![true; candidates.len()];
    let mut remaining = candidates.len();

    for row in rows {
        if remaining == 0 {
            break;
        }
        if !selection.is_liftable(row) {
            continue;
        }
        for (slot, &idx) in candidates.iter().enumerate() {
            if still_empty[slot] && labels.contains(&row[idx]) {
                still_empty[slot] = false;
                remaining -= 1;
            }
        }
    }

    still_empty
        .into_iter()
        .enumerate()
        .filter_map(|(slot, empty)| (!empty).then_some(slot))
        .collect()
}

/// Log which candidates were dropped
pub fn report_unlifted(header: &TableHeader, candidates: &[usize], kept_slots: &[usize]) {
    let unlifted: Vec<&str> = candidates
        .iter()
        .enumerate()
        .filter(|(slot, _)| !kept_slots.contains(slot))
        .map(|(_, &idx)| header.name_of(idx))
        .collect();
    if unlifted.is_empty() {
        info!("no lifted columns are empty");
    } else {
        info!(columns = %unlifted.join(" "), "unlifted columns suppressed");
    }
}
