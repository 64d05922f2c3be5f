//! Output schema construction

use edgetab_io::TableHeader;

use crate::config::LiftConfig;
use crate::errors::{LiftError, Result};
use crate::features::lift::domain::{LiftedColumn, OutputSchema};

/// Input columns plus one target column per lifted slot.
///
/// `candidates` is the full lift list; `slots` selects the positions actually
/// lifted. The target name is `columns_to_write[slot]` when given, else the
/// input column name plus the lift suffix. A target name already present in
/// the input is overwritten in place; repeated new names share one column.
pub fn build_output_schema(
    header: &TableHeader,
    config: &LiftConfig,
    candidates: &[usize],
    slots: &[usize],
) -> Result<OutputSchema> {
    if config.columns_to_write.len() > candidates.len() {
        return Err(LiftError::config(format!(
            "{} output columns given for {} lift columns.",
            config.columns_to_write.len(),
            candidates.len()
        )));
    }

    let mut column_names = header.column_names().to_vec();
    let mut lifted = Vec::with_capacity(slots.len());

    for &slot in slots {
        let input_column = candidates[slot];
        let target = match config.columns_to_write.get(slot) {
            Some(name) => name.clone(),
            None => format!("{}{}", header.name_of(input_column), config.lift_suffix),
        };

        let output_column = match column_names.iter().position(|name| *name == target) {
            Some(existing) => existing,
            None => {
                column_names.push(target);
                column_names.len() - 1
            }
        };
        lifted.push(LiftedColumn {
            input_column,
            output_column,
        });
    }

    let new_columns = column_names.len() - header.len();
    Ok(OutputSchema {
        column_names,
        lifted,
        new_columns,
    })
}
