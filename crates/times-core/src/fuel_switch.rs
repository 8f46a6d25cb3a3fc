//! Extraction of genuine fuel transitions.

use times_model::{ClassifiedRecord, UNRESOLVED};

/// Whether a record describes a switch from one fuel to another.
///
/// Same start and end fuel, or an unresolved end fuel, is never a switch.
/// Datasets that carry the start fuel explicitly (residential) also
/// require it to be resolved.
pub fn is_switch(record: &ClassifiedRecord) -> bool {
    if record.start_fuel == record.end_fuel || record.end_fuel == UNRESOLVED {
        return false;
    }
    !(record.dataset.requires_start_fuel_for_switching() && record.start_fuel == UNRESOLVED)
}

/// Keeps the records that describe a fuel switch.
pub fn extract_switching(records: &[ClassifiedRecord]) -> Vec<ClassifiedRecord> {
    records.iter().filter(|record| is_switch(record)).cloned().collect()
}
