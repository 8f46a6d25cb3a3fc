//! Energy intensity join for commercial and industry exports.
//!
//! These exports carry two kinds of rows per category: an intensity row
//! (`varbl = IESTCS_EnInt`, energy per unit of service as `val / val~den`)
//! and an activity row (`varbl = IESTCS_Out`). Energy demand is the
//! activity times the intensity of the intensity row with the same key,
//! where the key is every field except the value columns and `varbl`.
//!
//! The join runs in two passes and does not depend on row order.

use std::collections::HashMap;

use times_model::{CodeField, RawRecord};

pub const ENERGY_INTENSITY: &str = "IESTCS_EnInt";
pub const ACTIVITY_OUTPUT: &str = "IESTCS_Out";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IntensityKey<'r> {
    scenario: &'r str,
    state: Option<&'r str>,
    unit: &'r str,
    year: i32,
    codes: Vec<(CodeField, &'r str)>,
}

impl<'r> IntensityKey<'r> {
    fn of(record: &'r RawRecord) -> Self {
        Self {
            scenario: record.scenario.trim(),
            state: record
                .state
                .as_deref()
                .map(str::trim)
                .filter(|state| !state.is_empty()),
            unit: record.unit.trim(),
            year: record.year,
            codes: CodeField::ALL
                .into_iter()
                .filter(|field| *field != CodeField::Varbl)
                .filter_map(|field| record.code(field).map(|value| (field, value)))
                .collect(),
        }
    }
}

/// Activity rows paired with the intensity of their category.
#[derive(Debug)]
pub struct IntensityJoin<'r> {
    pub rows: Vec<(&'r RawRecord, f64)>,
    /// Activity rows without an intensity row; their intensity is 0.
    pub unmatched: usize,
    /// Rows that are neither activity nor intensity rows.
    pub discarded: usize,
}

/// `val / val~den`, or 0 when the denominator is zero or absent.
pub fn energy_intensity(record: &RawRecord) -> f64 {
    match record.val_den {
        Some(den) if den != 0.0 => record.val / den,
        _ => 0.0,
    }
}

/// Pairs every activity row with the intensity sharing its key.
///
/// When several intensity rows share a key the last one wins.
pub fn join_energy_intensity(records: &[RawRecord]) -> IntensityJoin<'_> {
    let mut intensities: HashMap<IntensityKey<'_>, f64> = HashMap::new();
    for record in records {
        if record.code(CodeField::Varbl) == Some(ENERGY_INTENSITY) {
            intensities.insert(IntensityKey::of(record), energy_intensity(record));
        }
    }

    let mut join = IntensityJoin {
        rows: Vec::new(),
        unmatched: 0,
        discarded: 0,
    };
    for record in records {
        match record.code(CodeField::Varbl) {
            Some(ACTIVITY_OUTPUT) => {
                let intensity = match intensities.get(&IntensityKey::of(record)) {
                    Some(intensity) => *intensity,
                    None => {
                        join.unmatched += 1;
                        0.0
                    }
                };
                join.rows.push((record, intensity));
            }
            Some(ENERGY_INTENSITY) => {}
            _ => join.discarded += 1,
        }
    }
    join
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(varbl: &str, enduse: &str, year: i32, val: f64) -> RawRecord {
        RawRecord::new("base", year, val, "PJ")
            .with_state("NSW")
            .with_code(CodeField::Varbl, varbl)
            .with_code(CodeField::Enduse, enduse)
            .with_code(CodeField::Fuel, "Gas")
    }

    #[test]
    fn activity_takes_intensity_of_same_key() {
        let records = vec![
            row(ENERGY_INTENSITY, "Heating", 2030, 6.0).with_val_den(3.0),
            row(ACTIVITY_OUTPUT, "Heating", 2030, 5.0),
            row(ENERGY_INTENSITY, "Cooling", 2030, 1.0).with_val_den(4.0),
            row(ACTIVITY_OUTPUT, "Cooling", 2030, 8.0),
        ];

        let join = join_energy_intensity(&records);

        assert_eq!(join.rows.len(), 2);
        assert_eq!(join.rows[0].1, 2.0);
        assert_eq!(join.rows[1].1, 0.25);
        assert_eq!(join.unmatched, 0);
    }

    #[test]
    fn row_order_does_not_matter() {
        let records = vec![
            row(ACTIVITY_OUTPUT, "Heating", 2030, 5.0),
            row(ACTIVITY_OUTPUT, "Heating", 2035, 5.0),
            row(ENERGY_INTENSITY, "Heating", 2035, 9.0).with_val_den(3.0),
            row(ENERGY_INTENSITY, "Heating", 2030, 6.0).with_val_den(3.0),
        ];

        let join = join_energy_intensity(&records);

        assert_eq!(join.rows[0].0.year, 2030);
        assert_eq!(join.rows[0].1, 2.0);
        assert_eq!(join.rows[1].1, 3.0);
    }

    #[test]
    fn zero_denominator_gives_zero_intensity() {
        let records = vec![
            row(ENERGY_INTENSITY, "Heating", 2030, 6.0).with_val_den(0.0),
            row(ACTIVITY_OUTPUT, "Heating", 2030, 5.0),
        ];

        let join = join_energy_intensity(&records);

        assert_eq!(join.rows[0].1, 0.0);
        assert_eq!(join.unmatched, 0);
    }

    #[test]
    fn unmatched_activity_and_other_rows_are_counted() {
        let records = vec![
            row(ACTIVITY_OUTPUT, "Heating", 2030, 5.0),
            row("IESTCS_Cap", "Heating", 2030, 1.0),
        ];

        let join = join_energy_intensity(&records);

        assert_eq!(join.rows.len(), 1);
        assert_eq!(join.rows[0].1, 0.0);
        assert_eq!(join.unmatched, 1);
        assert_eq!(join.discarded, 1);
    }

    #[test]
    fn last_intensity_row_wins() {
        let records = vec![
            row(ENERGY_INTENSITY, "Heating", 2030, 6.0).with_val_den(3.0),
            row(ENERGY_INTENSITY, "Heating", 2030, 12.0).with_val_den(3.0),
            row(ACTIVITY_OUTPUT, "Heating", 2030, 1.0),
        ];

        let join = join_energy_intensity(&records);

        assert_eq!(join.rows[0].1, 4.0);
    }

    #[test]
    fn state_separates_keys() {
        let records = vec![
            row(ENERGY_INTENSITY, "Heating", 2030, 6.0).with_val_den(3.0),
            row(ACTIVITY_OUTPUT, "Heating", 2030, 1.0).with_state("VIC"),
        ];

        let join = join_energy_intensity(&records);

        assert_eq!(join.unmatched, 1);
    }
}
