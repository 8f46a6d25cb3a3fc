//! Summary tables: categorical keys × yearly values.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::key::{CategoryKey, KeySchema};

/// Year → value series for one category key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearSeries(BTreeMap<i32, f64>);

impl YearSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.0.get(&year).copied()
    }

    pub fn insert(&mut self, year: i32, value: f64) {
        self.0.insert(year, value);
    }

    /// Adds `value` to the cell for `year`, creating it when absent.
    pub fn add(&mut self, year: i32, value: f64) {
        *self.0.entry(year).or_insert(0.0) += value;
    }

    pub fn first_year(&self) -> Option<i32> {
        self.0.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.0.keys().next_back().copied()
    }

    /// Nearest present year at or before `year`.
    pub fn floor(&self, year: i32) -> Option<(i32, f64)> {
        self.0
            .range(..=year)
            .next_back()
            .map(|(year, value)| (*year, *value))
    }

    /// Nearest present year at or after `year`.
    pub fn ceiling(&self, year: i32) -> Option<(i32, f64)> {
        self.0.range(year..).next().map(|(year, value)| (*year, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.0.iter().map(|(year, value)| (*year, *value))
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(i32, f64)> for YearSeries {
    fn from_iter<I: IntoIterator<Item = (i32, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Aggregated table of one summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    schema: KeySchema,
    rows: BTreeMap<CategoryKey, YearSeries>,
}

impl SummaryTable {
    pub fn new(schema: KeySchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: &CategoryKey) -> Option<&YearSeries> {
        self.rows.get(key)
    }

    pub fn rows(&self) -> btree_map::Iter<'_, CategoryKey, YearSeries> {
        self.rows.iter()
    }

    /// Sums `value` into the cell (`key`, `year`).
    pub fn add(&mut self, key: CategoryKey, year: i32, value: f64) {
        self.rows.entry(key).or_default().add(year, value);
    }

    /// Replaces the whole series of `key`.
    pub fn insert_row(&mut self, key: CategoryKey, series: YearSeries) {
        self.rows.insert(key, series);
    }

    /// Sums every cell of `other` into this table.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SchemaMismatch`] when the schemas differ.
    pub fn absorb(&mut self, other: SummaryTable) -> Result<()> {
        if other.schema != self.schema {
            return Err(ModelError::SchemaMismatch {
                expected: self.schema.to_string(),
                found: other.schema.to_string(),
            });
        }
        for (key, series) in other.rows {
            let target = self.rows.entry(key).or_default();
            for (year, value) in series.iter() {
                target.add(year, value);
            }
        }
        Ok(())
    }

    /// Smallest and largest year present in any row.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.rows.values().filter_map(YearSeries::first_year).min()?;
        let last = self.rows.values().filter_map(YearSeries::last_year).max()?;
        Some((first, last))
    }

    /// Every integer year between the table's first and last year.
    pub fn year_columns(&self) -> Vec<i32> {
        match self.year_span() {
            Some((first, last)) => (first..=last).collect(),
            None => Vec::new(),
        }
    }

    /// Number of present (key, year) cells.
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(YearSeries::len).sum()
    }
}

/// One (key, year, value) row of the long layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRow {
    pub key: CategoryKey,
    pub year: i32,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyField;

    fn schema() -> KeySchema {
        KeySchema::new(vec![KeyField::Scenario, KeyField::Sector])
    }

    fn key(scenario: &str, sector: &str) -> CategoryKey {
        [scenario, sector].into_iter().collect()
    }

    #[test]
    fn add_sums_duplicate_cells() {
        let mut table = SummaryTable::new(schema());
        table.add(key("base", "Power"), 2030, 1.5);
        table.add(key("base", "Power"), 2030, 2.5);
        table.add(key("base", "Power"), 2035, 1.0);
        let row = table.row(&key("base", "Power")).unwrap();
        assert_eq!(row.get(2030), Some(4.0));
        assert_eq!(table.cell_count(), 2);
    }

    #[test]
    fn year_columns_cover_whole_span() {
        let mut table = SummaryTable::new(schema());
        table.add(key("base", "Power"), 2020, 1.0);
        table.add(key("high", "Power"), 2023, 1.0);
        assert_eq!(table.year_columns(), vec![2020, 2021, 2022, 2023]);
    }

    #[test]
    fn absorb_sums_shared_keys_and_keeps_the_rest() {
        let mut table = SummaryTable::new(schema());
        table.add(key("base", "Power"), 2030, 1.5);
        let mut other = SummaryTable::new(schema());
        other.add(key("base", "Power"), 2030, 2.0);
        other.add(key("base", "Power"), 2035, 4.0);
        other.add(key("base", "Transport"), 2030, 3.0);

        table.absorb(other).unwrap();

        assert_eq!(table.len(), 2);
        let power = table.row(&key("base", "Power")).unwrap();
        assert_eq!(power.get(2030), Some(3.5));
        assert_eq!(power.get(2035), Some(4.0));
        assert_eq!(table.row(&key("base", "Transport")).unwrap().get(2030), Some(3.0));
    }

    #[test]
    fn absorb_rejects_other_schema() {
        let mut table = SummaryTable::new(schema());
        let other = SummaryTable::new(KeySchema::new(vec![KeyField::Scenario]));
        assert!(matches!(
            table.absorb(other),
            Err(ModelError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn floor_and_ceiling_bracket_a_year() {
        let series: YearSeries = [(2020, 10.0), (2030, 20.0)].into_iter().collect();
        assert_eq!(series.floor(2025), Some((2020, 10.0)));
        assert_eq!(series.ceiling(2025), Some((2030, 20.0)));
        assert_eq!(series.floor(2030), Some((2030, 20.0)));
        assert_eq!(series.ceiling(2031), None);
    }
}
