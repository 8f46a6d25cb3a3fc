//! Linear interpolation of missing interior years.
//!
//! Each row is filled between its own first and last present year; years
//! outside that span are never produced.

use times_model::{SummaryTable, YearSeries};

use crate::error::{CoreError, Result};

/// Fills every row of `table` into a dense yearly series.
///
/// # Errors
///
/// Returns [`CoreError::EmptySeries`] when a row has no present year.
pub fn gap_fill(table: &SummaryTable) -> Result<SummaryTable> {
    let mut filled = SummaryTable::new(table.schema().clone());
    for (key, series) in table.rows() {
        let dense = fill_series(series).ok_or_else(|| CoreError::EmptySeries {
            key: key.to_string(),
        })?;
        filled.insert_row(key.clone(), dense);
    }
    Ok(filled)
}

/// Dense series over the span of `series`, `None` when it is empty.
pub fn fill_series(series: &YearSeries) -> Option<YearSeries> {
    let first = series.first_year()?;
    let last = series.last_year()?;
    let mut dense = YearSeries::new();
    for year in first..=last {
        if let Some(value) = interpolate(series, year) {
            dense.insert(year, value);
        }
    }
    Some(dense)
}

/// Value of `year` from its nearest present neighbours.
fn interpolate(series: &YearSeries, year: i32) -> Option<f64> {
    let (prev_year, prev) = series.floor(year)?;
    let since = year - prev_year;
    if since == 0 {
        return Some(prev);
    }
    let (next_year, next) = series.ceiling(year)?;
    let to = next_year - year;
    Some(prev + (next - prev) * f64::from(since) / f64::from(since + to))
}
