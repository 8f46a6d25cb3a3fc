//! Wide and long layouts of summary tables.

use polars::prelude::*;

use times_model::{CategoryKey, KeySchema, LongRow, OutputLayout, SummaryTable};

use crate::error::Result;

/// One row per present (key, year) cell.
pub fn to_long(table: &SummaryTable) -> Vec<LongRow> {
    table
        .rows()
        .flat_map(|(key, series)| {
            series.iter().map(move |(year, value)| LongRow {
                key: key.clone(),
                year,
                value,
            })
        })
        .collect()
}

/// Rebuilds the wide table from long rows; duplicate cells are summed.
pub fn to_wide<I>(schema: KeySchema, rows: I) -> SummaryTable
where
    I: IntoIterator<Item = LongRow>,
{
    let mut table = SummaryTable::new(schema);
    for row in rows {
        table.add(row.key, row.year, row.value);
    }
    table
}

/// Converts a table into a DataFrame in the requested layout.
///
/// Wide frames carry one Float64 column per year of the table's range,
/// null where a row has no value. Long frames carry `year` and `value`.
pub fn to_frame(table: &SummaryTable, layout: OutputLayout) -> Result<DataFrame> {
    match layout {
        OutputLayout::Wide => wide_frame(table),
        OutputLayout::Long => long_frame(table),
    }
}

fn key_columns<'k>(
    schema: &KeySchema,
    keys: impl Iterator<Item = &'k CategoryKey> + Clone,
) -> Vec<Column> {
    schema
        .columns()
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<&str> = keys
                .clone()
                .map(|key| key.get(idx).unwrap_or(times_model::UNRESOLVED))
                .collect();
            Series::new(name.into(), values).into()
        })
        .collect()
}

fn wide_frame(table: &SummaryTable) -> Result<DataFrame> {
    let mut columns = key_columns(table.schema(), table.rows().map(|(key, _)| key));
    for year in table.year_columns() {
        let values: Vec<Option<f64>> = table.rows().map(|(_, series)| series.get(year)).collect();
        columns.push(Series::new(year.to_string().into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}

fn long_frame(table: &SummaryTable) -> Result<DataFrame> {
    let rows = to_long(table);
    let mut columns = key_columns(table.schema(), rows.iter().map(|row| &row.key));
    let years: Vec<i32> = rows.iter().map(|row| row.year).collect();
    let values: Vec<f64> = rows.iter().map(|row| row.value).collect();
    columns.push(Series::new("year".into(), years).into());
    columns.push(Series::new("value".into(), values).into());
    Ok(DataFrame::new(columns)?)
}
