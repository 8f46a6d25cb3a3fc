//! Reading report exports into raw records.
//!
//! Exports are read with every column as text so that model codes such as
//! `01` or `1E` survive untouched; numeric columns are parsed per cell.

use std::path::Path;

use polars::prelude::*;
use tracing::{debug, warn};

use times_model::{CodeField, DatasetKind, RawRecord};

use crate::cells::{is_missing, parse_f64, parse_year, string_column};
use crate::error::{IngestError, Result};

/// Value column of the hydrogen exports.
const VALUE_ALIASES: [&str; 2] = ["val", "GrandTotal"];

/// Reads an export into a DataFrame with all columns as strings.
pub fn read_export_frame(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(df)
}

/// Reads an export and converts every row into a [`RawRecord`].
///
/// Rows with a blank or `NA` value are skipped; they contribute nothing to
/// any sum. Any other non-numeric value is an error.
pub fn read_dataset(path: &Path, kind: DatasetKind) -> Result<Vec<RawRecord>> {
    let df = read_export_frame(path)?;
    records_from_frame(&df, kind, path)
}

/// Converts an export frame into raw records.
pub fn records_from_frame(df: &DataFrame, kind: DatasetKind, path: &Path) -> Result<Vec<RawRecord>> {
    let scenario = required_column(df, &["scenario"], path)?;
    let year = required_column(df, &["year"], path)?;
    let val = required_column(df, &VALUE_ALIASES, path)?;
    let state = optional_column(df, &["state"])?;
    let unit = optional_column(df, &["unit"])?;
    let val_den = optional_column(df, &["val~den"])?;

    let mut codes: Vec<(CodeField, Vec<String>)> = Vec::new();
    for field in CodeField::ALL {
        let mut names = vec![field.column()];
        names.extend_from_slice(field.aliases());
        if let Some(values) = optional_column(df, &names)? {
            codes.push((field, values));
        }
    }
    debug!(
        dataset = %kind,
        path = %path.display(),
        rows = df.height(),
        code_columns = codes.len(),
        "read export"
    );

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for idx in 0..df.height() {
        if is_missing(&val[idx]) {
            skipped += 1;
            continue;
        }
        let value = parse_f64(&val[idx])
            .ok_or_else(|| invalid_value("val", &val[idx], idx, path))?;
        let year_value =
            parse_year(&year[idx]).ok_or_else(|| invalid_value("year", &year[idx], idx, path))?;
        let mut record = RawRecord::new(
            scenario[idx].clone(),
            year_value,
            value,
            unit.as_ref().map(|column| column[idx].clone()).unwrap_or_default(),
        );
        if let Some(column) = &state {
            if !column[idx].is_empty() {
                record = record.with_state(column[idx].clone());
            }
        }
        if let Some(column) = &val_den {
            if !is_missing(&column[idx]) {
                let den = parse_f64(&column[idx])
                    .ok_or_else(|| invalid_value("val~den", &column[idx], idx, path))?;
                record = record.with_val_den(den);
            }
        }
        for (field, values) in &codes {
            if !values[idx].is_empty() {
                record.codes.insert(*field, values[idx].clone());
            }
        }
        records.push(record);
    }
    if skipped > 0 {
        warn!(
            dataset = %kind,
            path = %path.display(),
            skipped,
            "rows without a value skipped"
        );
    }
    Ok(records)
}

fn invalid_value(field: &str, value: &str, idx: usize, path: &Path) -> IngestError {
    IngestError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        row: idx + 1,
        path: path.to_path_buf(),
    }
}

fn find_column<'a>(df: &'a DataFrame, names: &[&str]) -> Option<&'a str> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .find(|column| {
            let column = column.trim().trim_start_matches('\u{feff}');
            names.iter().any(|name| column.eq_ignore_ascii_case(name))
        })
}

fn required_column(df: &DataFrame, names: &[&str], path: &Path) -> Result<Vec<String>> {
    match find_column(df, names) {
        Some(column) => Ok(string_column(df, column)?),
        None => Err(IngestError::MissingColumn {
            column: names[0].to_string(),
            path: path.to_path_buf(),
        }),
    }
}

fn optional_column(df: &DataFrame, names: &[&str]) -> Result<Option<Vec<String>>> {
    match find_column(df, names) {
        Some(column) => Ok(Some(string_column(df, column)?)),
        None => Ok(None),
    }
}
