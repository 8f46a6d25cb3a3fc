//! CSV export of summary tables.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use times_core::to_frame;
use times_model::{OutputLayout, SummaryKind, SummaryTable};

use crate::error::{OutputError, Result};

/// A summary file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSummary {
    pub kind: SummaryKind,
    pub path: PathBuf,
    /// Data rows in the file.
    pub rows: usize,
}

/// Path of a summary's CSV file in `dir`.
pub fn summary_path(dir: &Path, kind: SummaryKind) -> PathBuf {
    dir.join(format!("{}.csv", kind.file_stem()))
}

/// Writes one summary as CSV in the given layout.
pub fn write_summary(
    dir: &Path,
    kind: SummaryKind,
    table: &SummaryTable,
    layout: OutputLayout,
) -> Result<WrittenSummary> {
    let path = summary_path(dir, kind);
    let mut df = to_frame(table, layout)?;
    let mut file = File::create(&path).map_err(|source| OutputError::CreateFile {
        path: path.clone(),
        source,
    })?;
    write_csv(&mut file, &mut df, &path)?;
    info!(
        summary = kind.as_str(),
        path = %path.display(),
        rows = df.height(),
        layout = %layout,
        "Summary written"
    );
    Ok(WrittenSummary {
        kind,
        path,
        rows: df.height(),
    })
}

/// Writes every summary of a run into `dir`.
pub fn write_summaries(
    dir: &Path,
    tables: &BTreeMap<SummaryKind, SummaryTable>,
    layout: OutputLayout,
) -> Result<Vec<WrittenSummary>> {
    tables
        .iter()
        .map(|(kind, table)| write_summary(dir, *kind, table, layout))
        .collect()
}

/// Renders a summary as CSV text.
pub fn render_csv(table: &SummaryTable, layout: OutputLayout) -> Result<String> {
    let mut df = to_frame(table, layout)?;
    let mut buffer = Vec::new();
    write_csv(&mut buffer, &mut df, Path::new("<memory>"))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_csv<W: std::io::Write>(writer: &mut W, df: &mut DataFrame, path: &Path) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(df)
        .map_err(|err| OutputError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}
