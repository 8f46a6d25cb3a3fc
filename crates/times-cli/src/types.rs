use std::path::PathBuf;

use times_core::{DatasetReport, UnresolvedCategory};
use times_model::{DatasetKind, OutputLayout, SummaryKind};

#[derive(Debug)]
pub struct RunResult {
    pub input_dir: PathBuf,
    /// Run folder the summaries were written to; `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub layout: OutputLayout,
    pub summaries: Vec<SummaryOverview>,
    pub datasets: Vec<DatasetReport>,
    /// Datasets whose export was not found.
    pub missing: Vec<DatasetKind>,
    pub unresolved: Vec<UnresolvedCategory>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct SummaryOverview {
    pub kind: SummaryKind,
    pub rows: usize,
    pub year_span: Option<(i32, i32)>,
    pub path: Option<PathBuf>,
}
