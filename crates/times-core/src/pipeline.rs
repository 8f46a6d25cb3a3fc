//! Batch pipeline from raw dataset records to gap-filled summary tables.
//!
//! Datasets are classified independently; a fatal error discards that
//! dataset before aggregation and the run continues with the others.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use times_model::{
    ClassifiedRecord, DatasetKind, MappingCatalog, RawRecord, RunOptions, SummaryKind,
    SummaryTable,
};

use crate::aggregate::aggregate;
use crate::classify::{ClassifyContext, classify_dataset};
use crate::error::{Result, UnresolvedCategory};
use crate::fuel_switch::extract_switching;
use crate::gap_fill::gap_fill;

/// Outcome of one dataset in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    pub kind: DatasetKind,
    /// Raw records read from the export.
    pub read: usize,
    /// Records that reached aggregation.
    pub classified: usize,
    /// Records dropped by the dataset's rules.
    pub dropped: usize,
    /// Unresolved-category warnings (records).
    pub warnings: usize,
    /// Fatal error that discarded the dataset.
    pub error: Option<String>,
}

impl DatasetReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Gap-filled summaries of a run with per-dataset status.
#[derive(Debug, Clone, Default)]
pub struct SummaryRun {
    pub tables: BTreeMap<SummaryKind, SummaryTable>,
    pub datasets: Vec<DatasetReport>,
    pub unresolved: Vec<UnresolvedCategory>,
}

impl SummaryRun {
    pub fn has_errors(&self) -> bool {
        self.datasets.iter().any(|report| !report.is_ok())
    }

    pub fn table(&self, kind: SummaryKind) -> Option<&SummaryTable> {
        self.tables.get(&kind)
    }
}

/// Sparse summary tables one dataset contributes.
pub fn summarize_dataset(
    kind: DatasetKind,
    records: &[ClassifiedRecord],
    options: &RunOptions,
) -> BTreeMap<SummaryKind, SummaryTable> {
    let value_field = kind.value_field();
    kind.summaries()
        .iter()
        .map(|summary| {
            let schema = summary.key_schema(options);
            let table = match summary {
                SummaryKind::FuelSwitching => {
                    aggregate(&extract_switching(records), &schema, value_field)
                }
                _ => aggregate(records, &schema, value_field),
            };
            (*summary, table)
        })
        .collect()
}

/// Classifies, aggregates and gap fills every dataset.
///
/// # Errors
///
/// Dataset failures are reported in [`SummaryRun::datasets`]; an error is
/// only returned when merging or gap filling a summary fails.
pub fn build_summaries(
    datasets: &BTreeMap<DatasetKind, Vec<RawRecord>>,
    catalog: &MappingCatalog,
    options: &RunOptions,
) -> Result<SummaryRun> {
    let run_start = Instant::now();
    let mut run = SummaryRun::default();
    let mut sparse: BTreeMap<SummaryKind, SummaryTable> = BTreeMap::new();

    for (kind, records) in datasets {
        let dataset_span = info_span!("dataset", dataset = %kind);
        let _dataset_guard = dataset_span.enter();
        let start = Instant::now();

        let mut ctx = ClassifyContext::new(catalog, options);
        let classified = classify_dataset(*kind, records, &mut ctx);
        let unresolved = ctx.take_unresolved();
        let mut report = DatasetReport {
            kind: *kind,
            read: records.len(),
            classified: 0,
            dropped: 0,
            warnings: unresolved.iter().map(|warning| warning.count).sum(),
            error: None,
        };

        let classified = match classified {
            Ok(classified) => classified,
            Err(error) => {
                warn!(
                    dataset = %kind,
                    error = %error,
                    "Dataset discarded"
                );
                report.error = Some(error.to_string());
                run.datasets.push(report);
                continue;
            }
        };
        for warning in &unresolved {
            warn!(dataset = %kind, "{warning}");
        }
        run.unresolved.extend(unresolved);

        report.classified = classified.len();
        report.dropped = records.len().saturating_sub(classified.len());

        // Datasets sharing a summary sum into one row when their keys collide.
        for (summary, table) in summarize_dataset(*kind, &classified, options) {
            match sparse.get_mut(&summary) {
                Some(existing) => existing.absorb(table)?,
                None => {
                    sparse.insert(summary, table);
                }
            }
        }

        debug!(
            dataset = %kind,
            read = report.read,
            classified = report.classified,
            dropped = report.dropped,
            duration_ms = start.elapsed().as_millis(),
            "dataset classified"
        );
        run.datasets.push(report);
    }

    for (summary, table) in sparse {
        let start = Instant::now();
        let filled = gap_fill(&table)?;
        debug!(
            summary = summary.as_str(),
            rows = filled.len(),
            sparse_cells = table.cell_count(),
            dense_cells = filled.cell_count(),
            duration_ms = start.elapsed().as_millis(),
            "summary gap filled"
        );
        run.tables.insert(summary, filled);
    }

    info!(
        datasets = run.datasets.len(),
        summaries = run.tables.len(),
        failed = run.datasets.iter().filter(|report| !report.is_ok()).count(),
        duration_ms = run_start.elapsed().as_millis(),
        "Summaries built"
    );
    Ok(run)
}
