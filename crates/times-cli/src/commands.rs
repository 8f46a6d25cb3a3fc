use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use times_cli::config::{OptionFlags, RunConfig};
use times_core::{DatasetReport, build_summaries};
use times_ingest::{discover_datasets, load_mapping_catalog, read_dataset};
use times_model::{DatasetKind, SummaryKind};
use times_output::{create_run_dir, write_summaries};

use crate::cli::ProcessArgs;
use crate::summary::apply_table_style;
use crate::types::{RunResult, SummaryOverview};

pub fn run_datasets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Default file", "Summaries", "Description"]);
    apply_table_style(&mut table);
    for kind in DatasetKind::ALL {
        let summaries = kind
            .summaries()
            .iter()
            .map(SummaryKind::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            kind.as_str().to_string(),
            kind.default_file_name().to_string(),
            summaries,
            kind.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_process(args: &ProcessArgs) -> Result<RunResult> {
    let input_dir = &args.input_dir;
    let run_span = info_span!("process", input = %input_dir.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let options = config.resolve_options(OptionFlags {
        no_states: args.no_states,
        sectoral_plans: args.sectoral_plans,
        layout: args.format.map(Into::into),
        power_unit_conversion: args.power_unit_conversion,
    });
    let overrides = config.input_overrides()?;

    // Stage 1: lookup tables and dataset exports
    let mappings_dir = args
        .mappings
        .clone()
        .or_else(|| config.mappings.clone())
        .unwrap_or_else(|| input_dir.join("mappings"));
    let catalog = load_mapping_catalog(&mappings_dir)
        .with_context(|| format!("load mapping tables from {}", mappings_dir.display()))?;
    let discovered = discover_datasets(input_dir, &overrides)
        .with_context(|| format!("scan {}", input_dir.display()))?;

    let mut datasets = BTreeMap::new();
    let mut read_failures = Vec::new();
    for (kind, path) in &discovered.found {
        match read_dataset(path, *kind) {
            Ok(records) => {
                datasets.insert(*kind, records);
            }
            Err(error) => {
                warn!(dataset = %kind, error = %error, "Dataset export could not be read");
                read_failures.push(DatasetReport {
                    kind: *kind,
                    read: 0,
                    classified: 0,
                    dropped: 0,
                    warnings: 0,
                    error: Some(error.to_string()),
                });
            }
        }
    }
    if datasets.is_empty() && read_failures.is_empty() {
        warn!(input = %input_dir.display(), "No dataset exports found");
    }

    // Stage 2: classify, aggregate and gap fill
    let run = build_summaries(&datasets, &catalog, &options).context("build summaries")?;

    // Stage 3: write the run folder
    let written = if args.dry_run {
        info!("Dry run: no files written");
        None
    } else {
        let base = args
            .output_dir
            .clone()
            .unwrap_or_else(|| input_dir.join("output"));
        let dir = create_run_dir(&base)
            .with_context(|| format!("create run folder under {}", base.display()))?;
        let files = write_summaries(&dir, &run.tables, options.layout)
            .with_context(|| format!("write summaries to {}", dir.display()))?;
        Some((dir, files))
    };

    let summaries = run
        .tables
        .iter()
        .map(|(kind, table)| SummaryOverview {
            kind: *kind,
            rows: table.len(),
            year_span: table.year_span(),
            path: written.as_ref().and_then(|(_, files)| {
                files
                    .iter()
                    .find(|file| file.kind == *kind)
                    .map(|file| file.path.clone())
            }),
        })
        .collect();

    let mut reports = run.datasets.clone();
    reports.extend(read_failures);
    reports.sort_by_key(|report| report.kind);
    let has_errors = reports.iter().any(|report| !report.is_ok());

    info!(
        datasets = reports.len(),
        summaries = run.tables.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "Results processed"
    );

    Ok(RunResult {
        input_dir: input_dir.clone(),
        output_dir: written.map(|(dir, _)| dir),
        layout: options.layout,
        summaries,
        datasets: reports,
        missing: discovered.missing,
        unresolved: run.unresolved,
        has_errors,
    })
}
