//! Exporting a gap-filled run to a timestamped directory.

use std::collections::BTreeMap;
use std::fs;

use tempfile::TempDir;

use times_core::build_summaries;
use times_model::{
    CodeField, DatasetKind, MappingCatalog, MappingKind, MappingTable, OutputLayout, RawRecord,
    RunOptions,
};
use times_output::{create_run_dir, write_summaries};

#[test]
fn run_is_written_as_dense_csv() {
    let catalog = MappingCatalog::new().with_table(
        MappingTable::from_pairs(MappingKind::TechToTechnology, [("ECOAL", "Coal")]).unwrap(),
    );
    let record = |year: i32, val: f64| {
        RawRecord::new("base", year, val, "PJ")
            .with_state("VIC")
            .with_code(CodeField::Fuel, "Brown coal")
            .with_code(CodeField::TechGroup, "Thermal")
            .with_code(CodeField::Tech, "ECOAL")
    };
    let datasets = BTreeMap::from([(
        DatasetKind::Power,
        vec![record(2020, 100.0), record(2024, 60.0)],
    )]);
    let run = build_summaries(&datasets, &catalog, &RunOptions::default()).unwrap();
    let base = TempDir::new().unwrap();

    let dir = create_run_dir(base.path()).unwrap();
    let written = write_summaries(&dir, &run.tables, OutputLayout::Long).unwrap();

    assert_eq!(written.len(), 1);
    let csv = fs::read_to_string(&written[0].path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "scenario,state,sector,subsector,subsector_detail,start_fuel,end_fuel,unit,year,value"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[3].ends_with(",2022,80.0"));
}
