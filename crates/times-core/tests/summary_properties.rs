//! End-to-end properties of classification, aggregation and gap filling.

use std::collections::BTreeMap;

use times_core::{build_summaries, to_long, to_wide};
use times_model::{
    CategoryKey, CodeField, DatasetKind, KeyField, MappingCatalog, MappingKind, MappingTable,
    RawRecord, RunOptions, SummaryKind,
};

fn catalog() -> MappingCatalog {
    MappingCatalog::new()
        .with_table(
            MappingTable::from_pairs(
                MappingKind::EnduseToSubsectorDetail,
                [("Cars", "Passenger cars"), ("SpaceHeat", "Space heating")],
            )
            .unwrap(),
        )
        .with_table(
            MappingTable::from_pairs(
                MappingKind::SubsectorDetailToSubsector,
                [("Passenger cars", "Road transport")],
            )
            .unwrap(),
        )
        .with_table(
            MappingTable::from_pairs(MappingKind::SubsectorPToSubsector, [("Office", "Offices")])
                .unwrap(),
        )
        .with_table(
            MappingTable::from_pairs(
                MappingKind::TechToTechnology,
                [("ECOAL", "Coal"), ("EWND", "Wind")],
            )
            .unwrap(),
        )
}

fn car(scenario: &str, year: i32, val: f64) -> RawRecord {
    RawRecord::new(scenario, year, val, "PJ")
        .with_state("NSW")
        .with_code(CodeField::SectorP, "Transport")
        .with_code(CodeField::Enduse, "Cars")
        .with_code(CodeField::Fuel, "Petrol")
}

fn power(fuel: &str, tech: &str, year: i32, val: f64) -> RawRecord {
    RawRecord::new("base", year, val, "PJ")
        .with_state("NSW")
        .with_code(CodeField::Fuel, fuel)
        .with_code(CodeField::TechGroup, "Generation")
        .with_code(CodeField::Tech, tech)
}

fn office(varbl: &str, override_fuel: &str, year: i32, val: f64) -> RawRecord {
    RawRecord::new("base", year, val, "PJ")
        .with_state("NSW")
        .with_code(CodeField::Varbl, varbl)
        .with_code(CodeField::BuildingType, "Office")
        .with_code(CodeField::Enduse, "SpaceHeat")
        .with_code(CodeField::Fuel, "Gas")
        .with_code(CodeField::FuelOverride, override_fuel)
}

fn transport_key(scenario: &str) -> CategoryKey {
    CategoryKey::from_iter([
        scenario,
        "NSW",
        "Transport",
        "Road transport",
        "Passenger cars",
        "Petrol",
        "Petrol",
        "PJ",
    ])
}

#[test]
fn midpoint_year_is_filled() {
    let datasets = BTreeMap::from([(
        DatasetKind::Transport,
        vec![car("base", 2020, 10.0), car("base", 2030, 20.0)],
    )]);

    let run = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();

    let energy = run.table(SummaryKind::Energy).unwrap();
    let row = energy.row(&transport_key("base")).unwrap();
    assert_eq!(row.get(2020), Some(10.0));
    assert_eq!(row.get(2025), Some(15.0));
    assert_eq!(row.get(2030), Some(20.0));
}

#[test]
fn scenarios_stay_separate() {
    let datasets = BTreeMap::from([(
        DatasetKind::Transport,
        vec![car("base", 2030, 1.0), car("net-zero", 2030, 2.0)],
    )]);

    let run = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();

    let energy = run.table(SummaryKind::Energy).unwrap();
    assert_eq!(energy.len(), 2);
    assert_eq!(
        energy.row(&transport_key("net-zero")).unwrap().get(2030),
        Some(2.0)
    );
}

#[test]
fn wind_never_reaches_a_summary() {
    let datasets = BTreeMap::from([(
        DatasetKind::Power,
        vec![
            power("Black coal", "ECOAL", 2030, 5.0),
            power("Wind", "EWND", 2030, 9.0),
        ],
    )]);

    let run = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();

    let energy = run.table(SummaryKind::Energy).unwrap();
    let fuel_position = energy.schema().position(KeyField::StartFuel).unwrap();
    assert!(
        energy
            .rows()
            .all(|(key, _)| key.get(fuel_position) != Some("Wind"))
    );
    assert_eq!(run.datasets[0].dropped, 1);
}

#[test]
fn commercial_switches_feed_both_summaries() {
    let datasets = BTreeMap::from([(
        DatasetKind::Commercial,
        vec![
            office("IESTCS_EnInt", "-", 2030, 2.0).with_val_den(1.0),
            office("IESTCS_Out", "-", 2030, 3.0),
            office("IESTCS_EnInt", "Electricity", 2030, 1.0).with_val_den(1.0),
            office("IESTCS_Out", "Electricity", 2030, 4.0),
        ],
    )]);

    let run = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();

    let energy = run.table(SummaryKind::Energy).unwrap();
    assert_eq!(energy.len(), 2);
    let switching = run.table(SummaryKind::FuelSwitching).unwrap();
    assert_eq!(switching.len(), 1);
    let (key, series) = switching.rows().next().unwrap();
    assert_eq!(key.get(5), Some("Gas"));
    assert_eq!(key.get(6), Some("Electricity"));
    assert_eq!(series.get(2030), Some(4.0));
}

#[test]
fn state_and_sectoral_plan_columns_follow_options() {
    let datasets = BTreeMap::from([(DatasetKind::Transport, vec![car("base", 2030, 1.0)])]);
    let options = RunOptions {
        split_by_state: false,
        sectoral_plans: true,
        ..RunOptions::default()
    };

    let run = build_summaries(&datasets, &catalog(), &options).unwrap();

    let energy = run.table(SummaryKind::Energy).unwrap();
    assert!(!energy.schema().contains(KeyField::State));
    let (key, _) = energy.rows().next().unwrap();
    assert_eq!(key.values().last().map(String::as_str), Some("Transport"));
}

#[test]
fn pipeline_is_idempotent() {
    let datasets = BTreeMap::from([(
        DatasetKind::Transport,
        vec![
            car("base", 2018, 0.0),
            car("base", 2020, 10.0),
            car("base", 2025, 35.0),
        ],
    )]);

    let first = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();
    let second = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();

    assert_eq!(first.tables, second.tables);
    let row = first
        .table(SummaryKind::Energy)
        .unwrap()
        .row(&transport_key("base"))
        .unwrap();
    assert_eq!(row.get(2019), Some(5.0));
    assert_eq!(row.get(2022), Some(20.0));
}

#[test]
fn gap_filled_tables_survive_long_round_trip() {
    let datasets = BTreeMap::from([(
        DatasetKind::Transport,
        vec![
            car("base", 2020, 1.5),
            car("base", 2027, 8.25),
            car("net-zero", 2022, 3.0),
        ],
    )]);
    let run = build_summaries(&datasets, &catalog(), &RunOptions::default()).unwrap();
    let energy = run.table(SummaryKind::Energy).unwrap();

    let rebuilt = to_wide(energy.schema().clone(), to_long(energy));

    assert_eq!(&rebuilt, energy);
}
