//! Sectoral plan grouping of the taxonomy.

use crate::record::UNRESOLVED;

const BUILT_ENVIRONMENT_DETAILS: [&str; 4] = [
    "Construction services",
    "Construction",
    "Refrigeration and AirCon",
    "Water supply, sewerage and drainage services",
];

/// Sectoral plan a (sector, subsector, subsector_detail) triple belongs to.
pub fn sectoral_plan_sector(sector: &str, subsector: &str, subsector_detail: &str) -> &'static str {
    match sector {
        "Power" | "Hydrogen" => "Electricity and Energy",
        "Residential buildings" | "Commercial buildings" => "Built environment",
        "Transport" if subsector == "Other transport" => "Electricity and Energy",
        "Transport" => "Transport",
        "Industry" => match subsector {
            "Gas Mining" | "Mining" => "Resources",
            "Agriculture" | "Forestry and logging" => "Agriculture and Land",
            _ if BUILT_ENVIRONMENT_DETAILS.contains(&subsector_detail) => "Built environment",
            _ => "Industry and Waste",
        },
        "Carbon dioxide removal" => "Carbon dioxide removal",
        "Land use sequestration" => "Agriculture and Land",
        _ => UNRESOLVED,
    }
}
