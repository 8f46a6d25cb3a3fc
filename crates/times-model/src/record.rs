//! Raw and classified result records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetKind, ValueField};
use crate::key::KeyField;
use crate::sectoral::sectoral_plan_sector;

/// Sentinel written for every categorical level that could not be resolved.
pub const UNRESOLVED: &str = "-";

/// Returns true when a code is absent, blank, or the "-" placeholder.
pub fn is_unset(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(value) => {
            let trimmed = value.trim();
            trimmed.is_empty() || trimmed == UNRESOLVED
        }
    }
}

/// Model-internal code columns found in the report exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CodeField {
    SectorP,
    SubsectorP,
    SubsectorC,
    SubsectorPCca,
    BuildingType,
    Enduse,
    EnduseC,
    Fuel,
    FuelOverride,
    FuelSwitched,
    Commodity,
    Tech,
    /// Technology grouping of a power process.
    TechGroup,
    Process,
    Varbl,
    Source,
    EeCategory,
}

impl CodeField {
    pub const ALL: [CodeField; 17] = [
        CodeField::SectorP,
        CodeField::SubsectorP,
        CodeField::SubsectorC,
        CodeField::SubsectorPCca,
        CodeField::BuildingType,
        CodeField::Enduse,
        CodeField::EnduseC,
        CodeField::Fuel,
        CodeField::FuelOverride,
        CodeField::FuelSwitched,
        CodeField::Commodity,
        CodeField::Tech,
        CodeField::TechGroup,
        CodeField::Process,
        CodeField::Varbl,
        CodeField::Source,
        CodeField::EeCategory,
    ];

    /// Column header in the export.
    pub fn column(&self) -> &'static str {
        match self {
            CodeField::SectorP => "sector_p",
            CodeField::SubsectorP => "subsector_p",
            CodeField::SubsectorC => "subsector_c",
            CodeField::SubsectorPCca => "subsector_p_cca",
            CodeField::BuildingType => "buildingtype",
            CodeField::Enduse => "enduse",
            CodeField::EnduseC => "enduse_c",
            CodeField::Fuel => "fuel",
            CodeField::FuelOverride => "fuel_override",
            CodeField::FuelSwitched => "fuel_switched",
            CodeField::Commodity => "commodity",
            CodeField::Tech => "tech",
            CodeField::TechGroup => "technology0_process",
            CodeField::Process => "process",
            CodeField::Varbl => "varbl",
            CodeField::Source => "source",
            CodeField::EeCategory => "ee_category",
        }
    }

    /// Alternative headers accepted for the same column.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CodeField::Source => &["source_p"],
            _ => &[],
        }
    }
}

/// One row of a report export, read once and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub scenario: String,
    pub state: Option<String>,
    pub year: i32,
    pub val: f64,
    /// Denominator of intensity rows (`val~den`).
    pub val_den: Option<f64>,
    pub unit: String,
    pub codes: BTreeMap<CodeField, String>,
}

impl RawRecord {
    pub fn new(scenario: impl Into<String>, year: i32, val: f64, unit: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            state: None,
            year,
            val,
            val_den: None,
            unit: unit.into(),
            codes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_val_den(mut self, val_den: f64) -> Self {
        self.val_den = Some(val_den);
        self
    }

    #[must_use]
    pub fn with_code(mut self, field: CodeField, value: impl Into<String>) -> Self {
        self.codes.insert(field, value.into());
        self
    }

    /// Trimmed code value, `None` when absent or blank.
    pub fn code(&self, field: CodeField) -> Option<&str> {
        self.codes
            .get(&field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Code value unless absent, blank, or "-".
    pub fn resolved_code(&self, field: CodeField) -> Option<&str> {
        self.code(field).filter(|value| *value != UNRESOLVED)
    }
}

/// A record decorated with canonical taxonomy fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    pub dataset: DatasetKind,
    pub scenario: String,
    pub state: String,
    pub year: i32,
    pub unit: String,
    pub sector: String,
    pub subsector: String,
    pub subsector_detail: String,
    pub start_fuel: String,
    pub end_fuel: String,
    pub technology: String,
    pub technology_detail: String,
    pub emis_type: String,
    pub efficiency_category: String,
    pub efficiency_type: String,
    pub val: f64,
    pub energy_demand: Option<f64>,
}

impl ClassifiedRecord {
    /// Copies the identifying fields of `raw`; every category starts unresolved.
    pub fn from_raw(dataset: DatasetKind, raw: &RawRecord) -> Self {
        let state = raw
            .state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty())
            .unwrap_or(UNRESOLVED);
        Self {
            dataset,
            scenario: raw.scenario.clone(),
            state: state.to_string(),
            year: raw.year,
            unit: non_empty(&raw.unit),
            sector: UNRESOLVED.to_string(),
            subsector: UNRESOLVED.to_string(),
            subsector_detail: UNRESOLVED.to_string(),
            start_fuel: UNRESOLVED.to_string(),
            end_fuel: UNRESOLVED.to_string(),
            technology: UNRESOLVED.to_string(),
            technology_detail: UNRESOLVED.to_string(),
            emis_type: UNRESOLVED.to_string(),
            efficiency_category: UNRESOLVED.to_string(),
            efficiency_type: UNRESOLVED.to_string(),
            val: raw.val,
            energy_demand: None,
        }
    }

    /// Categorical value of `field`; blank levels read as "-".
    pub fn field(&self, field: KeyField) -> &str {
        let value = match field {
            KeyField::Scenario => self.scenario.as_str(),
            KeyField::State => self.state.as_str(),
            KeyField::Sector => self.sector.as_str(),
            KeyField::Subsector => self.subsector.as_str(),
            KeyField::SubsectorDetail => self.subsector_detail.as_str(),
            KeyField::Fuel | KeyField::EndFuel => self.end_fuel.as_str(),
            KeyField::StartFuel => self.start_fuel.as_str(),
            KeyField::Technology => self.technology.as_str(),
            KeyField::TechnologyDetail => self.technology_detail.as_str(),
            KeyField::EmisType => self.emis_type.as_str(),
            KeyField::EfficiencyCategory => self.efficiency_category.as_str(),
            KeyField::EfficiencyType => self.efficiency_type.as_str(),
            KeyField::Unit => self.unit.as_str(),
            KeyField::SectoralPlan => {
                sectoral_plan_sector(&self.sector, &self.subsector, &self.subsector_detail)
            }
        };
        if value.trim().is_empty() {
            UNRESOLVED
        } else {
            value
        }
    }

    /// Value to aggregate, `None` when the record does not carry it.
    pub fn value(&self, field: ValueField) -> Option<f64> {
        let value = match field {
            ValueField::Val => Some(self.val),
            ValueField::EnergyDemand => self.energy_demand,
        };
        value.filter(|value| !value.is_nan())
    }
}

fn non_empty(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNRESOLVED.to_string()
    } else {
        trimmed.to_string()
    }
}
