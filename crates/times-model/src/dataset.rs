//! Dataset and summary kinds.
//!
//! A [`DatasetKind`] names one of the fixed report exports produced by the
//! model run. Each dataset feeds one or more [`SummaryKind`] tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::key::{KeyField, KeySchema};
use crate::options::RunOptions;

/// One of the supported model report exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    Transport,
    Commercial,
    Residential,
    Industry,
    Power,
    Emissions,
    ElectricityGenCap,
    HydrogenGenCap,
    EfficiencyIndustry,
    EfficiencyBuildings,
}

impl DatasetKind {
    /// All dataset kinds in processing order.
    pub const ALL: [DatasetKind; 10] = [
        DatasetKind::Transport,
        DatasetKind::Commercial,
        DatasetKind::Residential,
        DatasetKind::Industry,
        DatasetKind::Power,
        DatasetKind::Emissions,
        DatasetKind::ElectricityGenCap,
        DatasetKind::HydrogenGenCap,
        DatasetKind::EfficiencyIndustry,
        DatasetKind::EfficiencyBuildings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Transport => "transport",
            DatasetKind::Commercial => "commercial",
            DatasetKind::Residential => "residential",
            DatasetKind::Industry => "industry",
            DatasetKind::Power => "power",
            DatasetKind::Emissions => "emissions",
            DatasetKind::ElectricityGenCap => "electricity-gen-cap",
            DatasetKind::HydrogenGenCap => "hydrogen-gen-cap",
            DatasetKind::EfficiencyIndustry => "efficiency-industry",
            DatasetKind::EfficiencyBuildings => "efficiency-buildings",
        }
    }

    /// File name of the export in the model's results folder.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            DatasetKind::Transport => "FE_transport.csv",
            DatasetKind::Commercial => "FE_commercial.csv",
            DatasetKind::Residential => "FE_residential.csv",
            DatasetKind::Industry => "FE_industry.csv",
            DatasetKind::Power => "FE_power.csv",
            DatasetKind::Emissions => "CO2 emissions.csv",
            DatasetKind::ElectricityGenCap => "Elec capacity and generation.csv",
            DatasetKind::HydrogenGenCap => "H2 capacity and generation.csv",
            DatasetKind::EfficiencyIndustry => "EnEff Industry.csv",
            DatasetKind::EfficiencyBuildings => "EnEff Buildings.csv",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatasetKind::Transport => "Final energy use in transport",
            DatasetKind::Commercial => "Final energy use in commercial buildings",
            DatasetKind::Residential => "Final energy use in residential buildings",
            DatasetKind::Industry => "Final energy use in industry",
            DatasetKind::Power => "Fuel inputs to electricity generation",
            DatasetKind::Emissions => "CO2-equivalent emissions by sector",
            DatasetKind::ElectricityGenCap => "Electricity capacity and generation",
            DatasetKind::HydrogenGenCap => "Hydrogen capacity and generation",
            DatasetKind::EfficiencyIndustry => "Energy efficiency savings in industry",
            DatasetKind::EfficiencyBuildings => "Energy efficiency savings in buildings",
        }
    }

    /// Summaries this dataset contributes rows to.
    pub fn summaries(&self) -> &'static [SummaryKind] {
        match self {
            DatasetKind::Transport | DatasetKind::Power => &[SummaryKind::Energy],
            DatasetKind::Commercial | DatasetKind::Residential | DatasetKind::Industry => {
                &[SummaryKind::Energy, SummaryKind::FuelSwitching]
            }
            DatasetKind::Emissions => &[SummaryKind::Emissions],
            DatasetKind::ElectricityGenCap => &[SummaryKind::Electricity],
            DatasetKind::HydrogenGenCap => &[SummaryKind::Hydrogen],
            DatasetKind::EfficiencyIndustry | DatasetKind::EfficiencyBuildings => {
                &[SummaryKind::EnergyEfficiency]
            }
        }
    }

    /// Value summed into the summary tables.
    ///
    /// Commercial and industry exports report activity and intensity rows;
    /// their energy use is the derived `energy_demand`.
    pub fn value_field(&self) -> ValueField {
        match self {
            DatasetKind::Commercial | DatasetKind::Industry => ValueField::EnergyDemand,
            _ => ValueField::Val,
        }
    }

    /// Whether start fuel "-" also disqualifies a record from fuel switching.
    pub fn requires_start_fuel_for_switching(&self) -> bool {
        matches!(self, DatasetKind::Residential)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownDataset(s.to_string()))
    }
}

/// Which numeric column of a classified record is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    Val,
    EnergyDemand,
}

/// One of the output summary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryKind {
    Energy,
    FuelSwitching,
    Emissions,
    Electricity,
    EnergyEfficiency,
    Hydrogen,
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 6] = [
        SummaryKind::Energy,
        SummaryKind::FuelSwitching,
        SummaryKind::Emissions,
        SummaryKind::Electricity,
        SummaryKind::EnergyEfficiency,
        SummaryKind::Hydrogen,
    ];

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Energy => "Energy",
            SummaryKind::FuelSwitching => "Fuel switching",
            SummaryKind::Emissions => "Emissions",
            SummaryKind::Electricity => "Elec gen cap",
            SummaryKind::EnergyEfficiency => "Energy efficiency",
            SummaryKind::Hydrogen => "H2 gen cap",
        }
    }

    /// Output file stem.
    pub fn file_stem(&self) -> &'static str {
        match self {
            SummaryKind::Energy => "energy",
            SummaryKind::FuelSwitching => "fuel-switch",
            SummaryKind::Emissions => "emissions",
            SummaryKind::Electricity => "electricity-gen-cap",
            SummaryKind::EnergyEfficiency => "energy-efficiency",
            SummaryKind::Hydrogen => "hydrogen-generation-capacity",
        }
    }

    /// Datasets feeding this summary.
    pub fn sources(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| kind.summaries().contains(self))
            .collect()
    }

    /// Categorical columns of this summary under the given options.
    pub fn key_schema(&self, options: &RunOptions) -> KeySchema {
        let mut fields = vec![KeyField::Scenario];
        if options.split_by_state {
            fields.push(KeyField::State);
        }
        match self {
            SummaryKind::Energy | SummaryKind::FuelSwitching => fields.extend([
                KeyField::Sector,
                KeyField::Subsector,
                KeyField::SubsectorDetail,
                KeyField::StartFuel,
                KeyField::EndFuel,
                KeyField::Unit,
            ]),
            SummaryKind::Emissions => fields.extend([
                KeyField::Sector,
                KeyField::Subsector,
                KeyField::SubsectorDetail,
                KeyField::EmisType,
                KeyField::Unit,
            ]),
            SummaryKind::Electricity => fields.extend([
                KeyField::Sector,
                KeyField::Technology,
                KeyField::TechnologyDetail,
                KeyField::Unit,
            ]),
            SummaryKind::EnergyEfficiency => fields.extend([
                KeyField::Sector,
                KeyField::Subsector,
                KeyField::SubsectorDetail,
                KeyField::Fuel,
                KeyField::EfficiencyCategory,
                KeyField::EfficiencyType,
                KeyField::Unit,
            ]),
            SummaryKind::Hydrogen => fields.extend([
                KeyField::Sector,
                KeyField::Subsector,
                KeyField::SubsectorDetail,
                KeyField::Unit,
            ]),
        }
        if options.sectoral_plans {
            fields.push(KeyField::SectoralPlan);
        }
        KeySchema::new(fields)
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_parses_case_insensitively() {
        assert_eq!(
            "Electricity_Gen_Cap".parse::<DatasetKind>().unwrap(),
            DatasetKind::ElectricityGenCap
        );
        assert!("biofuel".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn fuel_switching_sources_are_buildings_and_industry() {
        assert_eq!(
            SummaryKind::FuelSwitching.sources(),
            vec![
                DatasetKind::Commercial,
                DatasetKind::Residential,
                DatasetKind::Industry
            ]
        );
    }

    #[test]
    fn state_and_sectoral_plan_columns_follow_options() {
        let options = RunOptions {
            split_by_state: false,
            sectoral_plans: true,
            ..RunOptions::default()
        };
        let schema = SummaryKind::Emissions.key_schema(&options);
        assert_eq!(
            schema.columns(),
            vec![
                "scenario",
                "sector",
                "subsector",
                "subsector_detail",
                "emis_type",
                "unit",
                "sectoral_plan_sector"
            ]
        );

    }

    #[test]
    fn every_summary_gets_sectoral_plan_column_when_enabled() {
        let enabled = RunOptions {
            sectoral_plans: true,
            ..RunOptions::default()
        };
        for kind in SummaryKind::ALL {
            let schema = kind.key_schema(&enabled);
            assert!(schema.contains(KeyField::SectoralPlan), "{kind}");
            assert!(!kind
                .key_schema(&RunOptions::default())
                .contains(KeyField::SectoralPlan));
        }
        assert_eq!(
            SummaryKind::Electricity
                .key_schema(&enabled)
                .columns()
                .last()
                .copied(),
            Some("sectoral_plan_sector")
        );
    }
}
