//! Categorical keys of summary tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::{ClassifiedRecord, UNRESOLVED};

/// A categorical column of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyField {
    Scenario,
    State,
    Sector,
    Subsector,
    SubsectorDetail,
    /// Fuel column of the energy efficiency summary.
    Fuel,
    StartFuel,
    EndFuel,
    Technology,
    TechnologyDetail,
    EmisType,
    EfficiencyCategory,
    EfficiencyType,
    Unit,
    /// Derived sectoral plan grouping.
    SectoralPlan,
}

impl KeyField {
    pub fn column(&self) -> &'static str {
        match self {
            KeyField::Scenario => "scenario",
            KeyField::State => "state",
            KeyField::Sector => "sector",
            KeyField::Subsector => "subsector",
            KeyField::SubsectorDetail => "subsector_detail",
            KeyField::Fuel => "fuel",
            KeyField::StartFuel => "start_fuel",
            KeyField::EndFuel => "end_fuel",
            KeyField::Technology => "technology",
            KeyField::TechnologyDetail => "technology_detail",
            KeyField::EmisType => "emis_type",
            KeyField::EfficiencyCategory => "efficiency_category",
            KeyField::EfficiencyType => "efficiency_type",
            KeyField::Unit => "unit",
            KeyField::SectoralPlan => "sectoral_plan_sector",
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Ordered list of the categorical columns of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    fields: Vec<KeyField>,
}

impl KeySchema {
    pub fn new(fields: Vec<KeyField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[KeyField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: KeyField) -> bool {
        self.fields.contains(&field)
    }

    pub fn position(&self, field: KeyField) -> Option<usize> {
        self.fields.iter().position(|candidate| *candidate == field)
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(KeyField::column).collect()
    }

    /// Builds the key of `record` under this schema.
    pub fn key_for(&self, record: &ClassifiedRecord) -> CategoryKey {
        CategoryKey::new(
            self.fields
                .iter()
                .map(|field| record.field(*field).to_string())
                .collect(),
        )
    }
}

impl fmt::Display for KeySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.columns().join(", "))
    }
}

/// Tuple of categorical values, one per schema field.
///
/// Every level is non-empty; blanks are stored as "-".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryKey(Vec<String>);

impl CategoryKey {
    pub fn new(values: Vec<String>) -> Self {
        Self(
            values
                .into_iter()
                .map(|value| {
                    if value.trim().is_empty() {
                        UNRESOLVED.to_string()
                    } else {
                        value
                    }
                })
                .collect(),
        )
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" / "))
    }
}
