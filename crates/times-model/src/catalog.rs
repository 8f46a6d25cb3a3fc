//! Read-only catalog of code → category lookup tables.
//!
//! The catalog is built once before any dataset is processed and is only
//! read afterwards, so it can be shared between dataset runs freely.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{MappingMissError, ModelError, Result};

/// The lookup tables consulted by the classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MappingKind {
    EnduseToSubsectorDetail,
    SubsectorDetailToSubsector,
    SubsectorPToSubsector,
    SubsectorPCcaToSubsectorDetail,
    CommodityToEmisType,
    TechToTechnology,
    ProcessCodeToTechDetail,
    EmissionSector,
}

impl MappingKind {
    pub const ALL: [MappingKind; 8] = [
        MappingKind::EnduseToSubsectorDetail,
        MappingKind::SubsectorDetailToSubsector,
        MappingKind::SubsectorPToSubsector,
        MappingKind::SubsectorPCcaToSubsectorDetail,
        MappingKind::CommodityToEmisType,
        MappingKind::TechToTechnology,
        MappingKind::ProcessCodeToTechDetail,
        MappingKind::EmissionSector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MappingKind::EnduseToSubsectorDetail => "enduse→subsector_detail",
            MappingKind::SubsectorDetailToSubsector => "subsector_detail→subsector",
            MappingKind::SubsectorPToSubsector => "subsector_p→subsector",
            MappingKind::SubsectorPCcaToSubsectorDetail => "subsector_p_cca→subsector_detail",
            MappingKind::CommodityToEmisType => "commodity→emis_type",
            MappingKind::TechToTechnology => "tech→technology",
            MappingKind::ProcessCodeToTechDetail => "process_code→tech_detail",
            MappingKind::EmissionSector => "sector_p→emission sector",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            MappingKind::EnduseToSubsectorDetail => "enduse_to_subsector_detail_mapping.csv",
            MappingKind::SubsectorDetailToSubsector => {
                "subsector_detail_to_subsector_mapping_v2.csv"
            }
            MappingKind::SubsectorPToSubsector => "subsector_p_to_subsector_mapping.csv",
            MappingKind::SubsectorPCcaToSubsectorDetail => {
                "subsector_p_cca_to_subsector_detail_mapping.csv"
            }
            MappingKind::CommodityToEmisType => "commodity_to_emission_type_mapping.csv",
            MappingKind::TechToTechnology => "tech_to_technology_mapping.csv",
            MappingKind::ProcessCodeToTechDetail => "process_code_to_tech_detail_mapping.csv",
            MappingKind::EmissionSector => "emis_sector_mapping.csv",
        }
    }

    /// Tables that must be present for a run to start.
    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            MappingKind::SubsectorPCcaToSubsectorDetail | MappingKind::EmissionSector
        )
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable key → value table with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    kind: MappingKind,
    entries: HashMap<String, String>,
}

impl MappingTable {
    pub fn new(kind: MappingKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Builds a table from (key, value) pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateMappingKey`] if a key repeats.
    pub fn from_pairs<K, V>(kind: MappingKind, pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(kind);
        for (key, value) in pairs {
            table.insert(key.into(), value.into())?;
        }
        Ok(table)
    }

    /// Adds one entry; keys are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateMappingKey`] if the key already exists.
    pub fn insert(&mut self, key: String, value: String) -> Result<()> {
        let key = key.trim().to_string();
        if self.entries.contains_key(&key) {
            return Err(ModelError::DuplicateMappingKey {
                table: self.kind,
                key,
            });
        }
        self.entries.insert(key, value.trim().to_string());
        Ok(())
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All lookup tables of a run.
#[derive(Debug, Clone, Default)]
pub struct MappingCatalog {
    tables: BTreeMap<MappingKind, MappingTable>,
}

impl MappingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the table of its kind.
    pub fn insert(&mut self, table: MappingTable) {
        self.tables.insert(table.kind(), table);
    }

    #[must_use]
    pub fn with_table(mut self, table: MappingTable) -> Self {
        self.insert(table);
        self
    }

    pub fn table(&self, kind: MappingKind) -> Option<&MappingTable> {
        self.tables.get(&kind)
    }

    pub fn has(&self, kind: MappingKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// Value of `code` in `kind`, `None` if the table or the key is missing.
    pub fn lookup(&self, kind: MappingKind, code: &str) -> Option<&str> {
        self.tables.get(&kind).and_then(|table| table.get(code))
    }

    /// Value of `code` in `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingMissError`] if the table or the key is missing.
    pub fn require(&self, kind: MappingKind, code: &str) -> std::result::Result<&str, MappingMissError> {
        self.lookup(kind, code).ok_or_else(|| MappingMissError {
            table: kind,
            code: code.trim().to_string(),
        })
    }

    /// Required tables that are not loaded.
    pub fn missing_required(&self) -> Vec<MappingKind> {
        MappingKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required() && !self.has(*kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
