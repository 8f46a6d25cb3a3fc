//! Dataset classifiers and their registry.
//!
//! Each dataset kind has one [`DatasetClassifier`] translating model codes
//! into the sector → subsector → subsector detail taxonomy plus the fuel,
//! technology, emission and efficiency dimensions of its summaries.
//!
//! # Architecture
//!
//! Classifiers are unit structs registered in a [`ClassifierRegistry`],
//! looked up by [`DatasetKind`]. Classification of a single record is a
//! pure function of the record, the [`MappingCatalog`] and the
//! [`RunOptions`]; datasets whose rows depend on each other (energy
//! intensity) override [`DatasetClassifier::classify_batch`].
//!
//! # Example
//!
//! ```ignore
//! use times_core::classify::{ClassifyContext, default_registry};
//!
//! let mut ctx = ClassifyContext::new(&catalog, &options);
//! let classifier = default_registry().get(DatasetKind::Transport)?;
//! let classified = classifier.classify_batch(&records, &mut ctx)?;
//! ```

mod buildings;
mod efficiency;
mod electricity;
mod emissions;
mod hydrogen;
mod industry;
pub mod intensity;
mod power;
mod transport;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use times_model::{
    ClassifiedRecord, CodeField, DatasetKind, MappingCatalog, MappingKind, RawRecord, RunOptions,
    UNRESOLVED,
};

use crate::error::{CoreError, Result, UnresolvedCategory};

pub use buildings::{CommercialClassifier, ResidentialClassifier};
pub use efficiency::{EfficiencyBuildingsClassifier, EfficiencyIndustryClassifier};
pub use electricity::{ElectricityClassifier, process_code};
pub use emissions::EmissionsClassifier;
pub use hydrogen::HydrogenClassifier;
pub use industry::IndustryClassifier;
pub use power::PowerClassifier;
pub use transport::TransportClassifier;

/// Shared state of one classification run.
///
/// Holds the read-only lookup tables and options, and tallies records that
/// fell back to a default category.
pub struct ClassifyContext<'a> {
    pub catalog: &'a MappingCatalog,
    pub options: &'a RunOptions,
    unresolved: BTreeMap<(DatasetKind, &'static str, String), usize>,
}

impl<'a> ClassifyContext<'a> {
    pub fn new(catalog: &'a MappingCatalog, options: &'a RunOptions) -> Self {
        Self {
            catalog,
            options,
            unresolved: BTreeMap::new(),
        }
    }

    /// Looks `code` up in a table that has no fallback.
    pub fn require(&self, dataset: DatasetKind, table: MappingKind, code: &str) -> Result<String> {
        self.catalog
            .require(table, code)
            .map(str::to_string)
            .map_err(|source| CoreError::mapping_miss(dataset, source))
    }

    /// Looks `code` up, falling back to "-" and recording the miss.
    pub fn lookup_or_unresolved(
        &mut self,
        dataset: DatasetKind,
        table: MappingKind,
        code: Option<&str>,
        field: &'static str,
    ) -> String {
        let catalog = self.catalog;
        match code.and_then(|code| catalog.lookup(table, code)) {
            Some(value) => value.to_string(),
            None => {
                self.note_unresolved(dataset, field, code.unwrap_or(""));
                UNRESOLVED.to_string()
            }
        }
    }

    /// Records that `field` of a `dataset` record could not be resolved.
    pub fn note_unresolved(&mut self, dataset: DatasetKind, field: &'static str, code: &str) {
        *self
            .unresolved
            .entry((dataset, field, code.trim().to_string()))
            .or_insert(0) += 1;
    }

    /// Unresolved categories tallied so far.
    pub fn unresolved(&self) -> Vec<UnresolvedCategory> {
        self.unresolved
            .iter()
            .map(|((dataset, field, code), count)| UnresolvedCategory {
                dataset: *dataset,
                field: *field,
                code: code.clone(),
                count: *count,
            })
            .collect()
    }

    /// Returns the tally and clears it.
    pub fn take_unresolved(&mut self) -> Vec<UnresolvedCategory> {
        let unresolved = self.unresolved();
        self.unresolved.clear();
        unresolved
    }
}

/// Classification rules of one dataset kind.
///
/// # Implementing a Classifier
///
/// Each classifier should:
/// 1. Implement this trait for a unit struct
/// 2. Register the classifier in [`build_default_registry`]
pub trait DatasetClassifier: Send + Sync {
    /// Dataset kind this classifier handles.
    fn kind(&self) -> DatasetKind;

    /// Returns a human-readable description of the classifier.
    fn description(&self) -> &'static str {
        "Dataset classifier"
    }

    /// Classifies one record.
    ///
    /// Returns `Ok(None)` for records the dataset's rules drop.
    ///
    /// # Errors
    ///
    /// Returns an error when a required code is absent or a required
    /// lookup misses.
    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>>;

    /// Classifies all records of a dataset export.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; no partial output is produced.
    fn classify_batch(
        &self,
        records: &[RawRecord],
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Vec<ClassifiedRecord>> {
        let mut classified = Vec::with_capacity(records.len());
        for record in records {
            if let Some(record) = self.classify_record(record, ctx)? {
                classified.push(record);
            }
        }
        Ok(classified)
    }
}

/// Registry of classifiers indexed by dataset kind.
pub struct ClassifierRegistry {
    classifiers: HashMap<DatasetKind, Box<dyn DatasetClassifier>>,
}

impl ClassifierRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            classifiers: HashMap::new(),
        }
    }

    /// Registers a classifier for its dataset kind, replacing any previous one.
    pub fn register(&mut self, classifier: Box<dyn DatasetClassifier>) {
        self.classifiers.insert(classifier.kind(), classifier);
    }

    /// Gets the classifier of a dataset kind.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoClassifier`] when none is registered.
    pub fn get(&self, kind: DatasetKind) -> Result<&dyn DatasetClassifier> {
        self.classifiers
            .get(&kind)
            .map(|classifier| classifier.as_ref())
            .ok_or(CoreError::NoClassifier(kind))
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Registered dataset kinds in processing order.
    pub fn kinds(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| self.classifiers.contains_key(kind))
            .collect()
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        build_default_registry()
    }
}

static DEFAULT_REGISTRY: OnceLock<ClassifierRegistry> = OnceLock::new();

/// Returns the registry with a classifier for every dataset kind.
pub fn default_registry() -> &'static ClassifierRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> ClassifierRegistry {
    let mut registry = ClassifierRegistry::new();
    registry.register(Box::new(TransportClassifier));
    registry.register(Box::new(CommercialClassifier));
    registry.register(Box::new(ResidentialClassifier));
    registry.register(Box::new(IndustryClassifier));
    registry.register(Box::new(PowerClassifier));
    registry.register(Box::new(EmissionsClassifier));
    registry.register(Box::new(ElectricityClassifier));
    registry.register(Box::new(HydrogenClassifier));
    registry.register(Box::new(EfficiencyIndustryClassifier));
    registry.register(Box::new(EfficiencyBuildingsClassifier));
    registry
}

/// Classifies one record of the given dataset kind.
///
/// Energy intensity of commercial and industry rows is only available
/// through [`classify_dataset`], which sees the whole export.
pub fn classify(
    record: &RawRecord,
    kind: DatasetKind,
    ctx: &mut ClassifyContext<'_>,
) -> Result<Option<ClassifiedRecord>> {
    default_registry().get(kind)?.classify_record(record, ctx)
}

/// Classifies a whole dataset export.
pub fn classify_dataset(
    kind: DatasetKind,
    records: &[RawRecord],
    ctx: &mut ClassifyContext<'_>,
) -> Result<Vec<ClassifiedRecord>> {
    default_registry().get(kind)?.classify_batch(records, ctx)
}

/// Code a classifier cannot do without.
pub(crate) fn required_code<'r>(
    record: &'r RawRecord,
    field: CodeField,
    dataset: DatasetKind,
) -> Result<&'r str> {
    record.code(field).ok_or_else(|| CoreError::MissingCode {
        dataset,
        field,
        scenario: record.scenario.clone(),
        year: record.year,
    })
}

/// Code value, or "-" with an unresolved note when absent.
pub(crate) fn code_or_unresolved(
    ctx: &mut ClassifyContext<'_>,
    record: &RawRecord,
    field: CodeField,
    dataset: DatasetKind,
    output: &'static str,
) -> String {
    match record.code(field) {
        Some(value) => value.to_string(),
        None => {
            ctx.note_unresolved(dataset, output, "");
            UNRESOLVED.to_string()
        }
    }
}

/// `sector_p`, or the dataset's literal sector when absent.
pub(crate) fn sector_or(record: &RawRecord, default: &str) -> String {
    record
        .code(CodeField::SectorP)
        .unwrap_or(default)
        .to_string()
}

/// Start fuel from `fuel`, end fuel from `fuel_override` unless unset.
pub(crate) fn fuels_with_override(
    ctx: &mut ClassifyContext<'_>,
    record: &RawRecord,
    dataset: DatasetKind,
) -> (String, String) {
    let start = code_or_unresolved(ctx, record, CodeField::Fuel, dataset, "start_fuel");
    let end = record
        .resolved_code(CodeField::FuelOverride)
        .map_or_else(|| start.clone(), str::to_string);
    (start, end)
}

#[cfg(test)]
pub(crate) mod test_support {
    use times_model::{MappingCatalog, MappingKind, MappingTable};

    pub fn catalog(tables: &[(MappingKind, &[(&str, &str)])]) -> MappingCatalog {
        let mut catalog = MappingCatalog::new();
        for (kind, pairs) in tables {
            catalog.insert(MappingTable::from_pairs(*kind, pairs.iter().copied()).unwrap());
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_dataset() {
        let registry = default_registry();
        assert_eq!(registry.len(), DatasetKind::ALL.len());
        assert_eq!(registry.kinds(), DatasetKind::ALL.to_vec());
        for kind in DatasetKind::ALL {
            assert_eq!(registry.get(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn empty_registry_reports_missing_classifier() {
        let registry = ClassifierRegistry::new();
        assert!(matches!(
            registry.get(DatasetKind::Power),
            Err(CoreError::NoClassifier(DatasetKind::Power))
        ));
    }

    #[test]
    fn unresolved_tally_groups_by_field_and_code() {
        let catalog = MappingCatalog::new();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        for _ in 0..3 {
            ctx.lookup_or_unresolved(
                DatasetKind::Emissions,
                MappingKind::CommodityToEmisType,
                Some("TRACO2"),
                "emis_type",
            );
        }
        ctx.note_unresolved(DatasetKind::Emissions, "subsector", "");

        let unresolved = ctx.take_unresolved();
        assert_eq!(unresolved.len(), 2);
        assert_eq!(unresolved[0].field, "emis_type");
        assert_eq!(unresolved[0].count, 3);
        assert!(ctx.unresolved().is_empty());
    }

    #[test]
    fn override_dash_keeps_start_fuel() {
        let catalog = MappingCatalog::new();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        let record = RawRecord::new("base", 2030, 1.0, "PJ")
            .with_code(CodeField::Fuel, "Gas")
            .with_code(CodeField::FuelOverride, "-");
        assert_eq!(
            fuels_with_override(&mut ctx, &record, DatasetKind::Commercial),
            ("Gas".to_string(), "Gas".to_string())
        );

        let switched = record.with_code(CodeField::FuelOverride, "Electricity");
        assert_eq!(
            fuels_with_override(&mut ctx, &switched, DatasetKind::Commercial),
            ("Gas".to_string(), "Electricity".to_string())
        );
    }
}
