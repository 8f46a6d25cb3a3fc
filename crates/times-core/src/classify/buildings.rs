use tracing::warn;

use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord};

use super::intensity::join_energy_intensity;
use super::{
    ClassifyContext, DatasetClassifier, code_or_unresolved, fuels_with_override, required_code,
    sector_or,
};
use crate::error::{CoreError, Result};

/// Commercial buildings: energy demand from activity and intensity rows.
pub struct CommercialClassifier;

impl DatasetClassifier for CommercialClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Commercial
    }

    fn description(&self) -> &'static str {
        "Commercial buildings energy by building type, end use and fuel"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = sector_or(record, "Commercial buildings");

        let building = record
            .code(CodeField::BuildingType)
            .or_else(|| record.code(CodeField::SubsectorP))
            .ok_or_else(|| CoreError::MissingCode {
                dataset: kind,
                field: CodeField::BuildingType,
                scenario: record.scenario.clone(),
                year: record.year,
            })?;
        out.subsector = ctx.require(kind, MappingKind::SubsectorPToSubsector, building)?;

        let enduse = required_code(record, CodeField::Enduse, kind)?;
        out.subsector_detail = ctx.require(kind, MappingKind::EnduseToSubsectorDetail, enduse)?;

        (out.start_fuel, out.end_fuel) = fuels_with_override(ctx, record, kind);
        Ok(Some(out))
    }

    fn classify_batch(
        &self,
        records: &[RawRecord],
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Vec<ClassifiedRecord>> {
        classify_with_intensity(self, records, ctx)
    }
}

/// Residential buildings: fuel switching from `fuel_switched`.
pub struct ResidentialClassifier;

impl DatasetClassifier for ResidentialClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Residential
    }

    fn description(&self) -> &'static str {
        "Residential buildings energy by dwelling type, end use and fuel"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = sector_or(record, "Residential buildings");

        let dwelling = required_code(record, CodeField::SubsectorP, kind)?;
        out.subsector = ctx.require(kind, MappingKind::SubsectorPToSubsector, dwelling)?;

        let enduse = required_code(record, CodeField::Enduse, kind)?;
        out.subsector_detail = ctx.require(kind, MappingKind::EnduseToSubsectorDetail, enduse)?;

        out.end_fuel = code_or_unresolved(ctx, record, CodeField::Fuel, kind, "end_fuel");
        out.start_fuel = record
            .resolved_code(CodeField::FuelSwitched)
            .map_or_else(|| out.end_fuel.clone(), str::to_string);
        Ok(Some(out))
    }
}

/// Classifies activity rows and attaches `energy_demand = val × intensity`.
pub(crate) fn classify_with_intensity<C: DatasetClassifier + ?Sized>(
    classifier: &C,
    records: &[RawRecord],
    ctx: &mut ClassifyContext<'_>,
) -> Result<Vec<ClassifiedRecord>> {
    let join = join_energy_intensity(records);
    if join.unmatched > 0 {
        warn!(
            dataset = %classifier.kind(),
            unmatched = join.unmatched,
            "Activity rows without an energy intensity row; energy demand set to 0"
        );
    }

    let mut classified = Vec::with_capacity(join.rows.len());
    for (record, intensity) in join.rows {
        if let Some(mut out) = classifier.classify_record(record, ctx)? {
            out.energy_demand = Some(record.val * intensity);
            classified.push(out);
        }
    }
    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::intensity::{ACTIVITY_OUTPUT, ENERGY_INTENSITY};
    use crate::classify::test_support::catalog;
    use times_model::{MappingCatalog, RunOptions};

    fn buildings_catalog() -> MappingCatalog {
        catalog(&[
            (
                MappingKind::SubsectorPToSubsector,
                &[("Office", "Offices"), ("Detached", "Houses")],
            ),
            (
                MappingKind::EnduseToSubsectorDetail,
                &[("SpaceHeat", "Space heating"), ("Cooking", "Cooking")],
            ),
        ])
    }

    fn commercial_row(varbl: &str, val: f64) -> RawRecord {
        RawRecord::new("base", 2030, val, "PJ")
            .with_state("VIC")
            .with_code(CodeField::Varbl, varbl)
            .with_code(CodeField::BuildingType, "Office")
            .with_code(CodeField::Enduse, "SpaceHeat")
            .with_code(CodeField::Fuel, "Gas")
            .with_code(CodeField::FuelOverride, "Electricity")
    }

    #[test]
    fn commercial_energy_demand_uses_intensity() {
        let catalog = buildings_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        let records = vec![
            commercial_row(ENERGY_INTENSITY, 4.0).with_val_den(2.0),
            commercial_row(ACTIVITY_OUTPUT, 10.0),
        ];

        let classified = CommercialClassifier
            .classify_batch(&records, &mut ctx)
            .unwrap();

        assert_eq!(classified.len(), 1);
        let out = &classified[0];
        assert_eq!(out.sector, "Commercial buildings");
        assert_eq!(out.subsector, "Offices");
        assert_eq!(out.subsector_detail, "Space heating");
        assert_eq!(out.start_fuel, "Gas");
        assert_eq!(out.end_fuel, "Electricity");
        assert_eq!(out.energy_demand, Some(20.0));
    }

    #[test]
    fn commercial_falls_back_to_subsector_code() {
        let catalog = buildings_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        let mut record = commercial_row(ACTIVITY_OUTPUT, 1.0);
        record.codes.remove(&CodeField::BuildingType);
        let record = record.with_code(CodeField::SubsectorP, "Office");

        let out = CommercialClassifier
            .classify_record(&record, &mut ctx)
            .unwrap()
            .unwrap();

        assert_eq!(out.subsector, "Offices");
    }

    #[test]
    fn residential_switch_comes_from_fuel_switched() {
        let catalog = buildings_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        let record = RawRecord::new("base", 2030, 3.0, "PJ")
            .with_code(CodeField::SubsectorP, "Detached")
            .with_code(CodeField::Enduse, "Cooking")
            .with_code(CodeField::Fuel, "Electricity")
            .with_code(CodeField::FuelSwitched, "Gas");

        let out = ResidentialClassifier
            .classify_record(&record, &mut ctx)
            .unwrap()
            .unwrap();

        assert_eq!(out.sector, "Residential buildings");
        assert_eq!(out.subsector, "Houses");
        assert_eq!(out.start_fuel, "Gas");
        assert_eq!(out.end_fuel, "Electricity");
        assert_eq!(out.energy_demand, None);
    }

    #[test]
    fn residential_without_switch_keeps_fuel() {
        let catalog = buildings_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        let record = RawRecord::new("base", 2030, 3.0, "PJ")
            .with_code(CodeField::SubsectorP, "Detached")
            .with_code(CodeField::Enduse, "Cooking")
            .with_code(CodeField::Fuel, "Gas")
            .with_code(CodeField::FuelSwitched, "-");

        let out = ResidentialClassifier
            .classify_record(&record, &mut ctx)
            .unwrap()
            .unwrap();

        assert_eq!(out.start_fuel, "Gas");
        assert_eq!(out.end_fuel, "Gas");
    }

    #[test]
    fn unknown_dwelling_is_fatal() {
        let catalog = buildings_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);
        let record = RawRecord::new("base", 2030, 3.0, "PJ")
            .with_code(CodeField::SubsectorP, "Igloo")
            .with_code(CodeField::Enduse, "Cooking")
            .with_code(CodeField::Fuel, "Gas");

        let err = ResidentialClassifier
            .classify_record(&record, &mut ctx)
            .unwrap_err();

        assert_eq!(err.missing_table(), Some(MappingKind::SubsectorPToSubsector));
    }
}
