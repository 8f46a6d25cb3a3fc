use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord, UNRESOLVED};

use super::{ClassifyContext, DatasetClassifier, code_or_unresolved, required_code};
use crate::error::Result;

const INDUSTRY_CATEGORIES: [(&str, &str); 5] = [
    ("Frontier levers", "Frontier levers"),
    ("EE 1", "Process improvements"),
    ("EE 2", "Small equipment upgrades"),
    ("EE 3", "Major equipment upgrades"),
    ("ETI", "ETI upgrade"),
];

const BUILDINGS_CATEGORIES: [(&str, &str); 3] = [
    ("EE", "Commercial general"),
    ("EE new", "Residential new"),
    ("EE existing", "Residential existing"),
];

/// Industry energy efficiency savings.
pub struct EfficiencyIndustryClassifier;

impl DatasetClassifier for EfficiencyIndustryClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::EfficiencyIndustry
    }

    fn description(&self) -> &'static str {
        "Industry efficiency savings by lever"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = "Industry".to_string();

        out.subsector_detail = required_code(record, CodeField::SubsectorP, kind)?.to_string();
        out.subsector = ctx.require(
            kind,
            MappingKind::SubsectorDetailToSubsector,
            &out.subsector_detail,
        )?;

        out.efficiency_type =
            code_or_unresolved(ctx, record, CodeField::Source, kind, "efficiency_type");
        out.efficiency_category = category(ctx, record, kind, &INDUSTRY_CATEGORIES);

        let fuel = code_or_unresolved(ctx, record, CodeField::Fuel, kind, "fuel");
        out.start_fuel = fuel.clone();
        out.end_fuel = fuel;
        Ok(Some(out))
    }
}

/// Commercial and residential buildings energy efficiency savings.
pub struct EfficiencyBuildingsClassifier;

impl DatasetClassifier for EfficiencyBuildingsClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::EfficiencyBuildings
    }

    fn description(&self) -> &'static str {
        "Buildings efficiency savings by building type and end use"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        let sector_p = record.code(CodeField::SectorP);
        out.sector = match sector_p {
            Some("Commercial") => "Commercial buildings".to_string(),
            Some("Residential") => "Residential buildings".to_string(),
            code => {
                ctx.note_unresolved(kind, "sector", code.unwrap_or(""));
                UNRESOLVED.to_string()
            }
        };

        let enduse = required_code(record, CodeField::EnduseC, kind)?;
        out.subsector_detail = ctx.require(kind, MappingKind::EnduseToSubsectorDetail, enduse)?;

        let building = required_code(record, CodeField::BuildingType, kind)?;
        out.subsector = ctx.require(kind, MappingKind::SubsectorPToSubsector, building)?;

        out.efficiency_category = category(ctx, record, kind, &BUILDINGS_CATEGORIES);

        let fuel = code_or_unresolved(ctx, record, CodeField::Fuel, kind, "fuel");
        out.start_fuel = fuel.clone();
        out.end_fuel = fuel;
        Ok(Some(out))
    }
}

fn category(
    ctx: &mut ClassifyContext<'_>,
    record: &RawRecord,
    dataset: DatasetKind,
    table: &[(&str, &str)],
) -> String {
    let code = record.code(CodeField::EeCategory);
    match code.and_then(|code| table.iter().find(|(raw, _)| *raw == code)) {
        Some((_, category)) => category.to_string(),
        None => {
            ctx.note_unresolved(dataset, "efficiency_category", code.unwrap_or(""));
            UNRESOLVED.to_string()
        }
    }
}
