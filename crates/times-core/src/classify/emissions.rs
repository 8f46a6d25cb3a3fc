use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord, UNRESOLVED};

use super::{ClassifyContext, DatasetClassifier, code_or_unresolved};
use crate::error::Result;

pub const EMISSIONS_UNIT: &str = "ktCO2e";

const CARBON_DIOXIDE_REMOVAL: &str = "Carbon dioxide removal";
const UNASSIGNED: &str = "Unassigned emissions";

/// Sector codes that already name a sector handled below.
const KNOWN_SECTORS: [&str; 6] = [
    "Industry",
    "Transport",
    "Residential buildings",
    "Commercial buildings",
    "Power",
    "Hydrogen",
];

/// CO2-equivalent emissions; every lookup falls back to "-".
pub struct EmissionsClassifier;

impl DatasetClassifier for EmissionsClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Emissions
    }

    fn description(&self) -> &'static str {
        "Emissions by sector, subsector and emission type"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.unit = EMISSIONS_UNIT.to_string();

        let sector_p = record.code(CodeField::SectorP);
        out.sector = emission_sector(ctx, sector_p);

        match out.sector.as_str() {
            "Industry" => {
                out.subsector_detail = industry_detail(ctx, record);
                out.subsector = ctx
                    .catalog
                    .lookup(MappingKind::SubsectorDetailToSubsector, &out.subsector_detail)
                    .unwrap_or(UNASSIGNED)
                    .to_string();
            }
            "Transport" | "Residential buildings" | "Commercial buildings" => {
                out.subsector_detail = ctx.lookup_or_unresolved(
                    kind,
                    MappingKind::EnduseToSubsectorDetail,
                    record.code(CodeField::Enduse),
                    "subsector_detail",
                );
                out.subsector = ctx.lookup_or_unresolved(
                    kind,
                    MappingKind::SubsectorPToSubsector,
                    record.code(CodeField::SubsectorP),
                    "subsector",
                );
            }
            CARBON_DIOXIDE_REMOVAL => {
                let (subsector, detail) = match sector_p {
                    Some("LU_CO2seq") => ("Land", "Land use sequestration"),
                    Some("DAC") => ("Engineered", "Direct air capture"),
                    code => {
                        ctx.note_unresolved(kind, "subsector", code.unwrap_or(""));
                        (UNRESOLVED, UNRESOLVED)
                    }
                };
                out.subsector = subsector.to_string();
                out.subsector_detail = detail.to_string();
            }
            "Power" | "Hydrogen" => {
                out.subsector =
                    code_or_unresolved(ctx, record, CodeField::Tech, kind, "subsector");
            }
            _ => {}
        }

        out.emis_type = emission_type(ctx, record, &out.sector);
        reclassify_removals(record, &mut out);
        Ok(Some(out))
    }
}

fn emission_sector(ctx: &mut ClassifyContext<'_>, sector_p: Option<&str>) -> String {
    match sector_p {
        Some("LU_CO2seq" | "DAC") => CARBON_DIOXIDE_REMOVAL.to_string(),
        Some("Residential") => "Residential buildings".to_string(),
        Some("Commercial") => "Commercial buildings".to_string(),
        Some(code) => match ctx.catalog.lookup(MappingKind::EmissionSector, code) {
            Some(sector) => sector.to_string(),
            None => {
                if !KNOWN_SECTORS.contains(&code) {
                    ctx.note_unresolved(DatasetKind::Emissions, "sector", code);
                }
                code.to_string()
            }
        },
        None => {
            ctx.note_unresolved(DatasetKind::Emissions, "sector", "");
            UNRESOLVED.to_string()
        }
    }
}

/// `subsector_c`, else the mapped `subsector_p_cca`, else "Unassigned emissions".
fn industry_detail(ctx: &ClassifyContext<'_>, record: &RawRecord) -> String {
    if let Some(detail) = record.resolved_code(CodeField::SubsectorC) {
        return detail.to_string();
    }
    match record.resolved_code(CodeField::SubsectorPCca) {
        Some(code) => ctx
            .catalog
            .lookup(MappingKind::SubsectorPCcaToSubsectorDetail, code)
            .unwrap_or(code)
            .to_string(),
        None => UNASSIGNED.to_string(),
    }
}

fn emission_type(ctx: &mut ClassifyContext<'_>, record: &RawRecord, sector: &str) -> String {
    let commodity = record.code(CodeField::Commodity);
    if sector == "Industry" {
        let industry_type = match (record.code(CodeField::Varbl), commodity) {
            (Some("Emi_CO2"), Some("INDCO2N")) => Some("Energy"),
            (Some("Emi_CO2"), Some("INDCO2P")) => Some("Process"),
            (Some("Cap_CO2"), _) => Some("Capture"),
            (Some("Emi_IndCO2_energy"), _) => Some("Energy"),
            _ => None,
        };
        if let Some(emis_type) = industry_type {
            return emis_type.to_string();
        }
    }
    ctx.lookup_or_unresolved(
        DatasetKind::Emissions,
        MappingKind::CommodityToEmisType,
        commodity,
        "emis_type",
    )
}

/// Moves negative industrial emissions into carbon dioxide removal.
fn reclassify_removals(record: &RawRecord, out: &mut ClassifiedRecord) {
    if out.sector != "Industry" {
        return;
    }
    let target = if record.code(CodeField::Source) == Some("Process Negative Emissions") {
        ("Engineered", "Mineral carbonation")
    } else if out.subsector == "Forestry and logging" && out.emis_type == "Process" {
        ("Land", "Forestry and logging")
    } else {
        return;
    };
    out.sector = CARBON_DIOXIDE_REMOVAL.to_string();
    out.subsector = target.0.to_string();
    out.subsector_detail = target.1.to_string();
    out.emis_type = "Sequestration".to_string();
}
