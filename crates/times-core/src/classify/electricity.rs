use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord};

use super::{ClassifyContext, DatasetClassifier, required_code};
use crate::error::Result;

/// Electricity generation and capacity by technology.
pub struct ElectricityClassifier;

impl DatasetClassifier for ElectricityClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::ElectricityGenCap
    }

    fn description(&self) -> &'static str {
        "Electricity generation and capacity by technology"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = required_code(record, CodeField::SectorP, kind)?.to_string();

        let tech = required_code(record, CodeField::Tech, kind)?;
        out.technology = ctx.require(kind, MappingKind::TechToTechnology, tech)?;

        let code = record.code(CodeField::Process).map(process_code);
        out.technology_detail = ctx.lookup_or_unresolved(
            kind,
            MappingKind::ProcessCodeToTechDetail,
            code.as_deref(),
            "technology_detail",
        );
        Ok(Some(out))
    }
}

/// Normalises a process identifier to its technology code.
///
/// Keeps the segment between the first and second `_`, cuts it at the
/// first `-` and drops digits: `EE_CCGT2-NEW_x` becomes `CCGT`.
pub fn process_code(process: &str) -> String {
    let segment = match process.split_once('_') {
        Some((_, rest)) => rest.split('_').next().unwrap_or(rest),
        None => process,
    };
    let segment = segment.split('-').next().unwrap_or(segment);
    segment.chars().filter(|c| !c.is_ascii_digit()).collect()
}
