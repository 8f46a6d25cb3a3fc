use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord};

use super::{ClassifyContext, DatasetClassifier, code_or_unresolved, required_code};
use crate::error::Result;

/// Transport final energy: no fuel switching, taxonomy from the end use.
pub struct TransportClassifier;

impl DatasetClassifier for TransportClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Transport
    }

    fn description(&self) -> &'static str {
        "Transport energy by end use and fuel"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = required_code(record, CodeField::SectorP, kind)?.to_string();

        let enduse = required_code(record, CodeField::Enduse, kind)?;
        out.subsector_detail = ctx.require(kind, MappingKind::EnduseToSubsectorDetail, enduse)?;
        out.subsector = ctx.require(
            kind,
            MappingKind::SubsectorDetailToSubsector,
            &out.subsector_detail,
        )?;

        let fuel = code_or_unresolved(ctx, record, CodeField::Fuel, kind, "start_fuel");
        out.end_fuel = fuel.clone();
        out.start_fuel = fuel;
        Ok(Some(out))
    }
}
