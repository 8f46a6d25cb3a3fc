use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord};

use super::buildings::classify_with_intensity;
use super::{ClassifyContext, DatasetClassifier, fuels_with_override, required_code, sector_or};
use crate::error::Result;

/// Industry final energy: subsector detail is the industry code itself.
pub struct IndustryClassifier;

impl DatasetClassifier for IndustryClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Industry
    }

    fn description(&self) -> &'static str {
        "Industry energy by subsector and fuel"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = sector_or(record, "Industry");

        out.subsector_detail = required_code(record, CodeField::SubsectorC, kind)?.to_string();
        out.subsector = ctx.require(
            kind,
            MappingKind::SubsectorDetailToSubsector,
            &out.subsector_detail,
        )?;

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
