use times_model::{ClassifiedRecord, CodeField, DatasetKind, RawRecord, UNRESOLVED};

use super::{ClassifyContext, DatasetClassifier};
use crate::error::Result;

/// Production routes keyed by tokens 2 and 3 of the process identifier.
const ROUTES: [(&str, &str, &str); 3] = [
    ("SMR_ccs", "Steam methane reforming", "Gas-SMR with CCS"),
    ("elec_AE", "Electrolysis", "Alkaline water electrolysis"),
    (
        "elec_PEM",
        "Electrolysis",
        "Proton exchange membrane electrolysis",
    ),
];

/// Hydrogen generation and capacity by production route.
pub struct HydrogenClassifier;

impl DatasetClassifier for HydrogenClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::HydrogenGenCap
    }

    fn description(&self) -> &'static str {
        "Hydrogen generation and capacity by production route"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        let mut out = ClassifiedRecord::from_raw(kind, record);

        match record
            .code(CodeField::SectorP)
            .or_else(|| record.code(CodeField::Fuel))
        {
            Some(sector) => out.sector = sector.to_string(),
            None => ctx.note_unresolved(kind, "sector", ""),
        }

        let process = record.code(CodeField::Process).unwrap_or("");
        match route_token(process)
            .and_then(|token| ROUTES.iter().find(|(candidate, _, _)| *candidate == token))
        {
            Some((_, subsector, detail)) => {
                out.subsector = subsector.to_string();
                out.subsector_detail = detail.to_string();
            }
            None => {
                ctx.note_unresolved(kind, "subsector", process);
                out.subsector = UNRESOLVED.to_string();
                out.subsector_detail = UNRESOLVED.to_string();
            }
        }
        Ok(Some(out))
    }
}

/// `<second>_<third>` token of an `_`-separated process identifier.
fn route_token(process: &str) -> Option<String> {
    let mut parts = process.split('_').skip(1);
    let second = parts.next()?;
    let third = parts.next()?;
    Some(format!("{second}_{third}"))
}
