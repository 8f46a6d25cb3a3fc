use times_model::{ClassifiedRecord, CodeField, DatasetKind, MappingKind, RawRecord};

use super::{ClassifyContext, DatasetClassifier, fuels_with_override, required_code, sector_or};
use crate::error::Result;

/// Start fuels that are outputs of generation rather than inputs.
const NON_INPUT_FUELS: [&str; 4] = ["Electricity", "Renewable", "Solar", "Wind"];

/// PJ per TWh.
const PJ_PER_TWH: f64 = 3.6;

/// Fuel inputs to power generation by technology.
pub struct PowerClassifier;

impl DatasetClassifier for PowerClassifier {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Power
    }

    fn description(&self) -> &'static str {
        "Power sector fuel use by technology"
    }

    fn classify_record(
        &self,
        record: &RawRecord,
        ctx: &mut ClassifyContext<'_>,
    ) -> Result<Option<ClassifiedRecord>> {
        let kind = self.kind();
        if record
            .code(CodeField::Fuel)
            .is_some_and(|fuel| NON_INPUT_FUELS.contains(&fuel))
        {
            return Ok(None);
        }

        let mut out = ClassifiedRecord::from_raw(kind, record);
        out.sector = sector_or(record, "Power");
        out.subsector = required_code(record, CodeField::TechGroup, kind)?.to_string();

        let tech = required_code(record, CodeField::Tech, kind)?;
        out.subsector_detail = ctx.require(kind, MappingKind::TechToTechnology, tech)?;

        (out.start_fuel, out.end_fuel) = fuels_with_override(ctx, record, kind);

        if ctx.options.power_unit_conversion {
            out.val *= PJ_PER_TWH;
            out.unit = "PJ".to_string();
        }
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::test_support::catalog;
    use times_model::{MappingCatalog, RunOptions};

    fn power_catalog() -> MappingCatalog {
        catalog(&[(
            MappingKind::TechToTechnology,
            &[("ECOAL", "Coal subcritical"), ("EWND", "Onshore wind")],
        )])
    }

    fn power_row(fuel: &str, tech: &str) -> RawRecord {
        RawRecord::new("base", 2030, 10.0, "TWh")
            .with_state("QLD")
            .with_code(CodeField::Fuel, fuel)
            .with_code(CodeField::TechGroup, "Thermal")
            .with_code(CodeField::Tech, tech)
    }

    #[test]
    fn fuel_inputs_are_classified_by_technology() {
        let catalog = power_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);

        let out = PowerClassifier
            .classify_record(&power_row("Black coal", "ECOAL"), &mut ctx)
            .unwrap()
            .unwrap();

        assert_eq!(out.sector, "Power");
        assert_eq!(out.subsector, "Thermal");
        assert_eq!(out.subsector_detail, "Coal subcritical");
        assert_eq!(out.start_fuel, "Black coal");
        assert_eq!(out.end_fuel, "Black coal");
        assert_eq!(out.unit, "TWh");
        assert_eq!(out.val, 10.0);
    }

    #[test]
    fn renewable_outputs_are_dropped() {
        let catalog = power_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);

        for fuel in NON_INPUT_FUELS {
            let out = PowerClassifier
                .classify_record(&power_row(fuel, "EWND"), &mut ctx)
                .unwrap();
            assert!(out.is_none(), "{fuel} should be dropped");
        }
    }

    #[test]
    fn unit_conversion_scales_to_petajoules() {
        let catalog = power_catalog();
        let options = RunOptions {
            power_unit_conversion: true,
            ..RunOptions::default()
        };
        let mut ctx = ClassifyContext::new(&catalog, &options);

        let out = PowerClassifier
            .classify_record(&power_row("Gas", "ECOAL"), &mut ctx)
            .unwrap()
            .unwrap();

        assert_eq!(out.unit, "PJ");
        assert!((out.val - 36.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_technology_is_fatal() {
        let catalog = power_catalog();
        let options = RunOptions::default();
        let mut ctx = ClassifyContext::new(&catalog, &options);

        let err = PowerClassifier
            .classify_record(&power_row("Gas", "EGAS_NEW"), &mut ctx)
            .unwrap_err();

        assert_eq!(err.missing_table(), Some(MappingKind::TechToTechnology));
    }
}
