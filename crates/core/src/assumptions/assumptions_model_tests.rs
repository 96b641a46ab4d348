//! Tests for assumption storage, coupling writes, and reset semantics.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::assumptions::AssumptionVector;
    use crate::errors::Error;
    use crate::fields::{FieldId, ModelVariant};

    fn fcf_margin_defaults() -> BTreeMap<FieldId, Vec<f64>> {
        let mut defaults = BTreeMap::new();
        defaults.insert(FieldId::RevenueGrowth, vec![0.08; 5]);
        defaults.insert(FieldId::GrossMargin, vec![0.60; 5]);
        defaults.insert(FieldId::OpexPct, vec![0.35; 5]);
        defaults.insert(FieldId::TaxRate, vec![0.21; 5]);
        defaults.insert(FieldId::FcfMargin, vec![0.18; 5]);
        defaults
    }

    fn two_stage_defaults(years: f64) -> BTreeMap<FieldId, Vec<f64>> {
        let mut defaults = BTreeMap::new();
        defaults.insert(FieldId::StageOneGrowth, vec![0.10]);
        defaults.insert(FieldId::StageOneYears, vec![years]);
        defaults.insert(FieldId::TerminalGrowth, vec![0.03]);
        defaults
    }

    #[test]
    fn test_from_defaults_rejects_wrong_shape() {
        let mut defaults = fcf_margin_defaults();
        defaults.insert(FieldId::TaxRate, vec![0.21; 4]);
        let err = AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &defaults)
            .expect_err("shape mismatch must be rejected");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_from_defaults_rejects_view_fields() {
        let mut defaults = fcf_margin_defaults();
        defaults.insert(FieldId::CostOfRevenuePct, vec![0.40; 5]);
        let err = AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &defaults)
            .expect_err("views have no storage");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_from_defaults_rejects_foreign_fields() {
        let mut defaults = fcf_margin_defaults();
        defaults.insert(FieldId::DividendGrowth, vec![0.05; 5]);
        let err = AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &defaults)
            .expect_err("foreign field must be rejected");
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_set_marks_override_on_edited_cell_only() {
        let (mut vector, _) =
            AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &fcf_margin_defaults())
                .unwrap();
        vector.set(FieldId::RevenueGrowth, 2, 0.12).unwrap();

        assert!(vector.is_overridden(FieldId::RevenueGrowth, 2).unwrap());
        assert!(!vector.is_overridden(FieldId::RevenueGrowth, 1).unwrap());
        assert!(!vector.is_overridden(FieldId::GrossMargin, 2).unwrap());
        assert!((vector.get(FieldId::RevenueGrowth, 2).unwrap() - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_cost_of_revenue_writes_gross_margin_complement() {
        let (mut vector, _) =
            AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &fcf_margin_defaults())
                .unwrap();
        let canonical = vector.set(FieldId::CostOfRevenuePct, 0, 0.45).unwrap();

        assert_eq!(canonical, FieldId::GrossMargin);
        assert!((vector.get_raw(FieldId::GrossMargin, 0).unwrap() - 0.55).abs() < 1e-12);
        // Reading the view back reproduces the edited value.
        assert!((vector.get(FieldId::CostOfRevenuePct, 0).unwrap() - 0.45).abs() < 1e-12);
        // The override flag sits on the canonical field, visible from either view.
        assert!(vector.is_overridden(FieldId::GrossMargin, 0).unwrap());
        assert!(vector.is_overridden(FieldId::CostOfRevenuePct, 0).unwrap());
    }

    #[test]
    fn test_ebit_margin_writes_opex_residual() {
        let (mut vector, _) =
            AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &fcf_margin_defaults())
                .unwrap();
        // gm = 0.60, editing EBIT margin to 22% stores opex = 38%.
        let canonical = vector.set(FieldId::EbitMargin, 3, 0.22).unwrap();

        assert_eq!(canonical, FieldId::OpexPct);
        assert!((vector.get_raw(FieldId::OpexPct, 3).unwrap() - 0.38).abs() < 1e-12);
        assert!((vector.get(FieldId::EbitMargin, 3).unwrap() - 0.22).abs() < 1e-12);
        assert!(vector.is_overridden(FieldId::OpexPct, 3).unwrap());
    }

    #[test]
    fn test_reset_restores_values_and_clears_all_flags() {
        let (mut vector, snapshot) =
            AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &fcf_margin_defaults())
                .unwrap();
        vector.set(FieldId::RevenueGrowth, 0, 0.20).unwrap();
        vector.set(FieldId::EbitMargin, 1, 0.10).unwrap();
        vector.set(FieldId::TaxRate, 4, 0.30).unwrap();

        vector.reset(&snapshot);

        assert!((vector.get(FieldId::RevenueGrowth, 0).unwrap() - 0.08).abs() < 1e-12);
        assert!((vector.get_raw(FieldId::OpexPct, 1).unwrap() - 0.35).abs() < 1e-12);
        assert!((vector.get(FieldId::TaxRate, 4).unwrap() - 0.21).abs() < 1e-12);
        for spec in crate::fields::schema(ModelVariant::FcfMarginDcf) {
            for period in 0..5 {
                assert!(
                    !vector.is_overridden(spec.id, period).unwrap(),
                    "{:?}[{}] still overridden after reset",
                    spec.id,
                    period
                );
            }
        }
    }

    #[test]
    fn test_editing_field_a_keeps_override_on_field_b() {
        let (mut vector, _) =
            AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &fcf_margin_defaults())
                .unwrap();
        vector.set(FieldId::FcfMargin, 1, 0.25).unwrap();
        vector.set(FieldId::TaxRate, 1, 0.28).unwrap();

        assert!(vector.is_overridden(FieldId::FcfMargin, 1).unwrap());
        assert!(vector.is_overridden(FieldId::TaxRate, 1).unwrap());
    }

    #[test]
    fn test_period_out_of_range() {
        let (vector, _) =
            AssumptionVector::from_defaults(ModelVariant::FcfMarginDcf, &fcf_margin_defaults())
                .unwrap();
        let err = vector.get(FieldId::RevenueGrowth, 5).expect_err("out of range");
        assert!(matches!(err, Error::PeriodOutOfRange { period: 5, .. }));
    }

    #[test]
    fn test_two_stage_period_count_tracks_stage_one_years() {
        let (mut vector, _) =
            AssumptionVector::from_defaults(ModelVariant::TwoStageDdm, &two_stage_defaults(3.0))
                .unwrap();
        assert_eq!(vector.period_count(), 3);

        vector.set(FieldId::StageOneYears, 0, 9.0).unwrap();
        assert_eq!(vector.period_count(), 9);
        // Other fields stay scalar.
        assert!((vector.get(FieldId::StageOneGrowth, 0).unwrap() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_two_stage_period_count_clamps_to_allowed_range() {
        let (vector, _) =
            AssumptionVector::from_defaults(ModelVariant::TwoStageDdm, &two_stage_defaults(40.0))
                .unwrap();
        assert_eq!(vector.period_count(), 15);
    }
}
