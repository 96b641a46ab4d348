//! Tests for session construction, reset, and recompute.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use crate::analysis::{AnalysisPayload, ModelPayload};
    use crate::fields::{FieldId, ModelVariant};
    use crate::projection::{FixedInputs, ValuationOutputs};
    use crate::session::build_sessions;

    fn ggm_payload(available: bool) -> ModelPayload {
        let mut defaults = BTreeMap::new();
        defaults.insert(FieldId::DividendGrowth, vec![0.05]);
        ModelPayload {
            variant: ModelVariant::GordonGrowth,
            available,
            actuals: Vec::new(),
            dividend_history: Vec::new(),
            defaults,
            fixed: FixedInputs {
                discount_rate: 0.08,
                latest_annual_dps: 2.0,
                current_price: 50.0,
                ..Default::default()
            },
            baseline: ValuationOutputs {
                intrinsic_value: 70.0,
                upside_downside: 0.40,
                ..Default::default()
            },
        }
    }

    fn payload(models: Vec<ModelPayload>) -> AnalysisPayload {
        AnalysisPayload {
            ticker: "KO".to_string(),
            as_of: Utc::now(),
            models,
        }
    }

    #[test]
    fn test_unavailable_variant_produces_no_session() {
        let sessions = build_sessions(&payload(vec![ggm_payload(false)])).unwrap();
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_available_variant_builds_session_with_baseline_displayed() {
        let sessions = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        assert_eq!(sessions.len(), 1);
        let session = &sessions[0];
        assert_eq!(session.ticker(), "KO");
        assert_eq!(session.variant(), ModelVariant::GordonGrowth);
        assert_eq!(session.displayed_outputs().intrinsic_value, 70.0);
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        let b = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        assert_ne!(a[0].id(), b[0].id());
    }

    #[test]
    fn test_recompute_updates_displayed_outputs() {
        let mut sessions = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        let session = &mut sessions[0];

        session.set(FieldId::DividendGrowth, 0, 0.06).unwrap();
        let result = session.recompute().unwrap();

        // D1 = 2.12, IV = 2.12 / 0.02 = 106
        assert!((result.outputs.intrinsic_value - 106.0).abs() < 1e-9);
        assert_eq!(
            session.displayed_outputs().intrinsic_value,
            result.outputs.intrinsic_value
        );
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn test_reset_is_local_and_restores_server_baseline() {
        let mut sessions = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        let session = &mut sessions[0];

        session.set(FieldId::DividendGrowth, 0, 0.07).unwrap();
        session.recompute().unwrap();
        assert_ne!(session.displayed_outputs().intrinsic_value, 70.0);

        session.reset();

        // Values and flags are back to defaults, and the display shows the
        // server's original numbers exactly, not a local re-derivation.
        assert!((session.get(FieldId::DividendGrowth, 0).unwrap() - 0.05).abs() < 1e-12);
        assert!(!session.is_overridden(FieldId::DividendGrowth, 0).unwrap());
        assert_eq!(session.displayed_outputs().intrinsic_value, 70.0);
        assert_eq!(session.displayed_outputs().upside_downside, 0.40);
    }

    #[test]
    fn test_reset_then_recompute_matches_pristine_compute() {
        let mut pristine = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        let mut edited = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();

        let expected = pristine[0].recompute().unwrap();

        let session = &mut edited[0];
        session.set(FieldId::DividendGrowth, 0, 0.07).unwrap();
        session.recompute().unwrap();
        session.reset();
        let actual = session.recompute().unwrap();

        assert_eq!(actual.outputs, expected.outputs);
    }

    #[test]
    fn test_apply_authoritative_touches_outputs_only() {
        let mut sessions = build_sessions(&payload(vec![ggm_payload(true)])).unwrap();
        let session = &mut sessions[0];
        session.set(FieldId::DividendGrowth, 0, 0.06).unwrap();
        let revision = session.revision();

        session.apply_authoritative(ValuationOutputs {
            intrinsic_value: 99.0,
            ..Default::default()
        });

        assert_eq!(session.displayed_outputs().intrinsic_value, 99.0);
        assert!((session.get(FieldId::DividendGrowth, 0).unwrap() - 0.06).abs() < 1e-12);
        assert!(session.is_overridden(FieldId::DividendGrowth, 0).unwrap());
        assert_eq!(session.revision(), revision);
    }
}
