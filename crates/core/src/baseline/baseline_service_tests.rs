//! Tests for default-assumption derivation from historical actuals.

#[cfg(test)]
mod tests {
    use crate::baseline::{
        derive_dividend_defaults, derive_earnings_dcf_defaults, fill_dps_growth,
        fill_growth_rates, resolve_beta, weighted_growth, CapmRates, DividendYear, GrowthPolicy,
        YearData,
    };
    use crate::errors::Error;
    use crate::fields::FieldId;

    fn year(
        year: i32,
        revenue: f64,
        operating_income: f64,
        pretax: f64,
        tax: f64,
        shares: f64,
    ) -> YearData {
        YearData {
            year,
            revenue,
            operating_income,
            pretax_income: pretax,
            tax_expense: tax,
            net_income: pretax - tax,
            diluted_shares: shares,
            ..Default::default()
        }
    }

    // ==================== CAPM ====================

    #[test]
    fn test_resolve_beta_prefers_profile_then_quote_then_default() {
        assert_eq!(resolve_beta(1.2, 0.9), 1.2);
        assert_eq!(resolve_beta(0.0, 0.9), 0.9);
        assert_eq!(resolve_beta(-0.3, 0.0), 1.0);
    }

    #[test]
    fn test_capm_cost_of_equity() {
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.2);
        assert!((capm.cost_of_equity - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_capm_fallback_rates() {
        let capm = CapmRates::resolve(None, None, 1.0);
        assert!((capm.risk_free_rate - 0.043).abs() < 1e-12);
        assert!((capm.equity_risk_premium - 0.055).abs() < 1e-12);
        assert!((capm.cost_of_equity - 0.098).abs() < 1e-12);
    }

    // ==================== weighted growth ====================

    #[test]
    fn test_weighted_growth_weights_recent_years_more() {
        let policy = GrowthPolicy::default();
        // Newest first: 20%, 10%, 5%. Weights 3, 2, 1.
        let g = weighted_growth(&[0.20, 0.10, 0.05], &policy);
        let expected = (3.0 * 0.20 + 2.0 * 0.10 + 1.0 * 0.05) / 6.0;
        assert!((g - expected).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_growth_clamps_to_policy_band() {
        let policy = GrowthPolicy::default();
        assert_eq!(weighted_growth(&[0.90, 0.80], &policy), 0.40);
        assert_eq!(weighted_growth(&[-0.50], &policy), 0.03);
        assert_eq!(weighted_growth(&[], &policy), 0.03);
    }

    #[test]
    fn test_weighted_growth_recency_bias_shifts_toward_newest() {
        let biased = GrowthPolicy {
            recency_bias: 2.0,
            ..Default::default()
        };
        let unbiased = GrowthPolicy::default();
        let rates = [0.30, 0.05];
        assert!(weighted_growth(&rates, &biased) > weighted_growth(&rates, &unbiased));
    }

    // ==================== growth fill ====================

    #[test]
    fn test_fill_growth_rates_leaves_oldest_none() {
        let mut actuals = vec![
            year(2021, 100.0, 20.0, 18.0, 4.0, 50.0),
            year(2022, 110.0, 23.0, 21.0, 5.0, 49.0),
            year(2023, 121.0, 26.0, 24.0, 5.5, 48.0),
        ];
        fill_growth_rates(&mut actuals);

        assert!(actuals[0].revenue_growth.is_none());
        assert!((actuals[1].revenue_growth.unwrap() - 0.10).abs() < 1e-12);
        assert!((actuals[2].revenue_growth.unwrap() - 0.10).abs() < 1e-12);
        assert!((actuals[1].shares_growth.unwrap() - (-0.02)).abs() < 1e-12);
    }

    // ==================== earnings DCF defaults ====================

    #[test]
    fn test_earnings_defaults_from_last_actual() {
        let mut actuals = vec![
            year(2022, 100.0, 20.0, 18.0, 3.6, 50.0),
            year(2023, 112.0, 25.0, 23.0, 4.6, 49.0),
        ];
        actuals[1].interest_expense = 2.0;
        actuals[1].capex = 5.6;
        actuals[1].da = 3.36;
        fill_growth_rates(&mut actuals);

        let defaults = derive_earnings_dcf_defaults(&actuals, &GrowthPolicy::default()).unwrap();

        assert!((defaults.base_op_margin - 25.0 / 112.0).abs() < 1e-12);
        assert!((defaults.base_tax_rate - 0.20).abs() < 1e-12);
        assert!((defaults.base_capex_pct - 0.05).abs() < 1e-12);
        assert!((defaults.base_da_pct - 0.03).abs() < 1e-12);
        assert!((defaults.base_interest_expense - 2.0).abs() < 1e-12);
        assert_eq!(defaults.exit_pe_multiple, 20.0);
        assert_eq!(defaults.base_diluted_shares, 49.0);
        assert!((defaults.base_shares_growth - (-0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_tax_rate_clamped_and_falls_back_on_pretax_loss() {
        let policy = GrowthPolicy::default();
        let mut high_tax = vec![
            year(2022, 100.0, 20.0, 18.0, 3.6, 50.0),
            year(2023, 110.0, 22.0, 20.0, 14.0, 50.0), // 70% effective
        ];
        fill_growth_rates(&mut high_tax);
        let defaults = derive_earnings_dcf_defaults(&high_tax, &policy).unwrap();
        assert_eq!(defaults.base_tax_rate, 0.50);

        let mut loss = vec![
            year(2022, 100.0, 20.0, 18.0, 3.6, 50.0),
            year(2023, 110.0, -5.0, -8.0, 0.0, 50.0),
        ];
        fill_growth_rates(&mut loss);
        let defaults = derive_earnings_dcf_defaults(&loss, &policy).unwrap();
        assert_eq!(defaults.base_tax_rate, 0.21);
    }

    #[test]
    fn test_shares_growth_is_simple_average_clamped() {
        let mut actuals = vec![
            year(2021, 100.0, 20.0, 18.0, 3.6, 100.0),
            year(2022, 110.0, 22.0, 20.0, 4.0, 150.0), // +50%
            year(2023, 121.0, 24.0, 22.0, 4.4, 225.0), // +50%
        ];
        fill_growth_rates(&mut actuals);
        let defaults =
            derive_earnings_dcf_defaults(&actuals, &GrowthPolicy::default()).unwrap();
        assert_eq!(defaults.base_shares_growth, 0.15);
    }

    #[test]
    fn test_earnings_defaults_require_two_actuals() {
        let actuals = vec![year(2023, 100.0, 20.0, 18.0, 3.6, 50.0)];
        let err = derive_earnings_dcf_defaults(&actuals, &GrowthPolicy::default())
            .expect_err("one year is not enough");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_earnings_field_defaults_are_uniform_per_period() {
        let mut actuals = vec![
            year(2022, 100.0, 20.0, 18.0, 3.6, 50.0),
            year(2023, 110.0, 22.0, 20.0, 4.0, 50.0),
        ];
        fill_growth_rates(&mut actuals);
        let defaults =
            derive_earnings_dcf_defaults(&actuals, &GrowthPolicy::default()).unwrap();

        let grid = defaults.field_defaults();
        assert_eq!(grid[&FieldId::RevenueGrowth].len(), 5);
        assert!(grid[&FieldId::RevenueGrowth]
            .iter()
            .all(|g| *g == defaults.base_revenue_growth));
        assert_eq!(grid[&FieldId::ExitPeMultiple], vec![20.0]);
    }

    #[test]
    fn test_fixed_inputs_carry_net_cash_from_net_debt() {
        let mut actuals = vec![
            year(2022, 100.0, 20.0, 18.0, 3.6, 50.0),
            year(2023, 110.0, 22.0, 20.0, 4.0, 50.0),
        ];
        actuals[1].net_debt = -30.0; // more cash than debt
        fill_growth_rates(&mut actuals);
        let defaults =
            derive_earnings_dcf_defaults(&actuals, &GrowthPolicy::default()).unwrap();

        let fixed = defaults.fixed_inputs(&actuals[1], 42.0);
        assert_eq!(fixed.base_revenue, 110.0);
        assert_eq!(fixed.net_cash, 30.0);
        assert_eq!(fixed.current_price, 42.0);
    }

    // ==================== dividend defaults ====================

    fn dps_history(values: &[(i32, f64)]) -> Vec<DividendYear> {
        let mut history: Vec<DividendYear> = values
            .iter()
            .map(|(year, dps)| DividendYear {
                year: *year,
                annual_dps: *dps,
                ..Default::default()
            })
            .collect();
        fill_dps_growth(&mut history);
        history
    }

    #[test]
    fn test_dividend_growth_averages_filter_outliers() {
        // 1.00 -> 1.05 (+5%), 1.05 -> 2.50 (outlier +138%), 2.50 -> 2.75 (+10%)
        let history = dps_history(&[(2020, 1.00), (2021, 1.05), (2022, 2.50), (2023, 2.75)]);
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);

        let defaults = derive_dividend_defaults(&history, &capm).unwrap();

        assert!((defaults.avg_dps_growth - 0.075).abs() < 1e-9);
        // Newest first weights 2, 1 over [10%, 5%].
        let expected_weighted = (2.0 * 0.10 + 1.0 * 0.05) / 3.0;
        assert!((defaults.weighted_dps_growth - expected_weighted).abs() < 1e-9);
    }

    #[test]
    fn test_ggm_growth_held_below_cost_of_equity() {
        // Steady 20% growth against Re = 9%.
        let history = dps_history(&[(2021, 1.00), (2022, 1.20), (2023, 1.44)]);
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);

        let defaults = derive_dividend_defaults(&history, &capm).unwrap();

        assert!((defaults.ggm_growth - (capm.cost_of_equity - 0.005)).abs() < 1e-12);
        // Stage-one keeps the raw trend, clamped to its own band.
        assert!((defaults.stage_one_growth - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_ggm_growth_floored_at_zero() {
        // Dividend cuts every year.
        let history = dps_history(&[(2021, 2.00), (2022, 1.60), (2023, 1.28)]);
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);

        let defaults = derive_dividend_defaults(&history, &capm).unwrap();

        assert_eq!(defaults.ggm_growth, 0.0);
        assert!((defaults.stage_one_growth - (-0.10)).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_growth_capped_and_below_re() {
        let history = dps_history(&[(2022, 1.00), (2023, 1.05)]);

        let normal = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);
        let defaults = derive_dividend_defaults(&history, &normal).unwrap();
        assert_eq!(defaults.terminal_growth, 0.03);

        let low_re = CapmRates::resolve(Some(0.01), Some(0.02), 1.0); // Re = 3%
        let defaults = derive_dividend_defaults(&history, &low_re).unwrap();
        assert!((defaults.terminal_growth - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_single_year_history_falls_back_to_two_percent() {
        let history = dps_history(&[(2023, 1.50)]);
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);

        let defaults = derive_dividend_defaults(&history, &capm).unwrap();

        assert!((defaults.avg_dps_growth - 0.02).abs() < 1e-12);
        assert!((defaults.weighted_dps_growth - 0.02).abs() < 1e-12);
        assert_eq!(defaults.stage_one_years, 5);
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);
        let err = derive_dividend_defaults(&[], &capm).expect_err("no history");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_field_default_grids() {
        let history = dps_history(&[(2022, 1.00), (2023, 1.05)]);
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);
        let defaults = derive_dividend_defaults(&history, &capm).unwrap();

        let ggm = defaults.ggm_field_defaults();
        assert_eq!(ggm[&FieldId::DividendGrowth], vec![defaults.ggm_growth]);

        let two_stage = defaults.two_stage_field_defaults();
        assert_eq!(two_stage[&FieldId::StageOneYears], vec![5.0]);
        assert_eq!(
            two_stage[&FieldId::TerminalGrowth],
            vec![defaults.terminal_growth]
        );
    }

    #[test]
    fn test_current_yield() {
        let history = dps_history(&[(2022, 1.00), (2023, 2.00)]);
        let capm = CapmRates::resolve(Some(0.04), Some(0.05), 1.0);
        let defaults = derive_dividend_defaults(&history, &capm).unwrap();

        assert!((defaults.current_yield(50.0) - 0.04).abs() < 1e-12);
        assert_eq!(defaults.current_yield(0.0), 0.0);
    }
}
