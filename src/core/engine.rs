//! Entry points wiring scenarios, benefits, investment, ROI and currency.
use super::assumptions::AssumptionSet;
use super::benefits::{
    BenefitBreakdown, Benchmarks, OperationalTargets, compute_benefits_with, operational_targets,
};
use super::currency::{Currency, CurrencyRateProvider, FixedRateTable};
use super::error::Result;
use super::investment::{InvestmentBreakdown, InvestmentInputs};
use super::roi::{PaybackPeriod, YearProjection, compute_roi, project_three_years};
use super::scenario::{Case, resolve};
use super::sensitivity::{SensitivityEntry, SensitivityVariable, compute_sensitivity_with_band};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Complete business case for one scenario, all money in `currency`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialResult {
    pub case: Case,
    pub currency: Currency,
    pub benefits: BenefitBreakdown,
    pub investment: InvestmentBreakdown,
    pub total_investment: f64,
    pub payback: PaybackPeriod,
    pub npv_3yr: f64,
    pub roi_year1: f64,
    pub roi_3yr: f64,
    pub operational: OperationalTargets,
    pub projection: Vec<YearProjection>,
}

/// Stateless calculator over a fixed benchmark set and rate table.
///
/// Holds only immutable configuration, so one engine can serve concurrent
/// requests.
pub struct Engine<P: CurrencyRateProvider = FixedRateTable> {
    benchmarks: Benchmarks,
    rates: P,
    input_currency: Currency,
}

impl Engine<FixedRateTable> {
    /// Default benchmarks and rates, inputs in USD.
    pub fn standard() -> Self {
        Engine {
            benchmarks: Benchmarks::default(),
            rates: FixedRateTable::default(),
            input_currency: Currency::USD,
        }
    }
}

impl Default for Engine<FixedRateTable> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<P: CurrencyRateProvider> Engine<P> {
    /// Fails when the benchmarks are unusable or the input currency has no rate.
    pub fn new(benchmarks: Benchmarks, rates: P, input_currency: Currency) -> Result<Self> {
        benchmarks.validate()?;
        rates.rate(input_currency)?;
        Ok(Engine {
            benchmarks,
            rates,
            input_currency,
        })
    }

    /// Builds the business case for `case`, reported in `currency`.
    pub fn compute(
        &self,
        assumptions: &AssumptionSet,
        investment: &InvestmentInputs,
        case: Case,
        currency: Currency,
    ) -> Result<FinancialResult> {
        assumptions.validate()?;
        investment.validate()?;

        let rate = self.rates.get_rate(self.input_currency, currency)?;
        let scenario = resolve(case);
        debug!(%case, %currency, rate, "Computing business case");

        let benefits = compute_benefits_with(assumptions, &self.benchmarks, &scenario).converted(rate);
        let investment = InvestmentBreakdown::new(investment, &scenario).converted(rate);
        let metrics = compute_roi(&benefits, &investment)?;
        let projection = project_three_years(&benefits, &investment);

        Ok(FinancialResult {
            case,
            currency,
            total_investment: investment.year1_total(),
            payback: metrics.payback,
            npv_3yr: metrics.npv_3yr,
            roi_year1: metrics.roi_year1,
            roi_3yr: metrics.roi_3yr,
            operational: operational_targets(assumptions, &self.benchmarks, &scenario),
            projection,
            benefits,
            investment,
        })
    }

    /// Business case for every scenario, keyed Best, Base, Worst.
    pub fn compute_all_scenarios(
        &self,
        assumptions: &AssumptionSet,
        investment: &InvestmentInputs,
        currency: Currency,
    ) -> Result<BTreeMap<Case, FinancialResult>> {
        Case::ALL
            .iter()
            .map(|&case| Ok((case, self.compute(assumptions, investment, case, currency)?)))
            .collect()
    }

    /// Tornado analysis of the 3-year ROI under `case`.
    ///
    /// ROI is a ratio, so the report currency does not affect the result.
    pub fn compute_sensitivity(
        &self,
        assumptions: &AssumptionSet,
        investment: &InvestmentInputs,
        case: Case,
        variables: &[SensitivityVariable],
        band: f64,
    ) -> Result<Vec<SensitivityEntry>> {
        compute_sensitivity_with_band(
            assumptions,
            &self.benchmarks,
            &resolve(case),
            investment,
            variables,
            band,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::sensitivity::DEFAULT_BAND;

    #[test]
    fn test_compute_base_case_usd() {
        let engine = Engine::standard();
        let result = engine
            .compute(
                &AssumptionSet::default(),
                &InvestmentInputs::default(),
                Case::Base,
                Currency::USD,
            )
            .unwrap();

        assert_eq!(result.case, Case::Base);
        assert!((result.benefits.total - 4_671_575.342_465_754).abs() < 1e-6);
        assert_eq!(result.total_investment, 450_000.0);
        assert!((result.roi_3yr - 13.752_343_186_733_958).abs() < 1e-9);
        assert_eq!(result.projection.len(), 3);
    }

    #[test]
    fn test_currency_applies_to_money_only() {
        let engine = Engine::standard();
        let a = AssumptionSet::default();
        let i = InvestmentInputs::default();
        let usd = engine.compute(&a, &i, Case::Worst, Currency::USD).unwrap();
        let eur = engine.compute(&a, &i, Case::Worst, Currency::EUR).unwrap();

        assert!((eur.benefits.total - usd.benefits.total * 0.92).abs() < 1e-6);
        assert!((eur.total_investment - usd.total_investment * 0.92).abs() < 1e-6);
        assert!((eur.npv_3yr - usd.npv_3yr * 0.92).abs() < 1e-6);
        assert!(
            (eur.projection[2].cumulative_net - usd.projection[2].cumulative_net * 0.92).abs()
                < 1e-6
        );
        assert!((eur.roi_3yr - usd.roi_3yr).abs() < 1e-9);
        assert!((eur.roi_year1 - usd.roi_year1).abs() < 1e-9);
        assert_eq!(eur.operational, usd.operational);
        assert!(
            (eur.payback.months().unwrap() - usd.payback.months().unwrap()).abs() < 1e-9
        );
    }

    #[test]
    fn test_eur_inputs_reported_in_eur_are_unchanged() {
        let engine = Engine::new(Benchmarks::default(), FixedRateTable::default(), Currency::EUR)
            .unwrap();
        let result = engine
            .compute(
                &AssumptionSet::default(),
                &InvestmentInputs::default(),
                Case::Base,
                Currency::EUR,
            )
            .unwrap();
        assert_eq!(result.total_investment, 450_000.0);
    }

    #[test]
    fn test_all_scenarios_ordered() {
        let engine = Engine::standard();
        let results = engine
            .compute_all_scenarios(
                &AssumptionSet::default(),
                &InvestmentInputs::default(),
                Currency::USD,
            )
            .unwrap();
        let cases: Vec<_> = results.keys().copied().collect();
        assert_eq!(cases, vec![Case::Best, Case::Base, Case::Worst]);

        let best = &results[&Case::Best];
        let base = &results[&Case::Base];
        let worst = &results[&Case::Worst];
        assert!(best.benefits.total >= base.benefits.total);
        assert!(base.benefits.total >= worst.benefits.total);
        assert!(best.total_investment <= base.total_investment);
        assert!(base.total_investment <= worst.total_investment);
        assert!((best.total_investment - 405_000.0).abs() < 1e-9);
        assert!((worst.total_investment - 517_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_input_rejects_computation() {
        let engine = Engine::standard();
        let assumptions = AssumptionSet {
            order_volume: -10.0,
            ..AssumptionSet::default()
        };
        let err = engine
            .compute(
                &assumptions,
                &InvestmentInputs::default(),
                Case::Base,
                Currency::USD,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput {
                field: "order_volume",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_target_rate_is_configuration_error() {
        let rates = FixedRateTable::new(BTreeMap::new()).unwrap();
        let engine = Engine::new(Benchmarks::default(), rates, Currency::USD).unwrap();
        let err = engine
            .compute(
                &AssumptionSet::default(),
                &InvestmentInputs::default(),
                Case::Base,
                Currency::EUR,
            )
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_sensitivity_through_engine() {
        let engine = Engine::standard();
        let entries = engine
            .compute_sensitivity(
                &AssumptionSet::default(),
                &InvestmentInputs::default(),
                Case::Base,
                &SensitivityVariable::ALL,
                DEFAULT_BAND,
            )
            .unwrap();
        assert_eq!(entries.len(), 5);
    }
}
