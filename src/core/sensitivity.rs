//! One-factor-at-a-time sensitivity of the 3-year ROI (tornado analysis).

use super::assumptions::AssumptionSet;
use super::benefits::{Benchmarks, compute_benefits_with};
use super::error::{Error, Result};
use super::investment::{InvestmentBreakdown, InvestmentInputs};
use super::roi::compute_roi;
use super::scenario::ScenarioMultipliers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Relative perturbation applied on each side of a tracked value.
pub const DEFAULT_BAND: f64 = 0.20;

/// Assumptions tracked by the tornado analysis, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityVariable {
    DsoImprovement,
    ErrorRate,
    LeakageRate,
    AutomationRate,
    PlatformCost,
}

impl SensitivityVariable {
    pub const ALL: [SensitivityVariable; 5] = [
        SensitivityVariable::DsoImprovement,
        SensitivityVariable::ErrorRate,
        SensitivityVariable::LeakageRate,
        SensitivityVariable::AutomationRate,
        SensitivityVariable::PlatformCost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SensitivityVariable::DsoImprovement => "DSO Improvement",
            SensitivityVariable::ErrorRate => "Error Rate",
            SensitivityVariable::LeakageRate => "Leakage Rate",
            SensitivityVariable::AutomationRate => "Automation Rate",
            SensitivityVariable::PlatformCost => "Platform Cost",
        }
    }

    /// Fractions cannot be pushed above 1 by the upper perturbation.
    fn is_fraction(&self) -> bool {
        !matches!(self, SensitivityVariable::PlatformCost)
    }
}

impl fmt::Display for SensitivityVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ROI impact of moving one variable down and up by the band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityEntry {
    pub variable: SensitivityVariable,
    pub base_value: f64,
    pub low_value: f64,
    pub high_value: f64,
    pub low_roi: f64,
    pub high_roi: f64,
    /// `low_roi` minus the unperturbed 3-year ROI.
    pub low_delta: f64,
    /// `high_roi` minus the unperturbed 3-year ROI.
    pub high_delta: f64,
    /// The delta with the larger absolute value, sign kept.
    pub magnitude: f64,
}

/// Everything the 3-year ROI depends on besides the scenario.
#[derive(Debug, Clone)]
struct ModelInputs {
    assumptions: AssumptionSet,
    benchmarks: Benchmarks,
    investment: InvestmentInputs,
}

impl ModelInputs {
    fn value(&self, variable: SensitivityVariable) -> f64 {
        match variable {
            SensitivityVariable::DsoImprovement => self.benchmarks.dso_reduction,
            SensitivityVariable::ErrorRate => self.assumptions.error_rate,
            SensitivityVariable::LeakageRate => self.assumptions.leakage_rate,
            SensitivityVariable::AutomationRate => self.benchmarks.automation_uplift,
            SensitivityVariable::PlatformCost => self.investment.platform_annual_cost,
        }
    }

    fn with_value(&self, variable: SensitivityVariable, value: f64) -> ModelInputs {
        let mut inputs = self.clone();
        match variable {
            SensitivityVariable::DsoImprovement => inputs.benchmarks.dso_reduction = value,
            SensitivityVariable::ErrorRate => inputs.assumptions.error_rate = value,
            SensitivityVariable::LeakageRate => inputs.assumptions.leakage_rate = value,
            SensitivityVariable::AutomationRate => inputs.benchmarks.automation_uplift = value,
            SensitivityVariable::PlatformCost => inputs.investment.platform_annual_cost = value,
        }
        inputs
    }

    fn roi_3yr(&self, scenario: &ScenarioMultipliers) -> Result<f64> {
        let benefits = compute_benefits_with(&self.assumptions, &self.benchmarks, scenario);
        let investment = InvestmentBreakdown::new(&self.investment, scenario);
        Ok(compute_roi(&benefits, &investment)?.roi_3yr)
    }
}

/// Tornado analysis with the default ±20 % band.
pub fn compute_sensitivity(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
    investment: &InvestmentInputs,
    variables: &[SensitivityVariable],
) -> Result<Vec<SensitivityEntry>> {
    compute_sensitivity_with_band(
        assumptions,
        benchmarks,
        scenario,
        investment,
        variables,
        DEFAULT_BAND,
    )
}

/// Moves each requested variable to `value × (1 ∓ band)`, holding every other
/// input and the scenario fixed, and ranks variables by their largest ROI
/// swing. Ties keep declaration order; duplicates are analysed once.
pub fn compute_sensitivity_with_band(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
    investment: &InvestmentInputs,
    variables: &[SensitivityVariable],
    band: f64,
) -> Result<Vec<SensitivityEntry>> {
    if !band.is_finite() || band <= 0.0 || band >= 1.0 {
        return Err(Error::invalid(
            "band",
            band,
            "must be a fraction strictly between 0 and 1",
        ));
    }
    assumptions.validate()?;
    benchmarks.validate()?;
    investment.validate()?;

    let base = ModelInputs {
        assumptions: assumptions.clone(),
        benchmarks: *benchmarks,
        investment: investment.clone(),
    };
    let base_roi = base.roi_3yr(scenario)?;
    debug!(base_roi, band, "Running sensitivity analysis");

    let tracked: BTreeSet<SensitivityVariable> = variables.iter().copied().collect();
    let mut entries = Vec::with_capacity(tracked.len());
    for variable in tracked {
        let base_value = base.value(variable);
        let low_value = base_value * (1.0 - band);
        let mut high_value = base_value * (1.0 + band);
        if variable.is_fraction() {
            high_value = high_value.min(1.0);
        }

        let low_roi = base.with_value(variable, low_value).roi_3yr(scenario)?;
        let high_roi = base.with_value(variable, high_value).roi_3yr(scenario)?;
        let low_delta = low_roi - base_roi;
        let high_delta = high_roi - base_roi;
        let magnitude = if low_delta.abs() > high_delta.abs() {
            low_delta
        } else {
            high_delta
        };
        debug!(%variable, low_delta, high_delta, "Sensitivity computed");

        entries.push(SensitivityEntry {
            variable,
            base_value,
            low_value,
            high_value,
            low_roi,
            high_roi,
            low_delta,
            high_delta,
            magnitude,
        });
    }

    // Stable sort keeps declaration order among equal swings.
    entries.sort_by(|a, b| b.magnitude.abs().total_cmp(&a.magnitude.abs()));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scenario::{Case, resolve};

    fn run(variables: &[SensitivityVariable]) -> Vec<SensitivityEntry> {
        compute_sensitivity(
            &AssumptionSet::default(),
            &Benchmarks::default(),
            &resolve(Case::Base),
            &InvestmentInputs::default(),
            variables,
        )
        .unwrap()
    }

    #[test]
    fn test_all_variables_ranked_by_swing() {
        let entries = run(&SensitivityVariable::ALL);
        assert_eq!(entries.len(), 5);
        for pair in entries.windows(2) {
            assert!(pair[0].magnitude.abs() >= pair[1].magnitude.abs());
        }
    }

    #[test]
    fn test_delta_signs_follow_direction() {
        let entries = run(&SensitivityVariable::ALL);
        for entry in &entries {
            match entry.variable {
                SensitivityVariable::PlatformCost => {
                    assert!(entry.low_delta > 0.0);
                    assert!(entry.high_delta < 0.0);
                }
                _ => {
                    assert!(entry.low_delta < 0.0);
                    assert!(entry.high_delta > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_platform_cost_perturbation_values() {
        let entries = run(&[SensitivityVariable::PlatformCost]);
        let entry = &entries[0];
        assert_eq!(entry.base_value, 250_000.0);
        assert!((entry.low_value - 200_000.0).abs() < 1e-9);
        assert!((entry.high_value - 300_000.0).abs() < 1e-9);

        // 3-year ROI with platform at 300k: 3B / (900k + 200k) - 1
        let benefit = 4_671_575.342_465_754;
        let expected_high = (3.0 * benefit - 1_100_000.0) / 1_100_000.0;
        assert!((entry.high_roi - expected_high).abs() < 1e-9);
    }

    #[test]
    fn test_linear_benefit_deltas_are_symmetric() {
        let entries = run(&[SensitivityVariable::ErrorRate]);
        let entry = &entries[0];
        assert!((entry.low_delta + entry.high_delta).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        // With every benefit driver at zero, no variable moves the ROI.
        let assumptions = AssumptionSet {
            order_volume: 0.0,
            ..AssumptionSet::default()
        };
        let benchmarks = Benchmarks::default();
        let investment = InvestmentInputs {
            platform_annual_cost: 0.0,
            ..InvestmentInputs::default()
        };
        let reversed: Vec<_> = SensitivityVariable::ALL.iter().rev().copied().collect();
        let entries = compute_sensitivity(
            &assumptions,
            &benchmarks,
            &resolve(Case::Base),
            &investment,
            &reversed,
        )
        .unwrap();
        let order: Vec<_> = entries.iter().map(|e| e.variable).collect();
        assert_eq!(order, SensitivityVariable::ALL.to_vec());
    }

    #[test]
    fn test_duplicates_analysed_once() {
        let entries = run(&[
            SensitivityVariable::LeakageRate,
            SensitivityVariable::LeakageRate,
        ]);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_high_perturbation_capped_for_fractions() {
        let assumptions = AssumptionSet {
            error_rate: 0.9,
            ..AssumptionSet::default()
        };
        let entries = compute_sensitivity(
            &assumptions,
            &Benchmarks::default(),
            &resolve(Case::Base),
            &InvestmentInputs::default(),
            &[SensitivityVariable::ErrorRate],
        )
        .unwrap();
        assert_eq!(entries[0].high_value, 1.0);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            run(&SensitivityVariable::ALL),
            run(&SensitivityVariable::ALL)
        );
    }

    #[test]
    fn test_invalid_band_rejected() {
        for band in [0.0, 1.0, -0.2, f64::NAN] {
            let result = compute_sensitivity_with_band(
                &AssumptionSet::default(),
                &Benchmarks::default(),
                &resolve(Case::Base),
                &InvestmentInputs::default(),
                &SensitivityVariable::ALL,
                band,
            );
            assert!(matches!(
                result,
                Err(Error::InvalidInput { field: "band", .. })
            ));
        }
    }
}
