//! The five-category benefit model.
//!
//! Every category is a named pure function of the assumptions, the baseline
//! [`Benchmarks`] and the scenario multipliers. Scenario multipliers scale
//! the modeled improvement, never the current-state level itself.
use super::assumptions::AssumptionSet;
use super::error::{Error, Result};
use super::scenario::ScenarioMultipliers;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DAYS_PER_YEAR: f64 = 365.0;
/// Share of current DSO days removed by automation.
pub const DSO_REDUCTION_FRACTION: f64 = 0.20;
/// Share of order errors eliminated.
pub const ERROR_ELIMINATION_FRACTION: f64 = 0.68;
/// Share of revenue leakage prevented.
pub const LEAKAGE_REDUCTION_FRACTION: f64 = 0.625;
/// Share of orders moved from manual handling to touchless processing.
pub const AUTOMATION_UPLIFT: f64 = 0.23;
/// Share of the order-to-cash cycle removed.
pub const CYCLE_TIME_REDUCTION_FRACTION: f64 = 0.42;
/// Share of freed processing capacity that turns into additional orders.
pub const CAPACITY_CAPTURE_FRACTION: f64 = 0.30;

/// Baseline improvement fractions the benefit model is calibrated with.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Benchmarks {
    pub dso_reduction: f64,
    pub error_elimination: f64,
    pub leakage_reduction: f64,
    pub automation_uplift: f64,
    pub cycle_time_reduction: f64,
    pub capacity_capture: f64,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Benchmarks {
            dso_reduction: DSO_REDUCTION_FRACTION,
            error_elimination: ERROR_ELIMINATION_FRACTION,
            leakage_reduction: LEAKAGE_REDUCTION_FRACTION,
            automation_uplift: AUTOMATION_UPLIFT,
            cycle_time_reduction: CYCLE_TIME_REDUCTION_FRACTION,
            capacity_capture: CAPACITY_CAPTURE_FRACTION,
        }
    }
}

impl Benchmarks {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("dso_reduction", self.dso_reduction),
            ("error_elimination", self.error_elimination),
            ("leakage_reduction", self.leakage_reduction),
            ("automation_uplift", self.automation_uplift),
            ("cycle_time_reduction", self.cycle_time_reduction),
            ("capacity_capture", self.capacity_capture),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!(
                    "benchmark {name} must be a fraction between 0 and 1, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Annual benefit per category, all in the same currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitBreakdown {
    pub working_capital: f64,
    pub error_reduction: f64,
    pub leakage_prevention: f64,
    pub labor_reduction: f64,
    pub cycle_time_capacity: f64,
    pub total: f64,
    /// Receivables released by the DSO reduction (one-off cash, not a benefit).
    pub cash_released: f64,
    /// Categories whose raw value was negative and got floored at zero.
    pub warnings: Vec<String>,
}

impl BenefitBreakdown {
    /// `(label, amount)` pairs in reporting order, excluding the total.
    pub fn categories(&self) -> [(&'static str, f64); 5] {
        [
            ("Working Capital", self.working_capital),
            ("Error Reduction", self.error_reduction),
            ("Leakage Prevention", self.leakage_prevention),
            ("Labor Savings", self.labor_reduction),
            ("Capacity Increase", self.cycle_time_capacity),
        ]
    }

    /// Scales every monetary amount by `rate`.
    pub fn converted(&self, rate: f64) -> BenefitBreakdown {
        BenefitBreakdown {
            working_capital: self.working_capital * rate,
            error_reduction: self.error_reduction * rate,
            leakage_prevention: self.leakage_prevention * rate,
            labor_reduction: self.labor_reduction * rate,
            cycle_time_capacity: self.cycle_time_capacity * rate,
            total: self.total * rate,
            cash_released: self.cash_released * rate,
            warnings: self.warnings.clone(),
        }
    }
}

fn capped(fraction: f64, multiplier: f64) -> f64 {
    (fraction * multiplier).min(1.0)
}

/// Receivables freed by collecting `dso_reduction` of the DSO days sooner,
/// never more than the receivables outstanding today.
pub fn cash_released(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> f64 {
    let days_removed =
        assumptions.dso_days * capped(benchmarks.dso_reduction, scenario.dso_improvement);
    days_removed / DAYS_PER_YEAR * assumptions.annual_revenue()
}

/// Opportunity-cost value of released receivables at the cost of capital.
pub fn working_capital_benefit(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> f64 {
    cash_released(assumptions, benchmarks, scenario) * assumptions.wacc
}

/// Rework cost avoided on eliminated order errors.
pub fn error_reduction_benefit(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> f64 {
    let eliminated = capped(benchmarks.error_elimination, scenario.error_reduction);
    assumptions.order_volume * assumptions.error_rate * eliminated * assumptions.cost_per_order
}

/// Margin recovered on revenue that no longer leaks.
pub fn leakage_prevention_benefit(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> f64 {
    let prevented = capped(benchmarks.leakage_reduction, scenario.leakage_reduction);
    assumptions.annual_revenue() * assumptions.leakage_rate * prevented * assumptions.gross_margin
}

/// Labor cost of manual touches removed by automation.
pub fn labor_reduction_benefit(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> f64 {
    let automated = capped(benchmarks.automation_uplift, scenario.automation_rate);
    let hours_per_order = assumptions.minutes_per_touch / 60.0;
    assumptions.order_volume * hours_per_order * assumptions.hourly_labor_cost * automated
}

/// Orders the operation can additionally handle once the cycle shrinks.
pub fn additional_order_capacity(assumptions: &AssumptionSet, cycle_reduction: f64) -> f64 {
    assumptions.order_volume * cycle_reduction.min(1.0)
}

/// Margin on the captured share of additional order capacity.
pub fn cycle_time_capacity_benefit(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> f64 {
    let reduction = benchmarks.cycle_time_reduction * scenario.cycle_time_improvement;
    additional_order_capacity(assumptions, reduction)
        * benchmarks.capacity_capture
        * assumptions.avg_order_value
        * assumptions.gross_margin
}

fn floor_at_zero(category: &str, value: f64, warnings: &mut Vec<String>) -> f64 {
    if value >= 0.0 {
        return value;
    }
    warn!(category, value, "Negative benefit clamped to zero");
    warnings.push(format!("{category} benefit was {value}, clamped to 0"));
    0.0
}

/// Computes all five categories with the default benchmarks.
pub fn compute_benefits(
    assumptions: &AssumptionSet,
    scenario: &ScenarioMultipliers,
) -> BenefitBreakdown {
    compute_benefits_with(assumptions, &Benchmarks::default(), scenario)
}

/// Computes all five categories and their total.
///
/// Inputs are not validated here; negative or undefined category values are
/// clamped to zero and reported in [`BenefitBreakdown::warnings`].
pub fn compute_benefits_with(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> BenefitBreakdown {
    let mut warnings = Vec::new();
    let working_capital = floor_at_zero(
        "working_capital",
        working_capital_benefit(assumptions, benchmarks, scenario),
        &mut warnings,
    );
    let error_reduction = floor_at_zero(
        "error_reduction",
        error_reduction_benefit(assumptions, benchmarks, scenario),
        &mut warnings,
    );
    let leakage_prevention = floor_at_zero(
        "leakage_prevention",
        leakage_prevention_benefit(assumptions, benchmarks, scenario),
        &mut warnings,
    );
    let labor_reduction = floor_at_zero(
        "labor_reduction",
        labor_reduction_benefit(assumptions, benchmarks, scenario),
        &mut warnings,
    );
    let cycle_time_capacity = floor_at_zero(
        "cycle_time_capacity",
        cycle_time_capacity_benefit(assumptions, benchmarks, scenario),
        &mut warnings,
    );
    let cash_released = cash_released(assumptions, benchmarks, scenario).max(0.0);

    let total =
        working_capital + error_reduction + leakage_prevention + labor_reduction + cycle_time_capacity;
    debug!(
        working_capital,
        error_reduction, leakage_prevention, labor_reduction, cycle_time_capacity, total,
        "Computed benefits"
    );

    BenefitBreakdown {
        working_capital,
        error_reduction,
        leakage_prevention,
        labor_reduction,
        cycle_time_capacity,
        total,
        cash_released,
        warnings,
    }
}

/// Current and modeled target operating state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationalTargets {
    pub current_dso_days: f64,
    pub target_dso_days: f64,
    pub current_error_rate: f64,
    pub target_error_rate: f64,
    pub current_leakage_rate: f64,
    pub target_leakage_rate: f64,
    pub current_cycle_time_days: f64,
    pub target_cycle_time_days: f64,
    /// Share of orders newly processed without a manual touch.
    pub automation_uplift: f64,
}

pub fn operational_targets(
    assumptions: &AssumptionSet,
    benchmarks: &Benchmarks,
    scenario: &ScenarioMultipliers,
) -> OperationalTargets {
    let remaining = |fraction: f64, multiplier: f64| (1.0 - capped(fraction, multiplier)).max(0.0);
    OperationalTargets {
        current_dso_days: assumptions.dso_days,
        target_dso_days: assumptions.dso_days
            * remaining(benchmarks.dso_reduction, scenario.dso_improvement),
        current_error_rate: assumptions.error_rate,
        target_error_rate: assumptions.error_rate
            * remaining(benchmarks.error_elimination, scenario.error_reduction),
        current_leakage_rate: assumptions.leakage_rate,
        target_leakage_rate: assumptions.leakage_rate
            * remaining(benchmarks.leakage_reduction, scenario.leakage_reduction),
        current_cycle_time_days: assumptions.cycle_time_days,
        target_cycle_time_days: assumptions.cycle_time_days
            * remaining(benchmarks.cycle_time_reduction, scenario.cycle_time_improvement),
        automation_uplift: capped(benchmarks.automation_uplift, scenario.automation_rate),
    }
}
