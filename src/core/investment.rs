//! Investment cost model.

use super::error::{Result, ensure_non_negative};
use super::scenario::ScenarioMultipliers;
use serde::{Deserialize, Serialize};

/// Cost of the automation program, in the engine's input currency.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InvestmentInputs {
    pub platform_annual_cost: f64,
    pub implementation_cost: f64,
    pub change_management_cost: f64,
}

impl InvestmentInputs {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("platform_annual_cost", self.platform_annual_cost)?;
        ensure_non_negative("implementation_cost", self.implementation_cost)?;
        ensure_non_negative("change_management_cost", self.change_management_cost)?;
        Ok(())
    }
}

impl Default for InvestmentInputs {
    fn default() -> Self {
        InvestmentInputs {
            platform_annual_cost: 250_000.0,
            implementation_cost: 150_000.0,
            change_management_cost: 50_000.0,
        }
    }
}

/// Scenario-adjusted cost split used by the ROI engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentBreakdown {
    pub platform_annual: f64,
    pub implementation: f64,
    pub change_management: f64,
}

impl InvestmentBreakdown {
    pub fn new(inputs: &InvestmentInputs, scenario: &ScenarioMultipliers) -> Self {
        let m = scenario.cost_multiplier;
        InvestmentBreakdown {
            platform_annual: inputs.platform_annual_cost * m,
            implementation: inputs.implementation_cost * m,
            change_management: inputs.change_management_cost * m,
        }
    }

    /// Implementation plus change management, paid once up front.
    pub fn one_time(&self) -> f64 {
        self.implementation + self.change_management
    }

    /// Total investment: first-year platform fee plus one-time costs.
    pub fn year1_total(&self) -> f64 {
        self.platform_annual + self.one_time()
    }

    /// Cost recurring in years 2 and 3.
    pub fn recurring_annual(&self) -> f64 {
        self.platform_annual
    }

    pub fn three_year_total(&self) -> f64 {
        3.0 * self.platform_annual + self.one_time()
    }

    /// Scales every amount by `rate`.
    pub fn converted(&self, rate: f64) -> InvestmentBreakdown {
        InvestmentBreakdown {
            platform_annual: self.platform_annual * rate,
            implementation: self.implementation * rate,
            change_management: self.change_management * rate,
        }
    }
}

/// Total investment for the scenario.
pub fn compute_investment(inputs: &InvestmentInputs, scenario: &ScenarioMultipliers) -> f64 {
    InvestmentBreakdown::new(inputs, scenario).year1_total()
}
