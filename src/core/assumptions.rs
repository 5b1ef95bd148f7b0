//! Current-state business inputs.

use super::error::{Result, ensure_fraction, ensure_non_negative};
use serde::{Deserialize, Serialize};

/// Snapshot of the current order-to-cash operation.
///
/// Monetary fields are in the engine's input currency. Rates (error,
/// leakage, gross margin, cost of capital) are fractions, so 25 % is `0.25`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssumptionSet {
    pub order_volume: f64,
    pub avg_order_value: f64,
    /// Days sales outstanding.
    pub dso_days: f64,
    pub error_rate: f64,
    pub leakage_rate: f64,
    pub cost_per_order: f64,
    pub minutes_per_touch: f64,
    pub hourly_labor_cost: f64,
    pub cycle_time_days: f64,
    pub gross_margin: f64,
    /// Weighted average cost of capital.
    pub wacc: f64,
}

impl AssumptionSet {
    pub fn annual_revenue(&self) -> f64 {
        self.order_volume * self.avg_order_value
    }

    /// Rejects the whole set when any value is negative, non-finite or,
    /// for rates, above 1.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("order_volume", self.order_volume)?;
        ensure_non_negative("avg_order_value", self.avg_order_value)?;
        ensure_non_negative("dso_days", self.dso_days)?;
        ensure_fraction("error_rate", self.error_rate)?;
        ensure_fraction("leakage_rate", self.leakage_rate)?;
        ensure_non_negative("cost_per_order", self.cost_per_order)?;
        ensure_non_negative("minutes_per_touch", self.minutes_per_touch)?;
        ensure_non_negative("hourly_labor_cost", self.hourly_labor_cost)?;
        ensure_non_negative("cycle_time_days", self.cycle_time_days)?;
        ensure_fraction("gross_margin", self.gross_margin)?;
        ensure_fraction("wacc", self.wacc)?;
        Ok(())
    }
}

impl Default for AssumptionSet {
    fn default() -> Self {
        AssumptionSet {
            order_volume: 50_000.0,
            avg_order_value: 2_500.0,
            dso_days: 45.0,
            error_rate: 0.25,
            leakage_rate: 0.08,
            cost_per_order: 85.0,
            minutes_per_touch: 28.0,
            hourly_labor_cost: 75.0,
            cycle_time_days: 5.2,
            gross_margin: 0.15,
            wacc: 0.08,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_default_assumptions_are_valid() {
        let assumptions = AssumptionSet::default();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.annual_revenue(), 125_000_000.0);
    }

    #[test]
    fn test_negative_value_rejected() {
        let assumptions = AssumptionSet {
            cost_per_order: -5.0,
            ..AssumptionSet::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(Error::InvalidInput {
                field: "cost_per_order",
                ..
            })
        ));
    }

    #[test]
    fn test_percentage_given_as_whole_number_rejected() {
        let assumptions = AssumptionSet {
            error_rate: 25.0,
            ..AssumptionSet::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(Error::InvalidInput {
                field: "error_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let assumptions = AssumptionSet {
            dso_days: f64::NAN,
            ..AssumptionSet::default()
        };
        assert!(assumptions.validate().is_err());
    }
}
