//! Payback, NPV and ROI derived from one benefit/investment snapshot.

use super::benefits::BenefitBreakdown;
use super::error::{Error, Result};
use super::investment::InvestmentBreakdown;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Discount rate applied to the three annual net cash flows.
pub const DISCOUNT_RATE: f64 = 0.08;
pub const HORIZON_YEARS: u32 = 3;

/// Months until cumulative benefit covers the total investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaybackPeriod {
    Months(f64),
    /// The investment never pays back because there is no annual benefit.
    NotApplicable,
}

impl PaybackPeriod {
    pub fn months(&self) -> Option<f64> {
        match self {
            PaybackPeriod::Months(m) => Some(*m),
            PaybackPeriod::NotApplicable => None,
        }
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaybackPeriod::Months(m) => write!(f, "{m:.1} months"),
            PaybackPeriod::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for PaybackPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PaybackPeriod::Months(m) => serializer.serialize_f64(*m),
            PaybackPeriod::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// Headline return metrics. ROI values are fractions, `1.0` meaning 100 %.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiMetrics {
    pub payback: PaybackPeriod,
    pub npv_3yr: f64,
    pub roi_year1: f64,
    pub roi_3yr: f64,
}

pub fn payback_period(total_investment: f64, annual_benefit: f64) -> PaybackPeriod {
    if annual_benefit > 0.0 {
        PaybackPeriod::Months(total_investment / annual_benefit * 12.0)
    } else {
        PaybackPeriod::NotApplicable
    }
}

/// Discounted annual net benefit over the horizon, minus the undiscounted
/// one-time costs paid at year 0.
pub fn npv_3yr(annual_benefit: f64, investment: &InvestmentBreakdown) -> f64 {
    let annual_net = annual_benefit - investment.recurring_annual();
    let discounted: f64 = (1..=HORIZON_YEARS)
        .map(|t| annual_net / (1.0 + DISCOUNT_RATE).powi(t as i32))
        .sum();
    discounted - investment.one_time()
}

/// Derives all four metrics from the same benefit and investment snapshot.
///
/// Fails when nothing is invested, since ROI is then undefined.
pub fn compute_roi(
    benefits: &BenefitBreakdown,
    investment: &InvestmentBreakdown,
) -> Result<RoiMetrics> {
    let annual_benefit = benefits.total;
    let year1_cost = investment.year1_total();
    if year1_cost <= 0.0 {
        return Err(Error::invalid(
            "total_investment",
            year1_cost,
            "must be positive for ROI to be defined",
        ));
    }
    let three_year_cost = investment.three_year_total();

    let metrics = RoiMetrics {
        payback: payback_period(year1_cost, annual_benefit),
        npv_3yr: npv_3yr(annual_benefit, investment),
        roi_year1: (annual_benefit - year1_cost) / year1_cost,
        roi_3yr: (f64::from(HORIZON_YEARS) * annual_benefit - three_year_cost) / three_year_cost,
    };
    debug!(?metrics, "Computed ROI metrics");
    Ok(metrics)
}

/// One year of the cumulative projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProjection {
    pub year: u32,
    pub benefit: f64,
    pub cost: f64,
    pub net: f64,
    pub cumulative_net: f64,
}

/// Year 1 carries the one-time costs, later years only the platform fee.
pub fn project_three_years(
    benefits: &BenefitBreakdown,
    investment: &InvestmentBreakdown,
) -> Vec<YearProjection> {
    let mut cumulative_net = 0.0;
    (1..=HORIZON_YEARS)
        .map(|year| {
            let cost = if year == 1 {
                investment.year1_total()
            } else {
                investment.recurring_annual()
            };
            let net = benefits.total - cost;
            cumulative_net += net;
            YearProjection {
                year,
                benefit: benefits.total,
                cost,
                net,
                cumulative_net,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assumptions::AssumptionSet;
    use crate::core::benefits::compute_benefits;
    use crate::core::investment::InvestmentInputs;
    use crate::core::scenario::{Case, resolve};

    fn benefits_with_total(total: f64) -> BenefitBreakdown {
        BenefitBreakdown {
            working_capital: total,
            error_reduction: 0.0,
            leakage_prevention: 0.0,
            labor_reduction: 0.0,
            cycle_time_capacity: 0.0,
            total,
            cash_released: 0.0,
            warnings: Vec::new(),
        }
    }

    fn investment(platform: f64, implementation: f64, change: f64) -> InvestmentBreakdown {
        InvestmentBreakdown {
            platform_annual: platform,
            implementation,
            change_management: change,
        }
    }

    #[test]
    fn test_payback_not_applicable_without_benefit() {
        let metrics = compute_roi(&benefits_with_total(0.0), &investment(50_000.0, 0.0, 0.0)).unwrap();
        assert_eq!(metrics.payback, PaybackPeriod::NotApplicable);
        assert_eq!(metrics.payback.to_string(), "N/A");
        assert!(metrics.payback.months().is_none());
        assert_eq!(serde_json::to_string(&metrics.payback).unwrap(), "\"N/A\"");
    }

    #[test]
    fn test_payback_months() {
        let payback = payback_period(50_000.0, 100_000.0);
        assert_eq!(payback, PaybackPeriod::Months(6.0));
        assert_eq!(payback.to_string(), "6.0 months");
    }

    #[test]
    fn test_npv_discounts_only_recurring_flows() {
        let inv = investment(100_000.0, 60_000.0, 40_000.0);
        let npv = npv_3yr(300_000.0, &inv);
        let expected = 200_000.0 / 1.08 + 200_000.0 / 1.08_f64.powi(2)
            + 200_000.0 / 1.08_f64.powi(3)
            - 100_000.0;
        assert!((npv - expected).abs() < 1e-6);
    }

    #[test]
    fn test_roi_formulas() {
        let inv = investment(100_000.0, 60_000.0, 40_000.0);
        let metrics = compute_roi(&benefits_with_total(300_000.0), &inv).unwrap();
        assert!((metrics.roi_year1 - 0.5).abs() < 1e-12);
        // (900k - 400k) / 400k
        assert!((metrics.roi_3yr - 1.25).abs() < 1e-12);
        assert!((metrics.payback.months().unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_base_case_metrics() {
        let scenario = resolve(Case::Base);
        let benefits = compute_benefits(&AssumptionSet::default(), &scenario);
        let inv = InvestmentBreakdown::new(&InvestmentInputs::default(), &scenario);
        let metrics = compute_roi(&benefits, &inv).unwrap();

        assert!((metrics.payback.months().unwrap() - 1.155_926_984_825_159).abs() < 1e-9);
        assert!((metrics.npv_3yr - 11_194_828.493_958).abs() < 1e-3);
        assert!((metrics.roi_year1 - 9.381_278_538_812_786).abs() < 1e-9);
        assert!((metrics.roi_3yr - 13.752_343_186_733_958).abs() < 1e-9);
    }

    #[test]
    fn test_zero_investment_rejected() {
        let err = compute_roi(&benefits_with_total(10.0), &investment(0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput {
                field: "total_investment",
                ..
            }
        ));
    }

    #[test]
    fn test_projection_accumulates() {
        let inv = investment(100_000.0, 60_000.0, 40_000.0);
        let projection = project_three_years(&benefits_with_total(300_000.0), &inv);
        assert_eq!(projection.len(), 3);
        assert_eq!(projection[0].cost, 200_000.0);
        assert_eq!(projection[1].cost, 100_000.0);
        assert_eq!(projection[0].cumulative_net, 100_000.0);
        assert_eq!(projection[2].cumulative_net, 500_000.0);
    }
}
