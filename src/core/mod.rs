//! Core business logic: the business case calculation engine

pub mod assumptions;
pub mod benefits;
pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod investment;
pub mod log;
pub mod roi;
pub mod scenario;
pub mod sensitivity;

// Re-export main types for cleaner imports
pub use assumptions::AssumptionSet;
pub use benefits::{BenefitBreakdown, Benchmarks, compute_benefits};
pub use currency::{Currency, CurrencyRateProvider, FixedRateTable, convert};
pub use engine::{Engine, FinancialResult};
pub use error::{Error, Result};
pub use investment::{InvestmentBreakdown, InvestmentInputs, compute_investment};
pub use roi::{PaybackPeriod, RoiMetrics, compute_roi};
pub use scenario::{Case, ScenarioMultipliers, resolve};
pub use sensitivity::{SensitivityEntry, SensitivityVariable, compute_sensitivity};
