//! Named scenarios and their multiplier sets.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analysis scenario.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Best,
    #[default]
    Base,
    Worst,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Best, Case::Base, Case::Worst];

    pub fn label(&self) -> &'static str {
        match self {
            Case::Best => "Best Case",
            Case::Base => "Base Case",
            Case::Worst => "Worst Case",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Case {
    type Err = Error;

    /// Accepts `best`, `Base Case`, `worst-case` and similar spellings.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let name = normalized
            .strip_suffix(" case")
            .unwrap_or(&normalized)
            .trim_end();
        match name {
            "best" => Ok(Case::Best),
            "base" => Ok(Case::Base),
            "worst" => Ok(Case::Worst),
            _ => Err(Error::config(format!("unknown scenario '{s}'"))),
        }
    }
}

/// Multipliers a scenario applies to the modeled improvements and to cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioMultipliers {
    pub dso_improvement: f64,
    pub error_reduction: f64,
    pub leakage_reduction: f64,
    pub automation_rate: f64,
    pub cycle_time_improvement: f64,
    pub cost_multiplier: f64,
    #[serde(skip)]
    pub description: &'static str,
}

impl ScenarioMultipliers {
    /// The Base Case set, which leaves every modeled figure unscaled.
    pub const IDENTITY: ScenarioMultipliers = BASE;
}

const BEST: ScenarioMultipliers = ScenarioMultipliers {
    dso_improvement: 1.3,
    error_reduction: 1.2,
    leakage_reduction: 1.25,
    automation_rate: 1.2,
    cycle_time_improvement: 1.25,
    cost_multiplier: 0.9,
    description: "Optimistic scenario with maximum adoption and impact",
};

const BASE: ScenarioMultipliers = ScenarioMultipliers {
    dso_improvement: 1.0,
    error_reduction: 1.0,
    leakage_reduction: 1.0,
    automation_rate: 1.0,
    cycle_time_improvement: 1.0,
    cost_multiplier: 1.0,
    description: "Realistic scenario based on industry benchmarks",
};

const WORST: ScenarioMultipliers = ScenarioMultipliers {
    dso_improvement: 0.7,
    error_reduction: 0.75,
    leakage_reduction: 0.7,
    automation_rate: 0.8,
    cycle_time_improvement: 0.75,
    cost_multiplier: 1.15,
    description: "Conservative scenario with implementation challenges",
};

/// Looks up the fixed multiplier set for a case.
pub fn resolve(case: Case) -> ScenarioMultipliers {
    match case {
        Case::Best => BEST,
        Case::Base => BASE,
        Case::Worst => WORST,
    }
}

/// Parses a scenario name and resolves its multipliers.
pub fn resolve_named(name: &str) -> Result<ScenarioMultipliers> {
    name.parse::<Case>().map(resolve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_is_identity() {
        let base = resolve(Case::Base);
        for m in [
            base.dso_improvement,
            base.error_reduction,
            base.leakage_reduction,
            base.automation_rate,
            base.cycle_time_improvement,
            base.cost_multiplier,
        ] {
            assert_eq!(m, 1.0);
        }
        assert_eq!(base, ScenarioMultipliers::IDENTITY);
    }

    #[test]
    fn test_multiplier_directions() {
        let best = resolve(Case::Best);
        let worst = resolve(Case::Worst);
        assert!(best.dso_improvement > 1.0 && worst.dso_improvement < 1.0);
        assert!(best.error_reduction > 1.0 && worst.error_reduction < 1.0);
        assert!(best.leakage_reduction > 1.0 && worst.leakage_reduction < 1.0);
        assert!(best.automation_rate > 1.0 && worst.automation_rate < 1.0);
        assert!(best.cycle_time_improvement > 1.0 && worst.cycle_time_improvement < 1.0);
        assert!(best.cost_multiplier < 1.0 && worst.cost_multiplier > 1.0);
    }

    #[test]
    fn test_parse_case_names() {
        assert_eq!("best".parse::<Case>().unwrap(), Case::Best);
        assert_eq!("Base Case".parse::<Case>().unwrap(), Case::Base);
        assert_eq!("WORST-case".parse::<Case>().unwrap(), Case::Worst);
        assert_eq!("worst_case".parse::<Case>().unwrap(), Case::Worst);

        let err = "Likely Case".parse::<Case>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(resolve_named("median").is_err());
    }

    #[test]
    fn test_case_serde_names() {
        assert_eq!(serde_yaml::from_str::<Case>("worst").unwrap(), Case::Worst);
        assert_eq!(serde_json::to_string(&Case::Best).unwrap(), "\"best\"");
    }
}
