use super::assumptions::AssumptionSet;
use super::benefits::Benchmarks;
use super::currency::{Currency, FixedRateTable};
use super::engine::Engine;
use super::investment::InvestmentInputs;
use super::scenario::Case;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub assumptions: AssumptionSet,
    pub investment: InvestmentInputs,
    #[serde(default)]
    pub benchmarks: Benchmarks,
    #[serde(default)]
    pub rates: FixedRateTable,
    /// Currency the monetary inputs are expressed in.
    #[serde(default = "default_currency")]
    pub input_currency: Currency,
    /// Currency results are reported in.
    #[serde(default = "default_currency")]
    pub currency: Currency,
    #[serde(default)]
    pub case: Case,
}

fn default_currency() -> Currency {
    Currency::USD
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "bizcase", "bizcase")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Engine configured with this file's benchmarks, rates and input currency.
    pub fn engine(&self) -> Result<Engine> {
        let engine = Engine::new(self.benchmarks, self.rates.clone(), self.input_currency)
            .context("Invalid engine configuration")?;
        Ok(engine)
    }
}
