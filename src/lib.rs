pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::{Case, Currency};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Compute {
        case: Option<Case>,
        currency: Option<Currency>,
        json: bool,
    },
    Compare {
        currency: Option<Currency>,
        json: bool,
    },
    Sensitivity {
        case: Option<Case>,
        band: f64,
        json: bool,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Business case calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let engine = config.engine()?;

    match command {
        AppCommand::Compute {
            case,
            currency,
            json,
        } => cli::compute::run(
            &engine,
            &config.assumptions,
            &config.investment,
            case.unwrap_or(config.case),
            currency.unwrap_or(config.currency),
            json,
        ),
        AppCommand::Compare { currency, json } => cli::compare::run(
            &engine,
            &config.assumptions,
            &config.investment,
            currency.unwrap_or(config.currency),
            json,
        ),
        AppCommand::Sensitivity { case, band, json } => cli::sensitivity::run(
            &engine,
            &config.assumptions,
            &config.investment,
            case.unwrap_or(config.case),
            band,
            json,
        ),
    }
}
