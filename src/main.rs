use anyhow::Result;
use bizcase::core::log::init_logging;
use bizcase::core::sensitivity::DEFAULT_BAND;
use bizcase::core::{Case, Currency};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for bizcase::AppCommand {
    fn from(cmd: Commands) -> bizcase::AppCommand {
        match cmd {
            Commands::Compute {
                case,
                currency,
                json,
            } => bizcase::AppCommand::Compute {
                case,
                currency,
                json,
            },
            Commands::Compare { currency, json } => {
                bizcase::AppCommand::Compare { currency, json }
            }
            Commands::Sensitivity { case, band, json } => {
                bizcase::AppCommand::Sensitivity { case, band, json }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Compute the business case for one scenario
    Compute {
        /// Scenario: best, base or worst (defaults to the configured case)
        #[arg(long)]
        case: Option<Case>,
        /// Reporting currency: USD or EUR (defaults to the configured currency)
        #[arg(long)]
        currency: Option<Currency>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare Best, Base and Worst scenarios side by side
    Compare {
        /// Reporting currency: USD or EUR
        #[arg(long)]
        currency: Option<Currency>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank inputs by their effect on 3-year ROI
    Sensitivity {
        /// Scenario: best, base or worst
        #[arg(long)]
        case: Option<Case>,
        /// Relative perturbation applied to each input
        #[arg(long, default_value_t = DEFAULT_BAND)]
        band: f64,
        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => bizcase::cli::setup::setup(),
        Some(cmd) => bizcase::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
