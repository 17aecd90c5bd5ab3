//! Command-line tools for exploring a supply and demand chart.
//!
//! `supdem show` prints the equilibrium figures and price table for a choice
//! of presets and intervention. `supdem replay` feeds a JSON script of chart
//! events through the engine and writes the resulting views as JSON.
//! `supdem schema` exports the JSON schema of the configuration file.

use clap::Parser;
use std::{io::Write as _, path::PathBuf};
use supdem_core::models::{ConfigError, Intervention};
use supdem_engine::MarketEvent;
use tracing::{Level, event};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::AppConfig;

/// The top-level arguments: the configuration file and which subcommand to execute
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to configuration file
    #[arg(short, long, env = "SUPDEM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    /// Runs the chosen subcommand
    pub fn evaluate(self) -> anyhow::Result<()> {
        let AppConfig { chart } = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Show {
                supply,
                demand,
                intervention,
                limit_at,
                output,
            } => {
                let model = show::market(chart, supply, demand, intervention, limit_at)?;
                let view = model.view()?;
                let mut output = output.write()?;
                show::render(&view, &model.price_table(), &mut output)?;
                output.flush()?;
            }
            Commands::Replay { io } => {
                let input = io.read()?;
                let events = serde_json::from_reader::<_, Vec<MarketEvent>>(input)?;
                event!(Level::INFO, count = events.len(), "replaying events");

                let mut model = supdem_engine::MarketModel::new(chart);
                let steps = replay::replay(&mut model, &events);

                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &steps)?;
                output.flush()?;
            }
            Commands::Schema { output } => {
                let schema = schemars::schema_for!(AppConfig);
                let mut output = output.write()?;
                serde_json::to_writer_pretty(&mut output, &schema)?;
                output.flush()?;
            }
        }

        Ok(())
    }
}

/// Failures specific to the command line
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// The configuration file named on the command line does not exist
    #[error("Config file {} does not exist", .0.display())]
    MissingConfig(PathBuf),

    /// The merged configuration describes an unusable chart
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[source] ConfigError),

    /// A limit level was given for an intervention without a limit line
    #[error("The {0} intervention has no limit line to move")]
    NoLimitLine(Intervention),
}
