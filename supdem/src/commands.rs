use super::{IOArgs, OutputArgs};
use clap::Subcommand;
use supdem_core::models::{Intervention, Preset};

pub mod replay;
pub mod show;

/// The available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the equilibrium figures and price table for a market
    Show {
        /// The supply preset
        #[arg(short, long, default_value = "unit_elastic")]
        supply: Preset,

        /// The demand preset
        #[arg(short, long, default_value = "unit_elastic")]
        demand: Preset,

        /// The intervention to apply
        #[arg(short, long, default_value = "none")]
        intervention: Intervention,

        /// Move the limit line of a ceiling, floor, or quantity limit to this level
        #[arg(short, long)]
        limit_at: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Apply a JSON array of events and report the market after each one
    Replay {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Export the JSON schema of the configuration file
    Schema {
        #[command(flatten)]
        output: OutputArgs,
    },
}
