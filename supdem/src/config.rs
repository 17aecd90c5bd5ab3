//! Application configuration management.
//!
//! Configuration is merged from default values, an optional TOML file, and
//! environment variables, in increasing order of precedence.

use crate::CliError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use supdem_core::models::ChartConfig;

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, schemars::JsonSchema)]
pub struct AppConfig {
    /// The chart's axes, shift rate, table step, and preset positions
    #[serde(default)]
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given on the command line
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `SUPDEM_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Stretch the price axis
    /// export SUPDEM_CHART__MAX_PRICE=1000
    ///
    /// # Use a 25% tax or subsidy
    /// export SUPDEM_CHART__SHIFT_RATE=0.25
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(CliError::MissingConfig(path.to_path_buf()).into());
            }
        }

        // Override with environment variables
        // This maps SUPDEM_CHART__MAX_PRICE to chart.max_price
        config = config.add_source(
            config::Environment::with_prefix("SUPDEM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = config.build()?.try_deserialize()?;
        loaded.chart.validate().map_err(CliError::InvalidConfig)?;
        Ok(loaded)
    }
}
