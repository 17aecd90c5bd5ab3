use crate::models::PresetTable;

/// The fixed context a chart lives in: its axes, the intervention magnitude, and the presets.
///
/// # Examples
///
/// ```
/// use supdem_core::models::ChartConfig;
///
/// // Use default configuration
/// let config = ChartConfig::default();
/// assert_eq!(config.max_quantity, 200.0);
///
/// // Custom configuration
/// let config = ChartConfig {
///     max_price: 1000.0,
///     shift_rate: 0.25,
///     ..ChartConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartConfig {
    /// The right edge of the quantity axis
    #[cfg_attr(feature = "serde", serde(default = "default_max_quantity"))]
    pub max_quantity: f64,

    /// The top edge of the price axis
    #[cfg_attr(feature = "serde", serde(default = "default_max_price"))]
    pub max_price: f64,

    /// The magnitude of the tax or subsidy rate applied by the shift interventions
    #[cfg_attr(feature = "serde", serde(default = "default_shift_rate"))]
    pub shift_rate: f64,

    /// The price increment between rows of the price table
    #[cfg_attr(feature = "serde", serde(default = "default_table_step"))]
    pub table_step: f64,

    /// The curve positions selectable by name
    #[cfg_attr(feature = "serde", serde(default))]
    pub presets: PresetTable,
}

fn default_max_quantity() -> f64 {
    200.0
}

fn default_max_price() -> f64 {
    500.0
}

fn default_shift_rate() -> f64 {
    0.1
}

fn default_table_step() -> f64 {
    50.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_quantity: default_max_quantity(),
            max_price: default_max_price(),
            shift_rate: default_shift_rate(),
            table_step: default_table_step(),
            presets: PresetTable::default(),
        }
    }
}

impl ChartConfig {
    /// Checks that the axes and rates describe a usable chart
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_quantity.is_finite() && self.max_quantity > 0.0) {
            return Err(ConfigError::Axis("max_quantity", self.max_quantity));
        }
        if !(self.max_price.is_finite() && self.max_price > 0.0) {
            return Err(ConfigError::Axis("max_price", self.max_price));
        }
        // Taxes and subsidies apply the rate with either sign, and `1 - rate`
        // must stay positive or the shifted curve flattens or flips
        if !(self.shift_rate.is_finite() && self.shift_rate.abs() < 1.0) {
            return Err(ConfigError::ShiftRate(self.shift_rate));
        }
        if !(self.table_step.is_finite() && self.table_step > 0.0) {
            return Err(ConfigError::TableStep(self.table_step));
        }
        Ok(())
    }
}

/// The ways in which a chart configuration can be unusable
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Error when an axis maximum is not a positive, finite number
    #[error("{0} must be positive and finite, got {1}")]
    Axis(&'static str, f64),
    /// Error when the shift rate would not leave a sensible curve
    #[error("shift_rate must be finite and strictly between -1 and 1, got {0}")]
    ShiftRate(f64),
    /// Error when the price table step is not a positive, finite number
    #[error("table_step must be positive and finite, got {0}")]
    TableStep(f64),
}
