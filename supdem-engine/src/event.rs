use supdem_core::models::{Intervention, Preset, Side};

/// Identifies a draggable curve on the chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CurveId {
    /// The supply curve
    Supply,
    /// The demand curve
    Demand,
    /// The limit line of the active ceiling, floor, or quantity limit
    Limit,
}

impl From<Side> for CurveId {
    fn from(value: Side) -> Self {
        match value {
            Side::Supply => Self::Supply,
            Side::Demand => Self::Demand,
        }
    }
}

/// A single user action, as delivered by the interface layer
///
/// In JSON an event is a single-key object:
///
/// ```json
/// [
///     { "preset": { "side": "supply", "preset": "elastic" } },
///     { "intervention": "price-ceiling" },
///     { "drag": { "curve": "limit", "dy": -50.0 } }
/// ]
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum MarketEvent {
    /// A drag tick moving a curve by a delta in chart units
    Drag {
        /// The curve being dragged
        curve: CurveId,
        /// The requested quantity delta
        #[cfg_attr(feature = "serde", serde(default))]
        dx: f64,
        /// The requested price delta
        #[cfg_attr(feature = "serde", serde(default))]
        dy: f64,
    },
    /// A slope preset chosen for one of the market curves
    Preset {
        /// The curve to replace
        side: Side,
        /// The preset to replace it with
        preset: Preset,
    },
    /// A new intervention chosen
    Intervention(Intervention),
}
