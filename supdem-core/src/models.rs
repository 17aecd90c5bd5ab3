mod config;
mod curve;
mod intervention;
mod point;
mod preset;

pub use config::{ChartConfig, ConfigError};
pub use curve::*;
pub use intervention::{Intervention, InterventionError, LimitKind};
pub use point::Point;
pub use preset::{Preset, PresetError, PresetTable, Side};

/// The map used by preset tables; it keeps entries in the order they were listed
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
