use crate::models::{LinearCurve, Map, Point};
use std::{fmt, str::FromStr};

/// Which of the two market curves is meant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// The upward-sloping curve of sellers
    Supply,
    /// The downward-sloping curve of buyers
    Demand,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Supply => "supply",
            Self::Demand => "demand",
        })
    }
}

/// A named slope variation for a market curve
///
/// All three presets for a side cross the same centre point of the chart, so
/// switching between them changes the elasticity at equilibrium without moving
/// it far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Preset {
    /// A shallow curve: wide quantity range, narrow price range
    Elastic,
    /// The default curve, with unit elasticity at the centre of the chart
    #[cfg_attr(feature = "serde", serde(alias = "normal"))]
    UnitElastic,
    /// A steep curve: narrow quantity range, wide price range
    Inelastic,
}

impl Preset {
    /// Every preset, in display order
    pub const ALL: [Preset; 3] = [Self::Elastic, Self::UnitElastic, Self::Inelastic];

    /// The built-in position of this preset for the given side
    pub fn builtin(&self, side: Side) -> LinearCurve {
        let (p0, p1) = match (side, self) {
            (Side::Supply, Self::Elastic) => ((20.0, 190.0), (180.0, 210.0)),
            (Side::Supply, Self::UnitElastic) => ((40.0, 80.0), (160.0, 320.0)),
            (Side::Supply, Self::Inelastic) => ((80.0, 50.0), (120.0, 350.0)),
            (Side::Demand, Self::Elastic) => ((20.0, 210.0), (180.0, 190.0)),
            (Side::Demand, Self::UnitElastic) => ((40.0, 320.0), (160.0, 80.0)),
            (Side::Demand, Self::Inelastic) => ((80.0, 350.0), (120.0, 50.0)),
        };
        LinearCurve::from_base([Point::new(p0.0, p0.1), Point::new(p1.0, p1.1)])
    }

    /// The canonical name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elastic => "elastic",
            Self::UnitElastic => "unit_elastic",
            Self::Inelastic => "inelastic",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elastic" => Ok(Self::Elastic),
            "unit_elastic" | "unit-elastic" | "normal" => Ok(Self::UnitElastic),
            "inelastic" => Ok(Self::Inelastic),
            _ => Err(PresetError::Unknown(s.to_owned())),
        }
    }
}

/// Errors that can occur when parsing a preset name
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PresetError {
    /// Error when the name matches no preset
    #[error("Unknown preset: {0}")]
    Unknown(String),
}

/// The preset positions for both curves
///
/// Entries missing from a side fall back to [`Preset::builtin`], so a
/// configuration only needs to list the presets it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PresetTable {
    /// Supply curve positions by preset
    #[cfg_attr(
        feature = "schemars",
        schemars(with = "std::collections::BTreeMap<String, crate::models::LinearCurveDto>")
    )]
    pub supply: Map<Preset, LinearCurve>,
    /// Demand curve positions by preset
    #[cfg_attr(
        feature = "schemars",
        schemars(with = "std::collections::BTreeMap<String, crate::models::LinearCurveDto>")
    )]
    pub demand: Map<Preset, LinearCurve>,
}

impl PresetTable {
    /// A table with no overrides
    pub fn empty() -> Self {
        Self {
            supply: Map::default(),
            demand: Map::default(),
        }
    }

    /// The position of `preset` for `side`, configured or built in
    ///
    /// Any shift rate carried by a configured entry is dropped; presets only
    /// describe base positions.
    pub fn curve(&self, side: Side, preset: Preset) -> LinearCurve {
        let configured = match side {
            Side::Supply => self.supply.get(&preset),
            Side::Demand => self.demand.get(&preset),
        };
        match configured {
            Some(curve) => {
                let mut curve = curve.clone();
                curve.clear_shift_rate();
                curve
            }
            None => preset.builtin(side),
        }
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        let side = |side: Side| {
            Preset::ALL
                .into_iter()
                .map(|preset| (preset, preset.builtin(side)))
                .collect::<Map<_, _>>()
        };
        Self {
            supply: side(Side::Supply),
            demand: side(Side::Demand),
        }
    }
}
