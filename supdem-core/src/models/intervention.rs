use crate::models::Side;
use std::{fmt, str::FromStr};

/// The policy intervention applied to the market
///
/// Exactly one intervention is active at a time. Taxes and subsidies shift a
/// curve in price; ceilings, floors, and quantity limits introduce a draggable
/// limit line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Intervention {
    /// A free market
    #[default]
    None,
    /// A tax levied on sellers, raising the supply curve
    TaxSupply,
    /// A subsidy paid to sellers, lowering the supply curve
    SubsidySupply,
    /// A tax levied on buyers, lowering the demand curve
    TaxDemand,
    /// A subsidy paid to buyers, raising the demand curve
    SubsidyDemand,
    /// A maximum price
    PriceCeiling,
    /// A minimum price
    PriceFloor,
    /// A maximum traded quantity
    QuantityLimit,
}

impl Intervention {
    /// Every intervention, in display order
    pub const ALL: [Intervention; 8] = [
        Self::None,
        Self::TaxSupply,
        Self::SubsidySupply,
        Self::TaxDemand,
        Self::SubsidyDemand,
        Self::PriceCeiling,
        Self::PriceFloor,
        Self::QuantityLimit,
    ];

    /// The curve this intervention shifts and the sign to apply to the configured rate
    ///
    /// A tax on sellers raises supply, while a tax on buyers lowers demand
    /// (and conversely for subsidies).
    pub fn shift(&self) -> Option<(Side, f64)> {
        match self {
            Self::TaxSupply => Some((Side::Supply, 1.0)),
            Self::SubsidySupply => Some((Side::Supply, -1.0)),
            Self::TaxDemand => Some((Side::Demand, -1.0)),
            Self::SubsidyDemand => Some((Side::Demand, 1.0)),
            _ => None,
        }
    }

    /// The kind of limit line this intervention introduces, if any
    pub fn limit(&self) -> Option<LimitKind> {
        match self {
            Self::PriceCeiling => Some(LimitKind::PriceCeiling),
            Self::PriceFloor => Some(LimitKind::PriceFloor),
            Self::QuantityLimit => Some(LimitKind::QuantityLimit),
            _ => None,
        }
    }

    /// The canonical name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TaxSupply => "tax-supply",
            Self::SubsidySupply => "subsidy-supply",
            Self::TaxDemand => "tax-demand",
            Self::SubsidyDemand => "subsidy-demand",
            Self::PriceCeiling => "price-ceiling",
            Self::PriceFloor => "price-floor",
            Self::QuantityLimit => "quantity-limit",
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intervention {
    type Err = InterventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Also accept the `intervention-<kind>` radio button ids
        let name = s.strip_prefix("intervention-").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| InterventionError::Unknown(s.to_owned()))
    }
}

/// The kinds of draggable limit line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum LimitKind {
    /// A horizontal line that caps the price, binding below equilibrium
    PriceCeiling,
    /// A horizontal line that supports the price, binding above equilibrium
    PriceFloor,
    /// A vertical line that caps the traded quantity, binding left of equilibrium
    QuantityLimit,
}

impl LimitKind {
    /// Whether the line is horizontal (a price level) rather than vertical
    pub fn is_price(&self) -> bool {
        matches!(self, Self::PriceCeiling | Self::PriceFloor)
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PriceCeiling => "price-ceiling",
            Self::PriceFloor => "price-floor",
            Self::QuantityLimit => "quantity-limit",
        })
    }
}

/// Errors that can occur when parsing an intervention name
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InterventionError {
    /// Error when the name matches no intervention
    #[error("Unknown intervention: {0}")]
    Unknown(String),
}
