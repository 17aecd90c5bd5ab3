use supdem_core::models::{Intervention, LimitKind, LinearCurve, Point};

/// A snapshot of everything the chart displays after an event
///
/// Hidden guide lines and absent limits are `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketView {
    /// The active intervention
    pub intervention: Intervention,
    /// The supply curve as rendered
    pub supply: CurveView,
    /// The demand curve as rendered
    pub demand: CurveView,
    /// Where the (possibly shifted) supply and demand curves cross
    pub equilibrium: Point,
    /// Where the market actually trades, which differs from the equilibrium under a binding limit
    pub traded: Point,
    /// The dashed guide from the price axis to the traded point
    pub price_line: Option<[Point; 2]>,
    /// The dashed guide from the quantity axis to the traded point
    pub quantity_line: Option<[Point; 2]>,
    /// The draggable limit line, for limit interventions
    pub limit: Option<LimitView>,
    /// The gap between quantity supplied and demanded under a binding price ceiling
    pub shortage: Option<[Point; 2]>,
    /// Figures derived from the equilibrium
    pub metrics: MarketMetrics,
}

/// A market curve as rendered
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurveView {
    /// The rendered endpoints, including any tax or subsidy shift
    pub endpoints: [Point; 2],
    /// The pre-shift position, drawn underneath while a shift is active
    pub shadow: Option<[Point; 2]>,
}

impl From<&LinearCurve> for CurveView {
    fn from(value: &LinearCurve) -> Self {
        Self {
            endpoints: value.endpoints(),
            shadow: value.shadow(),
        }
    }
}

/// A limit line as rendered
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LimitView {
    /// The kind of limit
    pub kind: LimitKind,
    /// The segment from the axis to the curve the limit meets
    pub endpoints: [Point; 2],
    /// Whether the limit changes the traded outcome
    pub binding: bool,
}

/// Figures derived from the equilibrium, as shown beside the chart
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketMetrics {
    /// The equilibrium price, rounded to a whole number
    pub price: f64,
    /// The equilibrium quantity, rounded to a whole number
    pub quantity: f64,
    /// The rounded price times the rounded quantity
    pub total_revenue: f64,
    /// The point elasticity of supply at equilibrium
    pub supply_elasticity: f64,
    /// The point elasticity of demand at equilibrium
    pub demand_elasticity: f64,
}

impl MarketMetrics {
    /// Computes the metrics at an equilibrium of the given curves
    pub fn at(equilibrium: Point, supply: &LinearCurve, demand: &LinearCurve) -> Self {
        let price = equilibrium.y.round();
        let quantity = equilibrium.x.round();
        Self {
            price,
            quantity,
            total_revenue: price * quantity,
            supply_elasticity: supply.elasticity_at(equilibrium),
            demand_elasticity: demand.elasticity_at(equilibrium),
        }
    }
}
