use supdem_core::models::{ChartConfig, LimitKind, LinearCurve};

/// The direction a curve may be dragged in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Along the quantity axis
    Horizontal,
    /// Along the price axis
    Vertical,
}

/// A closed interval a coordinate must stay within
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    /// The lower end
    pub min: f64,
    /// The upper end
    pub max: f64,
}

impl Interval {
    /// Creates an interval from its two ends
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Where a dragged curve's endpoints may land along its axis
///
/// `low` constrains the curve's smallest coordinate and `high` its largest.
/// Together they keep a curve on the chart and stop it from being dragged past
/// the other curve it crosses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragBounds {
    /// The interval for the curve's smallest coordinate
    pub low: Interval,
    /// The interval for the curve's largest coordinate
    pub high: Interval,
}

impl DragBounds {
    /// The range of deltas that keep both coordinates within bounds
    pub fn permitted(&self, low: f64, high: f64) -> Interval {
        Interval::new(
            (self.low.min - low).max(self.high.min - high),
            (self.low.max - low).min(self.high.max - high),
        )
    }

    /// Clamps a requested delta for a curve currently spanning `[low, high]`
    ///
    /// A delta overshooting one side is cut so that the endpoint lands exactly
    /// on that bound. A delta overshooting both sides at once, which can only
    /// happen once the curve already sits outside its bounds, is reversed to push
    /// the curve back.
    pub fn clamp(&self, low: f64, high: f64, delta: f64) -> f64 {
        let permitted = self.permitted(low, high);
        match (delta < permitted.min, delta > permitted.max) {
            (false, false) => delta,
            (true, false) => permitted.min,
            (false, true) => permitted.max,
            (true, true) => -delta,
        }
    }
}

/// The part a draggable curve plays, fixed when the curve is created
///
/// Each role knows its drag axis and how to derive its bounds from the other
/// curves and the chart's edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRole {
    /// The supply curve, dragged sideways and kept from passing the demand curve
    Supply,
    /// The demand curve, dragged sideways and kept from passing the supply curve
    Demand,
    /// A price ceiling, dragged vertically within the supply curve's prices
    PriceCeiling,
    /// A price floor, dragged vertically within the supply curve's prices
    PriceFloor,
    /// A quantity limit, dragged sideways within the demand curve's quantities
    QuantityLimit,
}

impl DragRole {
    /// The axis this role moves along
    pub fn axis(&self) -> Axis {
        match self {
            Self::PriceCeiling | Self::PriceFloor => Axis::Vertical,
            Self::Supply | Self::Demand | Self::QuantityLimit => Axis::Horizontal,
        }
    }

    /// Computes the bounds for this role from the current (rendered) curves
    pub fn bounds(
        &self,
        supply: &LinearCurve,
        demand: &LinearCurve,
        config: &ChartConfig,
    ) -> DragBounds {
        match self {
            Self::Supply => crossing(demand.x_range(), config.max_quantity),
            Self::Demand => crossing(supply.x_range(), config.max_quantity),
            Self::PriceCeiling => within(supply.y_range(), config.max_price),
            Self::PriceFloor => within(supply.y_range(), config.max_price),
            Self::QuantityLimit => within(demand.x_range(), config.max_quantity),
        }
    }

    /// The current extent of a curve playing this role along its axis
    pub fn extent(&self, curve: &LinearCurve) -> (f64, f64) {
        match self.axis() {
            Axis::Horizontal => curve.x_range(),
            Axis::Vertical => curve.y_range(),
        }
    }
}

impl From<LimitKind> for DragRole {
    fn from(value: LimitKind) -> Self {
        match value {
            LimitKind::PriceCeiling => Self::PriceCeiling,
            LimitKind::PriceFloor => Self::PriceFloor,
            LimitKind::QuantityLimit => Self::QuantityLimit,
        }
    }
}

// A market curve must keep overlapping the other curve's span: its low end
// may not pass the other's high end, and its high end may not pass the other's
// low end.
fn crossing((other_min, other_max): (f64, f64), edge: f64) -> DragBounds {
    DragBounds {
        low: Interval::new(0.0, other_max),
        high: Interval::new(other_min, edge),
    }
}

// A limit line is a single coordinate that must stay on the chart and within
// the span of the curve it is intersected with.
fn within((other_min, other_max): (f64, f64), edge: f64) -> DragBounds {
    DragBounds {
        low: Interval::new(0.0, edge),
        high: Interval::new(other_min, other_max),
    }
}
