use super::GeometryError;
use crate::models::Point;

/// A straight line through two distinct points, optionally shifted by a tax or subsidy
///
/// The curve stores its *base* endpoints explicitly. While a shift rate `r` is
/// active the rendered endpoints are the base endpoints with every price
/// multiplied by `1 + r`, and the base itself is what a renderer shows as the
/// shadow curve. Clearing the rate simply drops it, so the curve returns to
/// exactly where it was.
///
/// All geometric queries (`intersect`, `slope`, `quantity_at_price`, ...) act on
/// the rendered line, extended infinitely past its endpoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LinearCurveDto", into = "LinearCurveDto")
)]
pub struct LinearCurve {
    base: [Point; 2],
    shift_rate: Option<f64>,
}

impl LinearCurve {
    /// Creates a new curve through two points, validating that they are finite and distinct
    pub fn new(p0: Point, p1: Point) -> Result<Self, CurveError> {
        let dto = LinearCurveDto {
            points: [p0, p1],
            shift_rate: None,
        };
        Self::try_from(dto)
    }

    /// Creates a curve from points known to be valid
    pub(crate) const fn from_base(base: [Point; 2]) -> Self {
        Self {
            base,
            shift_rate: None,
        }
    }

    /// A horizontal line at price `y`
    ///
    /// The line is infinite; its two endpoints only fix its direction.
    pub fn horizontal(y: f64) -> Self {
        Self::from_base([Point::new(0.0, y), Point::new(1.0, y)])
    }

    /// A vertical line at quantity `x`
    ///
    /// The line is infinite; its two endpoints only fix its direction.
    pub fn vertical(x: f64) -> Self {
        Self::from_base([Point::new(x, 0.0), Point::new(x, 1.0)])
    }

    /// The endpoints as rendered, i.e. including any active shift
    pub fn endpoints(&self) -> [Point; 2] {
        match self.shift_rate {
            Some(rate) => self.base.map(|point| point.shifted(rate)),
            None => self.base,
        }
    }

    /// The unshifted endpoints
    pub fn base_endpoints(&self) -> [Point; 2] {
        self.base
    }

    /// The pre-shift position, present only while a shift rate is active
    pub fn shadow(&self) -> Option<[Point; 2]> {
        self.shift_rate.map(|_| self.base)
    }

    /// The active shift rate, if any
    pub fn shift_rate(&self) -> Option<f64> {
        self.shift_rate
    }

    /// Shifts the rendered curve to `y * (1 + rate)`, keeping the base in place
    pub fn set_shift_rate(&mut self, rate: f64) {
        self.shift_rate = Some(rate);
    }

    /// Removes any shift, returning the curve to its base position
    pub fn clear_shift_rate(&mut self) {
        self.shift_rate = None;
    }

    /// Moves the base endpoints; the rendered curve follows with its shift intact
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.base = self.base.map(|point| point.translated(dx, dy));
    }

    /// Replaces the base position with that of `other`, keeping this curve's shift rate
    pub fn replace_base(&mut self, other: &LinearCurve) {
        self.base = other.base;
    }

    /// Whether the line is vertical (both endpoints share a quantity)
    pub fn is_vertical(&self) -> bool {
        self.base[1].x - self.base[0].x == 0.0
    }

    /// The slope `dy/dx` of the rendered line (infinite or NaN when vertical)
    pub fn slope(&self) -> f64 {
        let [p0, p1] = self.endpoints();
        (p1.y - p0.y) / (p1.x - p0.x)
    }

    /// The price intercept of the rendered line
    pub fn intercept(&self) -> f64 {
        let [p0, _] = self.endpoints();
        p0.y - self.slope() * p0.x
    }

    /// The price on the rendered line at quantity `x`
    pub fn price_at(&self, x: f64) -> f64 {
        self.slope() * x + self.intercept()
    }

    /// The quantity on the rendered line at the given price
    ///
    /// There is no clamping to the chart: the result may be negative or beyond
    /// the maximum quantity, and callers display such values as "—".
    pub fn quantity_at_price(&self, price: f64) -> f64 {
        let [p0, p1] = self.endpoints();
        let inverse = (p1.x - p0.x) / (p1.y - p0.y);
        p0.x + inverse * (price - p0.y)
    }

    /// Point elasticity `|1/slope| * (y/x)` at a location on the line
    ///
    /// Unguarded: a zero quantity or a flat line yields an infinite or NaN result.
    pub fn elasticity_at(&self, point: Point) -> f64 {
        let gradient = (1.0 / self.slope()).abs();
        gradient * (point.y / point.x)
    }

    /// The minimum and maximum quantity of the rendered endpoints
    pub fn x_range(&self) -> (f64, f64) {
        let [p0, p1] = self.endpoints();
        (p0.x.min(p1.x), p0.x.max(p1.x))
    }

    /// The minimum and maximum price of the rendered endpoints
    pub fn y_range(&self) -> (f64, f64) {
        let [p0, p1] = self.endpoints();
        (p0.y.min(p1.y), p0.y.max(p1.y))
    }

    /// Computes where this line meets `other`, both extended infinitely
    ///
    /// # Errors
    ///
    /// - [`GeometryError::ParallelVertical`] if both lines are vertical
    /// - [`GeometryError::Parallel`] if both lines have the same slope
    pub fn intersect(&self, other: &LinearCurve) -> Result<Point, GeometryError> {
        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => Err(GeometryError::ParallelVertical),
            (true, false) => {
                let x = self.endpoints()[1].x;
                Ok(Point::new(x, other.price_at(x)))
            }
            (false, true) => {
                let x = other.endpoints()[1].x;
                Ok(Point::new(x, self.price_at(x)))
            }
            (false, false) => {
                let (m1, b1) = (self.slope(), self.intercept());
                let (m2, b2) = (other.slope(), other.intercept());
                if m1 == m2 {
                    return Err(GeometryError::Parallel);
                }
                // m1 * x + b1 = m2 * x + b2
                let x = (b2 - b1) / (m1 - m2);
                Ok(Point::new(x, m1 * x + b1))
            }
        }
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
///
/// `points` is the base position; `shift_rate` is omitted for unshifted curves.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct LinearCurveDto {
    /// The two base points the line passes through
    pub points: [Point; 2],
    /// The tax (positive) or subsidy (negative) rate, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub shift_rate: Option<f64>,
}

impl From<LinearCurve> for LinearCurveDto {
    fn from(value: LinearCurve) -> Self {
        Self {
            points: value.base,
            shift_rate: value.shift_rate,
        }
    }
}

impl TryFrom<LinearCurveDto> for LinearCurve {
    type Error = CurveError;

    /// Attempts to create a curve from a DTO, validating that:
    /// 1. Every coordinate and the shift rate are finite
    /// 2. The two points are distinct
    fn try_from(value: LinearCurveDto) -> Result<Self, Self::Error> {
        let [p0, p1] = value.points;
        if !p0.is_finite() || !p1.is_finite() {
            return Err(CurveError::NonFinite);
        }
        if value.shift_rate.is_some_and(|rate| !rate.is_finite()) {
            return Err(CurveError::NonFinite);
        }
        if p0 == p1 {
            return Err(CurveError::Coincident);
        }
        Ok(Self {
            base: value.points,
            shift_rate: value.shift_rate,
        })
    }
}

/// Errors that can occur when creating a LinearCurve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Error when a coordinate or rate is NaN or infinite
    #[error("Coordinates and rates must be finite")]
    NonFinite,
    /// Error when both points are the same, leaving the line undefined
    #[error("A line needs two distinct points")]
    Coincident,
}
