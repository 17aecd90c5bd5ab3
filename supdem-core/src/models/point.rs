/// A location on the chart
///
/// Each point consists of:
/// - An `x` coordinate, the quantity, within `[0, max_quantity]`
/// - A `y` coordinate, the price, within `[0, max_price]`
///
/// Points outside of the chart are still valid values. Callers treat negative
/// coordinates as "not representable" rather than as errors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The quantity coordinate
    pub x: f64,
    /// The price coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point from a quantity and a price
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point moved by the given offsets
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the point with its price scaled by `1 + rate`
    ///
    /// This is how a tax (positive rate) or subsidy (negative rate) moves a curve.
    pub fn shifted(self, rate: f64) -> Self {
        Self {
            x: self.x,
            y: self.y * (1.0 + rate),
        }
    }

    /// Whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether the point can be shown on a chart, i.e. neither coordinate is negative
    pub fn is_representable(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_only_moves_price() {
        let p = Point::new(100.0, 200.0);
        assert_eq!(p.shifted(0.1).x, 100.0);
        assert!((p.shifted(0.1).y - 220.0).abs() < 1e-9);
        assert!((p.shifted(-0.1).y - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_representable() {
        assert!(Point::new(0.0, 0.0).is_representable());
        assert!(!Point::new(-1.0, 10.0).is_representable());
        assert!(!Point::new(10.0, -0.5).is_representable());
        assert!(!Point::new(f64::NAN, 10.0).is_representable());
    }

    #[test]
    fn test_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::INFINITY, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::NAN).is_finite());
    }
}
