//! Straight-line curves for the chart.
//!
//! Both market curves and the draggable intervention lines are instances of
//! [`LinearCurve`]: a line through two points, optionally shifted in price by a
//! tax or subsidy rate.

mod linear;

pub use linear::*;

/// Errors from computations on degenerate line geometry
///
/// These are fatal to the requested computation only. Consumers are expected
/// to catch them and display "no equilibrium".
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Both lines are vertical, so they never meet in a single point
    #[error("parallel-vertical")]
    ParallelVertical,
    /// Both lines share a slope, so they never meet in a single point
    #[error("parallel")]
    Parallel,
}
