/**
 * The market model: supply, demand, the active intervention, and the rules
 * deriving everything a chart displays from them.
 */
mod market;
pub use market::*;

/**
 * Drag roles and the clamping that keeps curves on the chart.
 */
mod drag;
pub use drag::*;

/**
 * Events a user interface feeds into the model.
 */
mod event;
pub use event::*;

/**
 * Read-only snapshots handed back to the rendering layer.
 */
mod view;
pub use view::*;

mod table;
pub use table::*;

pub use supdem_core::models::GeometryError;
