use serde::Serialize;
use supdem_engine::{MarketEvent, MarketModel, MarketView};
use tracing::{Level, event, span};

/// The outcome of a single replayed event
///
/// Serialized untagged: either the full view, or `{"error": "..."}` when the
/// curves stopped meeting in a single point.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplayStep {
    /// The market after the event
    View(MarketView),
    /// The reason the market has no equilibrium after the event
    Error {
        /// The geometry error message
        error: String,
    },
}

/// Applies each event in turn, recording the outcome of every step
///
/// A degenerate step does not stop the replay: the model keeps its curves and
/// the next event may restore an equilibrium.
pub fn replay(model: &mut MarketModel, events: &[MarketEvent]) -> Vec<ReplayStep> {
    events
        .iter()
        .enumerate()
        .map(|(index, market_event)| {
            let span = span!(Level::INFO, "replay", index);
            let _guard = span.enter();
            match model.apply(market_event) {
                Ok(view) => ReplayStep::View(view),
                Err(err) => {
                    event!(Level::WARN, ?market_event, %err, "step has no equilibrium");
                    ReplayStep::Error {
                        error: err.to_string(),
                    }
                }
            }
        })
        .collect()
}
