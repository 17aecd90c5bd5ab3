#![warn(missing_docs)]
//! Core models for an interactive supply and demand chart.
//!
//! A chart is two straight lines, supply and demand, living in a bounded
//! quantity/price plane. This crate holds the geometry of those lines, the
//! named slope presets a user can pick from, the policy interventions that can
//! be applied to the market, and the configuration describing the chart.
//! The state machine tying them together lives in `supdem-engine`.

/// Core domain models for the chart.
///
/// The models in this module are plain data structures carrying the geometry
/// that every consumer (engine, command line, renderer) agrees on. They are
/// free of any rendering or event-wiring concerns.
pub mod models;
