//! route-cost core
//!
//! Road-transport cost aggregation over an external routing provider.
//! Legs are either rendered independently from a distribution center
//! ("route" mode) or chained in proximity order ("trip" mode).

pub mod model;
pub mod error;
pub mod traits;
pub mod osrm;
pub mod polyline;
pub mod evaluator;
pub mod haversine;
pub mod sequencer;
pub mod engine;
pub mod dataset;
