//! Seam between the aggregation engine and the routing provider.
//!
//! The engine only needs one road route per leg. Concrete providers (OSRM,
//! test doubles) implement [`RoutingProvider`].

use crate::polyline::Polyline;

/// Road route for a single leg, in the provider's units.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingResult {
    pub geometry: Polyline,
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RoutingResult {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_s / 60.0
    }

    /// Distance and duration are finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.distance_m.is_finite()
            && self.duration_s.is_finite()
            && self.distance_m >= 0.0
            && self.duration_s >= 0.0
    }
}

/// Outcome of one provider call.
///
/// Transport errors, non-success statuses and "no route" answers all collapse
/// into `Failure`; callers cannot and should not tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingResponse {
    Success(RoutingResult),
    Failure,
}

/// Provides a driving route between two (lat, lng) points.
///
/// Implementations must be callable from several worker threads at once and
/// must bound each call by their own timeout.
pub trait RoutingProvider: Sync {
    fn fetch_leg(&self, origin: (f64, f64), destination: (f64, f64)) -> RoutingResponse;
}
