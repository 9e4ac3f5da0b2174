//! Proximity ordering for trip mode.
//!
//! Destinations are ranked once by straight-line distance from the origin.
//! This is not a nearest-neighbour tour: distances are never re-measured from
//! the previous stop.

use crate::haversine::haversine_km;
use crate::model::{CoordinateRecord, SequencedStop};

/// Orders `destinations` by ascending great-circle distance from `origin`.
///
/// Equal distances keep their input order.
pub fn sequence(origin: (f64, f64), destinations: &[CoordinateRecord]) -> Vec<SequencedStop> {
    let mut stops: Vec<SequencedStop> = destinations
        .iter()
        .enumerate()
        .map(|(input_index, record)| SequencedStop {
            input_index,
            record: record.clone(),
            geodesic_km: haversine_km(origin, record.destination),
        })
        .collect();

    stops.sort_by(|a, b| a.geodesic_km.total_cmp(&b.geodesic_km));
    stops
}
