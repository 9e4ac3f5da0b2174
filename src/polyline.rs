//! Drawable leg geometry.
//!
//! Points are stored as (latitude, longitude). Providers that speak GeoJSON
//! hand over `[longitude, latitude]` pairs; the swap happens once, in
//! [`Polyline::from_lng_lat`], and nowhere else.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

/// Axis-aligned extent of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl Polyline {
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Builds a polyline from GeoJSON-ordered `[lng, lat]` positions.
    pub fn from_lng_lat(coordinates: &[[f64; 2]]) -> Self {
        Self {
            points: coordinates.iter().map(|[lng, lat]| (*lat, *lng)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Extent of the geometry, `None` when there are no points.
    pub fn bounds(&self) -> Option<Bounds> {
        let (&first, rest) = self.points.split_first()?;
        let bounds = rest.iter().fold(
            Bounds { min: first, max: first },
            |acc, &(lat, lng)| Bounds {
                min: (acc.min.0.min(lat), acc.min.1.min(lng)),
                max: (acc.max.0.max(lat), acc.max.1.max(lng)),
            },
        );
        Some(bounds)
    }
}
