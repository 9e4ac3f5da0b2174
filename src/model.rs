//! Data model for a costing run.
//!
//! Coordinates are `(latitude, longitude)` tuples throughout the crate. The
//! provider's `[longitude, latitude]` convention only exists inside
//! [`crate::osrm`].

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::polyline::Polyline;

/// One candidate delivery leg as handed over by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub client: String,
    pub destination_label: String,
    /// Distribution center identifier.
    #[serde(default)]
    pub cd: String,
    #[serde(default)]
    pub origin_label: String,
    /// Distribution center (lat, lng).
    pub origin: (f64, f64),
    /// Customer (lat, lng).
    pub destination: (f64, f64),
}

impl CoordinateRecord {
    pub fn new(
        client: impl Into<String>,
        destination_label: impl Into<String>,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Self {
        Self {
            client: client.into(),
            destination_label: destination_label.into(),
            cd: String::new(),
            origin_label: String::new(),
            origin,
            destination,
        }
    }

    /// Names the distribution center the leg departs from.
    pub fn with_origin_site(
        mut self,
        cd: impl Into<String>,
        origin_label: impl Into<String>,
    ) -> Self {
        self.cd = cd.into();
        self.origin_label = origin_label.into();
        self
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.client.trim().is_empty() {
            return Err(PlanError::EmptyClient);
        }

        check_range(&self.client, "origin latitude", self.origin.0, 90.0)?;
        check_range(&self.client, "origin longitude", self.origin.1, 180.0)?;
        check_range(&self.client, "destination latitude", self.destination.0, 90.0)?;
        check_range(&self.client, "destination longitude", self.destination.1, 180.0)
    }
}

fn check_range(
    client: &str,
    field: &'static str,
    value: f64,
    limit: f64,
) -> Result<(), PlanError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(PlanError::InvalidCoordinate {
            client: client.to_string(),
            field,
            value,
        })
    }
}

/// Returns true when `point` is a usable (lat, lng) pair.
pub fn is_valid_point(point: (f64, f64)) -> bool {
    point.0.is_finite() && point.1.is_finite() && point.0.abs() <= 90.0 && point.1.abs() <= 180.0
}

/// Fuel profile of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub id: String,
    /// Kilometres driven per litre.
    pub consumption_km_per_l: f64,
    /// Currency per litre.
    pub fuel_price: f64,
    pub capacity: Option<f64>,
}

impl VehicleProfile {
    pub fn new(id: impl Into<String>, consumption_km_per_l: f64, fuel_price: f64) -> Self {
        Self {
            id: id.into(),
            consumption_km_per_l,
            fuel_price,
            capacity: None,
        }
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Rejects profiles that would divide by zero or produce negative costs.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.consumption_km_per_l.is_finite() && self.consumption_km_per_l > 0.0) {
            return Err(PlanError::InvalidConsumption {
                vehicle: self.id.clone(),
                value: self.consumption_km_per_l,
            });
        }
        if !(self.fuel_price.is_finite() && self.fuel_price >= 0.0) {
            return Err(PlanError::InvalidFuelPrice {
                vehicle: self.id.clone(),
                value: self.fuel_price,
            });
        }
        if let Some(capacity) = self.capacity {
            if !(capacity.is_finite() && capacity >= 0.0) {
                return Err(PlanError::InvalidCapacity {
                    vehicle: self.id.clone(),
                    value: capacity,
                });
            }
        }
        Ok(())
    }
}

/// Fixed catalog of vehicles a run can pick from, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleCatalog {
    vehicles: Vec<VehicleProfile>,
}

impl VehicleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile; a later profile with the same id is ignored, matching
    /// the first-row lookup of the source table.
    pub fn insert(&mut self, profile: VehicleProfile) {
        if self.vehicles.iter().all(|existing| existing.id != profile.id) {
            self.vehicles.push(profile);
        }
    }

    pub fn get(&self, id: &str) -> Result<&VehicleProfile, PlanError> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.id == id)
            .ok_or_else(|| PlanError::UnknownVehicle(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vehicles.iter().map(|vehicle| vehicle.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl FromIterator<VehicleProfile> for VehicleCatalog {
    fn from_iter<I: IntoIterator<Item = VehicleProfile>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for profile in iter {
            catalog.insert(profile);
        }
        catalog
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Every leg departs from the distribution center.
    Route,
    /// Legs are chained in proximity order.
    Trip,
}

/// A single point-to-point request.
#[derive(Debug, Clone, PartialEq)]
pub struct LegRequest {
    pub index: usize,
    pub client: String,
    pub cd: String,
    pub origin_label: String,
    pub destination_label: String,
    pub origin: (f64, f64),
    pub destination: (f64, f64),
}

impl LegRequest {
    /// Leg towards `record`'s destination, departing from the given point.
    pub fn from_record(
        index: usize,
        record: &CoordinateRecord,
        origin: (f64, f64),
        origin_label: &str,
    ) -> Self {
        Self {
            index,
            client: record.client.clone(),
            cd: record.cd.clone(),
            origin_label: origin_label.to_string(),
            destination_label: record.destination_label.clone(),
            origin,
            destination: record.destination,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegOutcome {
    pub index: usize,
    pub client: String,
    pub cd: String,
    pub origin_label: String,
    pub destination_label: String,
    pub origin: (f64, f64),
    pub destination: (f64, f64),
    pub polyline: Polyline,
    pub distance_km: f64,
    pub duration_min: f64,
    pub fuel_liters: f64,
    pub cost: f64,
    pub success: bool,
}

impl LegOutcome {
    /// Placeholder for a leg the provider could not route.
    pub fn failed(request: &LegRequest) -> Self {
        Self {
            index: request.index,
            client: request.client.clone(),
            cd: request.cd.clone(),
            origin_label: request.origin_label.clone(),
            destination_label: request.destination_label.clone(),
            origin: request.origin,
            destination: request.destination,
            polyline: Polyline::new(Vec::new()),
            distance_km: 0.0,
            duration_min: 0.0,
            fuel_liters: 0.0,
            cost: 0.0,
            success: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    pub total_cost: f64,
    pub total_time_min: f64,
    pub total_fuel_liters: f64,
    pub total_distance_km: f64,
    pub attempted: usize,
    pub succeeded: usize,
}

impl RunTotals {
    pub fn record(&mut self, outcome: &LegOutcome) {
        self.attempted += 1;
        if !outcome.success {
            return;
        }
        self.succeeded += 1;
        self.total_cost += outcome.cost;
        self.total_time_min += outcome.duration_min;
        self.total_fuel_liters += outcome.fuel_liters;
        self.total_distance_km += outcome.distance_km;
    }

    pub fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.succeeded)
    }
}

/// A trip destination with its straight-line distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencedStop {
    /// Position of the record in the caller's input.
    pub input_index: usize,
    pub record: CoordinateRecord,
    pub geodesic_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub mode: RunMode,
    pub legs: Vec<LegOutcome>,
    pub totals: RunTotals,
    /// Visiting order, trip mode only.
    pub sequence: Option<Vec<SequencedStop>>,
    /// Mean of every origin and destination of the run.
    pub center: Option<(f64, f64)>,
}

impl RunResult {
    pub fn failed_legs(&self) -> impl Iterator<Item = &LegOutcome> {
        self.legs.iter().filter(|leg| !leg.success)
    }
}
