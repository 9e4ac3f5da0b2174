//! In-memory delivery table.
//!
//! The host loads its source table once, hands the rows over here and keeps
//! the resulting [`Dataset`] for the lifetime of the process. Nothing in this
//! module touches the filesystem or caches across calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::model::{is_valid_point, CoordinateRecord, VehicleCatalog, VehicleProfile};

/// A row as it comes out of the source table, coordinates still textual.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    pub client: String,
    #[serde(default)]
    pub grouping: Option<String>,
    /// Distribution center identifier.
    pub cd: String,
    pub origin_label: String,
    pub destination_label: String,
    pub origin_lat: String,
    pub origin_lon: String,
    pub destination_lat: String,
    pub destination_lon: String,
    #[serde(default)]
    pub vehicle: Option<String>,
    /// Kilometres per litre for `vehicle`.
    #[serde(default)]
    pub consumption_km_per_l: Option<f64>,
    #[serde(default)]
    pub fuel_price: Option<f64>,
    #[serde(default)]
    pub capacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRow {
    pub grouping: Option<String>,
    pub vehicle: Option<String>,
    pub record: CoordinateRecord,
}

/// Which rows a run should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Group(String),
    Clients(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    vehicles: VehicleCatalog,
    dropped: usize,
}

/// Parses a coordinate cell.
///
/// Accepts a comma decimal separator and ignores any whitespace, including
/// non-breaking spaces. Returns `None` when the cell is not a finite number.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

impl Dataset {
    /// Builds the table, dropping rows whose coordinates do not parse or are
    /// out of range, and rows without a client.
    ///
    /// The vehicle catalog is read from the kept rows: the first row naming a
    /// vehicle with both consumption and price defines its profile. Profiles
    /// are not validated here; a bad one is rejected when a run uses it.
    pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Self {
        let mut kept = Vec::new();
        let mut vehicles = VehicleCatalog::new();
        let mut dropped = 0;

        for raw in rows {
            match parse_row(&raw) {
                Some(row) => {
                    if let Some(profile) = vehicle_profile(&raw) {
                        vehicles.insert(profile);
                    }
                    kept.push(row);
                }
                None => {
                    debug!(client = %raw.client, "dropping row with unusable coordinates");
                    dropped += 1;
                }
            }
        }

        Self {
            rows: kept,
            vehicles,
            dropped,
        }
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Number of source rows rejected while building.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Distinct grouping identifiers in first-seen order.
    pub fn groups(&self) -> Vec<&str> {
        distinct(self.rows.iter().filter_map(|row| row.grouping.as_deref()))
    }

    /// Distinct client identifiers in first-seen order.
    pub fn clients(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|row| row.record.client.as_str()))
    }

    /// Vehicles a run can be costed with, in first-seen order.
    pub fn vehicles(&self) -> &VehicleCatalog {
        &self.vehicles
    }

    pub fn vehicle(&self, id: &str) -> Result<&VehicleProfile, PlanError> {
        self.vehicles().get(id)
    }

    /// Coordinate records for a run, in table order.
    pub fn select(&self, selection: &Selection) -> Vec<CoordinateRecord> {
        self.rows
            .iter()
            .filter(|row| match selection {
                Selection::All => true,
                Selection::Group(group) => row.grouping.as_deref() == Some(group.as_str()),
                Selection::Clients(clients) => {
                    clients.iter().any(|client| *client == row.record.client)
                }
            })
            .map(|row| row.record.clone())
            .collect()
    }
}

fn parse_row(raw: &RawRow) -> Option<DatasetRow> {
    if raw.client.trim().is_empty() {
        return None;
    }

    let origin = (parse_coordinate(&raw.origin_lat)?, parse_coordinate(&raw.origin_lon)?);
    let destination = (
        parse_coordinate(&raw.destination_lat)?,
        parse_coordinate(&raw.destination_lon)?,
    );
    if !is_valid_point(origin) || !is_valid_point(destination) {
        return None;
    }

    let record = CoordinateRecord::new(
        raw.client.clone(),
        raw.destination_label.clone(),
        origin,
        destination,
    )
    .with_origin_site(raw.cd.clone(), raw.origin_label.clone());

    Some(DatasetRow {
        grouping: non_blank(&raw.grouping),
        vehicle: non_blank(&raw.vehicle),
        record,
    })
}

fn vehicle_profile(raw: &RawRow) -> Option<VehicleProfile> {
    let id = non_blank(&raw.vehicle)?;
    let profile = VehicleProfile::new(id, raw.consumption_km_per_l?, raw.fuel_price?);

    Some(match raw.capacity {
        Some(capacity) => profile.with_capacity(capacity),
        None => profile,
    })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|value| !value.trim().is_empty())
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
