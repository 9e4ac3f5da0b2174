//! Real São Paulo state locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

use route_cost::model::CoordinateRecord;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Distribution centers
// ============================================================================

pub const CD_CAJAMAR: Location = Location::new("CD Cajamar", -23.3556, -46.8769);
pub const CD_GUARULHOS: Location = Location::new("CD Guarulhos", -23.4538, -46.5333);

// ============================================================================
// Customers
// ============================================================================

pub const CUSTOMERS: &[Location] = &[
    Location::new("Campinas", -22.9056, -47.0608),
    Location::new("Jundiaí", -23.1864, -46.8842),
    Location::new("Santos", -23.9608, -46.3336),
    Location::new("Sorocaba", -23.5015, -47.4526),
    Location::new("São José dos Campos", -23.1791, -45.8872),
    Location::new("Ribeirão Preto", -21.1775, -47.8103),
    Location::new("Piracicaba", -22.7253, -47.6492),
    Location::new("Osasco", -23.5329, -46.7917),
];

/// One record per customer, all departing from `cd`.
pub fn records_from(cd: &Location, customers: &[Location]) -> Vec<CoordinateRecord> {
    customers
        .iter()
        .map(|customer| {
            CoordinateRecord::new(customer.name, customer.name, cd.coords(), customer.coords())
                .with_origin_site(cd.name, cd.name)
        })
        .collect()
}
