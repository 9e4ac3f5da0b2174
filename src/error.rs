//! Pre-flight configuration errors.
//!
//! Only failures detected before any network call surface here. A leg that
//! cannot be routed is not an error; see [`crate::traits::RoutingResponse`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("at least one destination must be selected")]
    NoDestinations,

    #[error("coordinate record must carry a non-empty client identifier")]
    EmptyClient,

    #[error("invalid {field} for client {client}: {value}")]
    InvalidCoordinate {
        client: String,
        field: &'static str,
        value: f64,
    },

    #[error("unknown vehicle {0}")]
    UnknownVehicle(String),

    #[error("vehicle {vehicle} has non-positive consumption rate {value}")]
    InvalidConsumption { vehicle: String, value: f64 },

    #[error("vehicle {vehicle} has invalid fuel price {value}")]
    InvalidFuelPrice { vehicle: String, value: f64 },

    #[error("vehicle {vehicle} has invalid capacity {value}")]
    InvalidCapacity { vehicle: String, value: f64 },

    #[error("trip mode requires a single origin; client {client} departs from a different one")]
    MixedOrigins { client: String },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}
