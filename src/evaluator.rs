//! Converts provider responses into leg costs.

use crate::model::{LegOutcome, LegRequest, VehicleProfile};
use crate::traits::RoutingResponse;

/// Cost one leg. A `Failure` response, or a route with negative or
/// non-finite metrics, yields the zeroed placeholder outcome.
///
/// `vehicle` is expected to have passed [`VehicleProfile::validate`]. No
/// rounding is applied here.
pub fn evaluate(
    request: &LegRequest,
    response: &RoutingResponse,
    vehicle: &VehicleProfile,
) -> LegOutcome {
    let route = match response {
        RoutingResponse::Success(route) if route.is_well_formed() => route,
        _ => return LegOutcome::failed(request),
    };

    let distance_km = route.distance_km();
    let duration_min = route.duration_min();
    let fuel_liters = distance_km / vehicle.consumption_km_per_l;
    let cost = fuel_liters * vehicle.fuel_price;

    LegOutcome {
        index: request.index,
        client: request.client.clone(),
        cd: request.cd.clone(),
        origin_label: request.origin_label.clone(),
        destination_label: request.destination_label.clone(),
        origin: request.origin,
        destination: request.destination,
        polyline: route.geometry.clone(),
        distance_km,
        duration_min,
        fuel_liters,
        cost,
        success: true,
    }
}
