//! Route aggregation engine.
//!
//! Route mode fans independent legs out over a bounded worker pool. Trip mode
//! chains legs one after the other, each departing from the previous stop.

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, info_span, warn};

use crate::error::PlanError;
use crate::evaluator::evaluate;
use crate::model::{
    CoordinateRecord, LegOutcome, LegRequest, RunMode, RunResult, RunTotals, SequencedStop,
    VehicleProfile,
};
use crate::sequencer::sequence;
use crate::traits::RoutingProvider;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum outstanding provider requests in route mode.
    pub max_workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_workers: 10 }
    }
}

/// Lifecycle of a single run. There is no failed state; only legs fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Initialized,
    Sequencing,
    Dispatching,
    Aggregating,
    Completed,
}

/// Costs `records` with `vehicle` in the given mode.
///
/// Returns an error only for configuration problems found before any request
/// is sent. Legs the provider cannot route come back with `success == false`.
pub fn run<P>(
    mode: RunMode,
    records: &[CoordinateRecord],
    vehicle: &VehicleProfile,
    provider: &P,
    config: &EngineConfig,
) -> Result<RunResult, PlanError>
where
    P: RoutingProvider + ?Sized,
{
    let span = info_span!("run", ?mode, destinations = records.len(), vehicle = %vehicle.id);
    let _guard = span.enter();

    validate(mode, records, vehicle)?;
    debug!(phase = ?RunPhase::Initialized, "run phase");

    let (sequence, legs) = match mode {
        RunMode::Route => (None, dispatch_routes(records, vehicle, provider, config)?),
        RunMode::Trip => {
            let (stops, legs) = dispatch_trip(&records[0], records, vehicle, provider);
            (Some(stops), legs)
        }
    };

    debug!(phase = ?RunPhase::Aggregating, "run phase");
    let totals = legs.iter().fold(RunTotals::default(), |mut totals, leg| {
        totals.record(leg);
        totals
    });

    info!(
        attempted = totals.attempted,
        succeeded = totals.succeeded,
        total_km = totals.total_distance_km,
        total_min = totals.total_time_min,
        total_liters = totals.total_fuel_liters,
        total_cost = totals.total_cost,
        "run completed"
    );
    debug!(phase = ?RunPhase::Completed, "run phase");

    Ok(RunResult {
        mode,
        legs,
        totals,
        sequence,
        center: center_of(records),
    })
}

fn validate(
    mode: RunMode,
    records: &[CoordinateRecord],
    vehicle: &VehicleProfile,
) -> Result<(), PlanError> {
    vehicle.validate()?;

    let first = records.first().ok_or(PlanError::NoDestinations)?;
    for record in records {
        record.validate()?;
        if mode == RunMode::Trip && record.origin != first.origin {
            return Err(PlanError::MixedOrigins {
                client: record.client.clone(),
            });
        }
    }

    Ok(())
}

/// Independent legs, concurrently. Output index matches input index.
fn dispatch_routes<P>(
    records: &[CoordinateRecord],
    vehicle: &VehicleProfile,
    provider: &P,
    config: &EngineConfig,
) -> Result<Vec<LegOutcome>, PlanError>
where
    P: RoutingProvider + ?Sized,
{
    let requests: Vec<LegRequest> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            LegRequest::from_record(index, record, record.origin, &record.origin_label)
        })
        .collect();

    let workers = config.max_workers.clamp(1, requests.len().max(1));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("route-leg-{}", i))
        .build()
        .map_err(|err| PlanError::WorkerPool(err.to_string()))?;

    debug!(phase = ?RunPhase::Dispatching, workers, "run phase");
    let outcomes = pool.install(|| {
        requests
            .par_iter()
            .map(|request| resolve_leg(request, vehicle, provider))
            .collect::<Vec<_>>()
    });

    Ok(outcomes)
}

/// Chained legs, strictly in sequence. The current origin is the fold state.
fn dispatch_trip<P>(
    start: &CoordinateRecord,
    records: &[CoordinateRecord],
    vehicle: &VehicleProfile,
    provider: &P,
) -> (Vec<SequencedStop>, Vec<LegOutcome>)
where
    P: RoutingProvider + ?Sized,
{
    debug!(phase = ?RunPhase::Sequencing, "run phase");
    let stops = sequence(start.origin, records);

    debug!(phase = ?RunPhase::Dispatching, workers = 1, "run phase");
    let (_, _, legs) = stops.iter().enumerate().fold(
        (start.origin, start.origin_label.as_str(), Vec::with_capacity(stops.len())),
        |(current, label, mut legs), (index, stop)| {
            let request = LegRequest::from_record(index, &stop.record, current, label);
            legs.push(resolve_leg(&request, vehicle, provider));
            (stop.record.destination, stop.record.destination_label.as_str(), legs)
        },
    );

    (stops, legs)
}

fn resolve_leg<P>(request: &LegRequest, vehicle: &VehicleProfile, provider: &P) -> LegOutcome
where
    P: RoutingProvider + ?Sized,
{
    let response = provider.fetch_leg(request.origin, request.destination);
    let outcome = evaluate(request, &response, vehicle);

    if outcome.success {
        debug!(
            leg = request.index,
            client = %request.client,
            km = outcome.distance_km,
            cost = outcome.cost,
            "leg routed"
        );
    } else {
        warn!(
            leg = request.index,
            client = %request.client,
            "routing failed, leg left unrouted"
        );
    }

    outcome
}

/// Mean of every origin and destination, used to frame the map.
fn center_of(records: &[CoordinateRecord]) -> Option<(f64, f64)> {
    if records.is_empty() {
        return None;
    }

    let (lat_sum, lng_sum) = records.iter().fold((0.0, 0.0), |(lat, lng), record| {
        (
            lat + record.origin.0 + record.destination.0,
            lng + record.origin.1 + record.destination.1,
        )
    });
    let count = (records.len() * 2) as f64;

    Some((lat_sum / count, lng_sum / count))
}
