//! Deterministic in-process routing provider.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use route_cost::haversine::haversine_km;
use route_cost::polyline::Polyline;
use route_cost::traits::{RoutingProvider, RoutingResponse, RoutingResult};

/// Road distance is modelled as 1.3x the straight line at 60 km/h.
pub const DETOUR_FACTOR: f64 = 1.3;

#[derive(Default)]
pub struct ScriptedProvider {
    failing: Vec<(f64, f64)>,
    delays: Vec<((f64, f64), u64)>,
    calls: Mutex<Vec<((f64, f64), (f64, f64))>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any leg ending at `destination` fails.
    pub fn failing_at(mut self, destination: (f64, f64)) -> Self {
        self.failing.push(destination);
        self
    }

    /// Legs ending at `destination` take `millis` to answer.
    pub fn delayed_at(mut self, destination: (f64, f64), millis: u64) -> Self {
        self.delays.push((destination, millis));
        self
    }

    /// (origin, destination) of every call, in arrival order.
    pub fn calls(&self) -> Vec<((f64, f64), (f64, f64))> {
        self.calls.lock().unwrap().clone()
    }

    pub fn road_meters(origin: (f64, f64), destination: (f64, f64)) -> f64 {
        haversine_km(origin, destination) * 1000.0 * DETOUR_FACTOR
    }
}

impl RoutingProvider for ScriptedProvider {
    fn fetch_leg(&self, origin: (f64, f64), destination: (f64, f64)) -> RoutingResponse {
        self.calls.lock().unwrap().push((origin, destination));

        if let Some((_, millis)) = self.delays.iter().find(|(point, _)| *point == destination) {
            thread::sleep(Duration::from_millis(*millis));
        }

        if self.failing.contains(&destination) {
            return RoutingResponse::Failure;
        }

        let distance_m = Self::road_meters(origin, destination);
        RoutingResponse::Success(RoutingResult {
            geometry: Polyline::new(vec![origin, destination]),
            distance_m,
            duration_s: distance_m / 1000.0 * 60.0,
        })
    }
}

/// Always answers with the same route, whatever the leg.
pub struct FixedProvider {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RoutingProvider for FixedProvider {
    fn fetch_leg(&self, origin: (f64, f64), destination: (f64, f64)) -> RoutingResponse {
        RoutingResponse::Success(RoutingResult {
            geometry: Polyline::new(vec![origin, destination]),
            distance_m: self.distance_m,
            duration_s: self.duration_s,
        })
    }
}

/// Fails the test if the engine ever reaches the provider.
pub struct UnreachableProvider;

impl RoutingProvider for UnreachableProvider {
    fn fetch_leg(&self, _origin: (f64, f64), _destination: (f64, f64)) -> RoutingResponse {
        panic!("provider must not be called for a rejected run");
    }
}

/// Holds every call for a while and records the peak number in flight.
pub struct CountingProvider {
    hold: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl CountingProvider {
    pub fn new(hold_millis: u64) -> Self {
        Self {
            hold: Duration::from_millis(hold_millis),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl RoutingProvider for CountingProvider {
    fn fetch_leg(&self, origin: (f64, f64), destination: (f64, f64)) -> RoutingResponse {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.hold);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        RoutingResponse::Success(RoutingResult {
            geometry: Polyline::new(vec![origin, destination]),
            distance_m: ScriptedProvider::road_meters(origin, destination),
            duration_s: 60.0,
        })
    }
}
