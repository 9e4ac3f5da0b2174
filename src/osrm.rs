//! OSRM HTTP adapter for single-leg driving routes.

use serde::Deserialize;
use tracing::debug;

use crate::polyline::Polyline;
use crate::traits::{RoutingProvider, RoutingResponse, RoutingResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Route URL for a leg. OSRM takes `lng,lat` pairs.
    pub fn route_url(&self, origin: (f64, f64), destination: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.1,
            origin.0,
            destination.1,
            destination.0
        )
    }
}

impl RoutingProvider for OsrmClient {
    fn fetch_leg(&self, origin: (f64, f64), destination: (f64, f64)) -> RoutingResponse {
        let url = self.route_url(origin, destination);

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => match body.routes.into_iter().next() {
                Some(route) => {
                    let result = RoutingResult {
                        geometry: Polyline::from_lng_lat(&route.geometry.coordinates),
                        distance_m: route.distance,
                        duration_s: route.duration,
                    };
                    if result.is_well_formed() {
                        RoutingResponse::Success(result)
                    } else {
                        debug!(
                            %url,
                            distance = route.distance,
                            duration = route.duration,
                            "OSRM route has negative or non-finite metrics"
                        );
                        RoutingResponse::Failure
                    }
                }
                None => {
                    debug!(%url, "OSRM returned no route candidates");
                    RoutingResponse::Failure
                }
            },
            Err(err) => {
                debug!(%url, error = %err, "OSRM request failed");
                RoutingResponse::Failure
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
