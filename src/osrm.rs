//! OSRM HTTP adapter for drivable paths between stops.

use serde::Deserialize;

use crate::geometry::Coordinate;
use crate::polyline::Polyline;
use crate::traits::{RouteError, RouteProvider, RoutedPath};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    /// Per-leg request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
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
}

impl RouteProvider for OsrmClient {
    fn route_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RoutedPath, RouteError> {
        // OSRM takes lng,lat pairs on the wire.
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&alternatives=false",
            self.config.base_url,
            self.config.profile,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        );

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| RouteError::Transport(err.to_string()))?
            .json::<OsrmRouteResponse>()
            .map_err(|err| RouteError::Malformed(err.to_string()))?;

        if body.code != "Ok" {
            return Err(RouteError::NoRoute);
        }
        let route = body.routes.into_iter().next().ok_or(RouteError::NoRoute)?;

        let points = route
            .geometry
            .map(|geometry| {
                geometry
                    .coordinates
                    .into_iter()
                    .map(|[lng, lat]| Coordinate::new(lat, lng))
                    .collect()
            })
            .unwrap_or_default();

        Ok(RoutedPath {
            geometry: Polyline::new(points),
            distance_meters: route.distance,
            duration_secs: route.duration,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
