//! Route assembly: expands an ordered stop list into drivable legs.
//!
//! One routing-service request per leg, fanned out concurrently on a small
//! dedicated thread pool and collected back in stop order. A failed leg
//! degrades to an empty zero-cost placeholder instead of aborting the plan;
//! callers check [`RoutePlan::is_degraded`] before presenting totals.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;
use crate::polyline::Polyline;
use crate::traits::{Pickup, RouteProvider};

/// Tuning knobs for route assembly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssembleOptions {
    /// Upper bound on in-flight routing requests per plan.
    pub max_concurrent_requests: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 4,
        }
    }
}

/// One hop of an assembled route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Drivable path geometry; empty when the leg is unrouted.
    pub geometry: Polyline,
    pub distance_meters: f64,
    pub duration_secs: f64,
    /// False when the routing service failed for this leg and the zero-cost
    /// placeholder is in effect.
    pub routed: bool,
}

/// The output of a full planning call: visit order, legs, and totals.
///
/// `legs.len() == stop_ids.len()`, and `legs[i]` ends at the location of
/// `stop_ids[i]`. Totals are summed over routed legs only, so a degraded
/// plan under-reports; see [`RoutePlan::is_degraded`].
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan<I> {
    pub stop_ids: Vec<I>,
    pub legs: Vec<RouteLeg>,
    pub total_distance_meters: f64,
    pub total_duration_secs: f64,
}

impl<I> RoutePlan<I> {
    /// Number of legs the routing service failed to serve.
    pub fn failed_leg_count(&self) -> usize {
        self.legs.iter().filter(|leg| !leg.routed).count()
    }

    /// True when any leg degraded and the totals under-report.
    pub fn is_degraded(&self) -> bool {
        self.legs.iter().any(|leg| !leg.routed)
    }
}

/// Expand an ordered stop sequence into a [`RoutePlan`].
///
/// Legs run start -> stops[0] -> stops[1] -> ... Requests are issued
/// concurrently (bounded by [`AssembleOptions::max_concurrent_requests`])
/// and collected back in order, so concurrency never reorders output.
pub fn assemble<P, R>(
    start: Coordinate,
    ordered: &[&P],
    provider: &R,
    options: &AssembleOptions,
) -> RoutePlan<P::Id>
where
    P: Pickup,
    R: RouteProvider + Sync,
{
    let mut stop_ids = Vec::with_capacity(ordered.len());
    let mut waypoints = Vec::with_capacity(ordered.len() + 1);
    waypoints.push(start);
    for stop in ordered {
        match stop.location() {
            Some(location) => {
                stop_ids.push(stop.id().clone());
                waypoints.push(location);
            }
            None => tracing::debug!("dropping stop without coordinates from assembly"),
        }
    }

    if stop_ids.is_empty() {
        return RoutePlan {
            stop_ids,
            legs: Vec::new(),
            total_distance_meters: 0.0,
            total_duration_secs: 0.0,
        };
    }

    let pairs: Vec<(Coordinate, Coordinate)> =
        waypoints.windows(2).map(|pair| (pair[0], pair[1])).collect();

    let limit = options.max_concurrent_requests.max(1);
    let legs: Vec<RouteLeg> = match rayon::ThreadPoolBuilder::new().num_threads(limit).build() {
        Ok(fanout) => fanout.install(|| {
            pairs
                .par_iter()
                .map(|&(origin, destination)| fetch_leg(provider, origin, destination))
                .collect()
        }),
        // Pool construction only fails when threads cannot be spawned;
        // the plan still has to come back, just without the fan-out.
        Err(_) => pairs
            .iter()
            .map(|&(origin, destination)| fetch_leg(provider, origin, destination))
            .collect(),
    };

    let total_distance_meters = legs
        .iter()
        .filter(|leg| leg.routed)
        .map(|leg| leg.distance_meters)
        .sum();
    let total_duration_secs = legs
        .iter()
        .filter(|leg| leg.routed)
        .map(|leg| leg.duration_secs)
        .sum();

    RoutePlan {
        stop_ids,
        legs,
        total_distance_meters,
        total_duration_secs,
    }
}

fn fetch_leg<R: RouteProvider>(
    provider: &R,
    origin: Coordinate,
    destination: Coordinate,
) -> RouteLeg {
    match provider.route_between(origin, destination) {
        Ok(path) => RouteLeg {
            origin,
            destination,
            geometry: path.geometry,
            distance_meters: path.distance_meters,
            duration_secs: path.duration_secs,
            routed: true,
        },
        Err(err) => {
            tracing::warn!(
                origin.lat = origin.lat,
                origin.lng = origin.lng,
                destination.lat = destination.lat,
                destination.lng = destination.lng,
                error = %err,
                "routing failed for leg, degrading to zero-cost placeholder"
            );
            RouteLeg {
                origin,
                destination,
                geometry: Polyline::empty(),
                distance_meters: 0.0,
                duration_secs: 0.0,
                routed: false,
            }
        }
    }
}
