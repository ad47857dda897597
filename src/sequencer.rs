//! Greedy route sequencing for a collector's pending stops.
//!
//! Orders stops with a load-weighted nearest-neighbor heuristic: straight-
//! line distance from the current position, penalized by up to 2x as the
//! estimated load approaches the reference threshold. This is a heuristic,
//! not an optimal-TSP solver; O(n^2) in stop count is fine for the tens of
//! stops a single collector carries.

use serde::Deserialize;

use crate::geometry::{self, Coordinate};
use crate::traits::Pickup;

/// Tuning knobs for the sequencing heuristic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SequenceOptions {
    /// Load at which the distance penalty saturates at 2x.
    pub reference_load_kg: f64,
    /// Weight assumed per collection bag when only a bag count is known.
    pub kg_per_bag: f64,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            reference_load_kg: 100.0,
            kg_per_bag: 5.0,
        }
    }
}

/// Order pending stops into a visit sequence.
///
/// Returns a permutation of the input. Ties are broken by input order (first
/// occurrence wins), so identical input always yields identical output.
///
/// Stops are expected to carry coordinates; callers filter unlocated stops
/// beforehand. Any that slip through are skipped, not visited.
pub fn sequence<'a, P: Pickup>(
    start: Coordinate,
    stops: &[&'a P],
    options: &SequenceOptions,
) -> Vec<&'a P> {
    let mut pool: Vec<(&'a P, Coordinate, f64)> = Vec::with_capacity(stops.len());
    for stop in stops {
        match stop.location() {
            Some(location) => {
                let load_kg = stop.load().weight_kg(options.kg_per_bag);
                pool.push((*stop, location, load_kg));
            }
            None => tracing::debug!("skipping stop without coordinates in sequencing"),
        }
    }

    let mut ordered = Vec::with_capacity(pool.len());
    let mut current = start;

    while !pool.is_empty() {
        let mut best_index = 0;
        let mut best_score = f64::INFINITY;

        for (index, (_, location, load_kg)) in pool.iter().enumerate() {
            let penalty = 1.0 + (load_kg / options.reference_load_kg).clamp(0.0, 1.0);
            let score = geometry::distance_km(current, *location) * penalty;
            if score < best_score {
                best_score = score;
                best_index = index;
            }
        }

        let (stop, location, _) = pool.remove(best_index);
        ordered.push(stop);
        current = location;
    }

    ordered
}
