//! Planning entry point: one call from pending stops to a drivable plan.
//!
//! Stateless between calls; callers push the collector's current position
//! and pending stop set per request, and concurrent requests for different
//! collectors never interfere.

use crate::assembler::{self, RoutePlan};
use crate::config::PlannerConfig;
use crate::geometry::Coordinate;
use crate::sequencer;
use crate::traits::{Pickup, RouteProvider};

/// Why a stop was left out of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludedReason {
    /// The stop carries no usable coordinates.
    MissingLocation,
}

/// A stop excluded from planning, with the reason.
#[derive(Debug, Clone)]
pub struct ExcludedStop<I> {
    pub stop_id: I,
    pub reason: ExcludedReason,
}

/// A full planning result: the assembled plan plus any excluded stops.
#[derive(Debug, Clone)]
pub struct PlanOutcome<I> {
    pub plan: RoutePlan<I>,
    pub excluded: Vec<ExcludedStop<I>>,
}

/// Plan a route over the collector's pending stops.
///
/// Stops without coordinates are excluded up front and reported, never
/// silently dropped. The remainder is sequenced with the greedy heuristic
/// and expanded into legs via the routing provider; a provider failure
/// degrades the affected leg rather than the whole plan.
pub fn plan<P, R>(
    current: Coordinate,
    pending: &[P],
    provider: &R,
    config: &PlannerConfig,
) -> PlanOutcome<P::Id>
where
    P: Pickup,
    R: RouteProvider + Sync,
{
    let mut located: Vec<&P> = Vec::with_capacity(pending.len());
    let mut excluded = Vec::new();
    for stop in pending {
        if stop.location().is_some() {
            located.push(stop);
        } else {
            excluded.push(ExcludedStop {
                stop_id: stop.id().clone(),
                reason: ExcludedReason::MissingLocation,
            });
        }
    }

    if !excluded.is_empty() {
        tracing::warn!(
            count = excluded.len(),
            "excluding stops without coordinates from plan"
        );
    }

    let ordered = sequencer::sequence(current, &located, &config.sequencing);
    let plan = assembler::assemble(current, &ordered, provider, &config.assembly);

    tracing::info!(
        stops = plan.stop_ids.len(),
        failed_legs = plan.failed_leg_count(),
        total_distance_meters = plan.total_distance_meters,
        total_duration_secs = plan.total_duration_secs,
        "assembled route plan"
    );

    PlanOutcome { plan, excluded }
}
