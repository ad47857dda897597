//! Realistic planning tests over Portland locations.
//!
//! Drives the full plan and grid pipeline with real-world coordinates and a
//! road-factor haversine router, so everything here runs without Docker.

mod fixtures;

use std::collections::HashMap;

use collection_planner::config::PlannerConfig;
use collection_planner::geometry::{self, Coordinate};
use collection_planner::grid::{classify, impact_within_radius, GridConfig, PotentialTier, TierThreshold};
use collection_planner::planner::plan;
use collection_planner::polyline::Polyline;
use collection_planner::traits::{
    CompletedPickup, LoadEstimate, Pickup, RouteError, RouteProvider, RoutedPath,
};

use fixtures::portland_locations::{Location, DOWNTOWN_CAFES, SUBURBAN_STOPS, TRANSFER_STATIONS};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
struct PickupId(String);

struct RealPickup {
    id: PickupId,
    location: Coordinate,
    load: LoadEstimate,
}

impl RealPickup {
    fn new(location: &Location, bags: u32) -> Self {
        Self {
            id: PickupId(location.name.to_string()),
            location: location.coordinate(),
            load: LoadEstimate::Bags(bags),
        }
    }
}

impl Pickup for RealPickup {
    type Id = PickupId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> Option<Coordinate> {
        Some(self.location)
    }

    fn load(&self) -> LoadEstimate {
        self.load
    }
}

/// Haversine router with a road factor: straight-line distance times 1.3 at
/// 30 km/h, a fair stand-in for city driving.
struct RoadFactorRouter;

impl RouteProvider for RoadFactorRouter {
    fn route_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RoutedPath, RouteError> {
        let distance_meters = geometry::distance_meters(origin, destination) * 1.3;
        let duration_secs = distance_meters / 1000.0 / 30.0 * 3600.0;
        Ok(RoutedPath {
            geometry: Polyline::new(vec![origin, destination]),
            distance_meters,
            duration_secs,
        })
    }
}

#[derive(Debug, Clone)]
struct RealRecord {
    location: Coordinate,
    collected: HashMap<String, f64>,
}

impl RealRecord {
    fn new(location: &Location, pairs: &[(&str, f64)]) -> Self {
        Self {
            location: location.coordinate(),
            collected: pairs
                .iter()
                .map(|(name, kg)| (name.to_string(), *kg))
                .collect(),
        }
    }
}

impl CompletedPickup for RealRecord {
    fn location(&self) -> Option<Coordinate> {
        Some(self.location)
    }

    fn collected_kg_by_type(&self) -> &HashMap<String, f64> {
        &self.collected
    }
}

// ============================================================================
// Route planning
// ============================================================================

#[test]
fn morning_run_covers_all_downtown_stops() {
    let depot = TRANSFER_STATIONS[0].coordinate();
    let pickups: Vec<RealPickup> = DOWNTOWN_CAFES
        .iter()
        .take(10)
        .enumerate()
        .map(|(i, cafe)| RealPickup::new(cafe, 2 + (i as u32 % 4)))
        .collect();

    let outcome = plan(depot, &pickups, &RoadFactorRouter, &PlannerConfig::default());

    assert!(outcome.excluded.is_empty());
    assert_eq!(outcome.plan.stop_ids.len(), 10);
    assert_eq!(outcome.plan.legs.len(), 10);
    assert!(!outcome.plan.is_degraded());

    let mut got: Vec<String> = outcome.plan.stop_ids.iter().map(|id| id.0.clone()).collect();
    got.sort_unstable();
    let mut want: Vec<String> = pickups.iter().map(|p| p.id.0.clone()).collect();
    want.sort_unstable();
    assert_eq!(got, want, "every cafe visited exactly once");

    // Ten downtown stops from a nearby depot: a couple of km of driving,
    // not tens.
    assert!(outcome.plan.total_distance_meters > 1_000.0);
    assert!(outcome.plan.total_distance_meters < 20_000.0);
    assert!(outcome.plan.total_duration_secs > 0.0);
}

#[test]
fn legs_end_at_their_stops_on_real_coordinates() {
    let depot = TRANSFER_STATIONS[1].coordinate();
    let pickups: Vec<RealPickup> = DOWNTOWN_CAFES
        .iter()
        .skip(4)
        .take(6)
        .map(|cafe| RealPickup::new(cafe, 3))
        .collect();
    let locations: HashMap<PickupId, Coordinate> = pickups
        .iter()
        .map(|p| (p.id.clone(), p.location))
        .collect();

    let outcome = plan(depot, &pickups, &RoadFactorRouter, &PlannerConfig::default());

    let mut previous = depot;
    for (leg, stop_id) in outcome.plan.legs.iter().zip(outcome.plan.stop_ids.iter()) {
        assert_eq!(leg.origin, previous);
        assert_eq!(leg.destination, locations[stop_id]);
        previous = leg.destination;
    }
}

// ============================================================================
// Grid analysis
// ============================================================================

fn analysis_config() -> GridConfig {
    GridConfig {
        cell_size_degrees: 0.01,
        analysis_radius_km: 2.0,
        high: TierThreshold {
            min_weight_kg: 300.0,
            min_density: 1.0,
        },
        medium: TierThreshold {
            min_weight_kg: 100.0,
            min_density: 0.3,
        },
    }
}

/// A season of history: every downtown cafe picked up once, suburbs barely.
fn history() -> Vec<RealRecord> {
    let mut records: Vec<RealRecord> = DOWNTOWN_CAFES
        .iter()
        .map(|cafe| RealRecord::new(cafe, &[("paper", 15.0), ("organic", 10.0)]))
        .collect();
    records.extend(
        SUBURBAN_STOPS
            .iter()
            .map(|stop| RealRecord::new(stop, &[("paper", 10.0)])),
    );
    records
}

#[test]
fn downtown_cell_outranks_the_suburbs() {
    let records = history();
    let cells = classify(&records, &analysis_config());

    // 16 downtown records of 25 kg land in one cell: 400 kg, density ~1.3.
    assert_eq!(cells[0].tier, PotentialTier::High);
    assert_eq!(cells[0].pickup_count(), DOWNTOWN_CAFES.len());

    // The isolated suburban stops never classify above LOW.
    for cell in &cells[1..] {
        assert_eq!(cell.tier, PotentialTier::Low);
        assert_eq!(cell.pickup_count(), 1);
    }

    let total: usize = cells.iter().map(|cell| cell.pickup_count()).sum();
    assert_eq!(total, records.len());
}

#[test]
fn area_impact_around_the_downtown_core() {
    let records = history();
    let table = collection_planner::impact::ImpactTable::default();
    let downtown_center = Coordinate::new(45.5175, -122.6750);

    let nearby = impact_within_radius(downtown_center, 2.0, &records, &table);
    let everywhere = impact_within_radius(downtown_center, 200.0, &records, &table);

    // All 16 downtown records sit within 2 km of the core; the suburbs are
    // 9+ km out and only show up in the wide query.
    assert!(nearby.carbon_kg > 0.0);
    assert!(everywhere.carbon_kg > nearby.carbon_kg);

    // 16 x 15 kg of paper at 1.5 kg CO2e/kg plus 16 x 10 kg of organics at
    // 0.25, against the default table.
    let expected_downtown_carbon = 16.0 * (15.0 * 1.5 + 10.0 * 0.25);
    assert!((nearby.carbon_kg - expected_downtown_carbon).abs() < 1e-6);
}
