//! Portland, OR locations for realistic test fixtures.
//!
//! Street-level coordinates around downtown, the eastside, and the suburbs.
//! The downtown set deliberately sits inside a single 0.01-degree grid cell
//! so grid-analysis tests can reason about one dense cell.

use collection_planner::geometry::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Depots / transfer stations (route start points)
// ============================================================================

pub const TRANSFER_STATIONS: &[Location] = &[
    Location::new("NW Transfer Station", 45.5231, -122.6834),
    Location::new("Central Eastside Depot", 45.5168, -122.6612),
];

// ============================================================================
// Downtown cafes and restaurants (dense pickup cluster, one grid cell)
// ============================================================================

pub const DOWNTOWN_CAFES: &[Location] = &[
    Location::new("Stumptown Coffee SW 3rd", 45.5155, -122.6742),
    Location::new("Case Study Coffee", 45.5189, -122.6787),
    Location::new("Heart Coffee West", 45.5172, -122.6779),
    Location::new("Deadstock Coffee", 45.5164, -122.6730),
    Location::new("Courier Coffee", 45.5194, -122.6759),
    Location::new("Lovejoy Bakers", 45.5178, -122.6712),
    Location::new("Kenny & Zuke's Deli", 45.5197, -122.6781),
    Location::new("Mother's Bistro", 45.5193, -122.6739),
    Location::new("Luc Lac Kitchen", 45.5158, -122.6752),
    Location::new("Bailey's Taproom Block", 45.5186, -122.6763),
    Location::new("Pine Street Market", 45.5196, -122.6724),
    Location::new("Huber's Cafe", 45.5190, -122.6733),
    Location::new("Lardo West", 45.5162, -122.6788),
    Location::new("Shigezo Izakaya", 45.5153, -122.6766),
    Location::new("Tasty n Alder", 45.5184, -122.6745),
    Location::new("Maurice Luncheonette", 45.5191, -122.6772),
];

// ============================================================================
// Eastside stops (moderate spread)
// ============================================================================

pub const EASTSIDE_STOPS: &[Location] = &[
    Location::new("Coava Coffee Grand Ave", 45.5124, -122.6605),
    Location::new("Afuri Izakaya", 45.5195, -122.6563),
    Location::new("Kachka", 45.5120, -122.6549),
    Location::new("Olympia Provisions SE", 45.5077, -122.6554),
    Location::new("Bunk Sandwiches", 45.5113, -122.6530),
    Location::new("Nong's Khao Man Gai", 45.5163, -122.6522),
    Location::new("Voodoo Doughnut Eastside", 45.5264, -122.6615),
    Location::new("Produce Row Cafe", 45.5169, -122.6641),
];

// ============================================================================
// Suburban stops (isolated, low volume)
// ============================================================================

pub const SUBURBAN_STOPS: &[Location] = &[
    Location::new("Beaverton Bakery", 45.4871, -122.8037),
    Location::new("Milwaukie Cafe", 45.4461, -122.6393),
    Location::new("Gresham Coffee House", 45.5012, -122.4307),
];
