//! Test fixtures for collection-planner.
//!
//! Provides realistic Portland, OR locations for planning and grid-analysis
//! tests. Individual test files define their own pickup/record builders.

pub mod portland_locations;

pub use portland_locations::*;
