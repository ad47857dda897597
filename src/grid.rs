//! Opportunity grid analysis over historical pickups.
//!
//! Bins completed pickups into fixed-size degree-grid cells, computes
//! per-cell volume and density, and classifies each populated cell into a
//! potential tier for siting new collection or offset infrastructure.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Coordinate};
use crate::impact::{ImpactTable, ImpactTotals};
use crate::traits::CompletedPickup;

/// Coarse attractiveness classification of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PotentialTier {
    High,
    Medium,
    Low,
}

/// Joint requirements for a tier: both must hold to qualify.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TierThreshold {
    pub min_weight_kg: f64,
    /// Pickups per square kilometer over the analysis disc.
    pub min_density: f64,
}

/// Grid analysis configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell edge in decimal degrees; 0.01 is roughly 1 km of latitude.
    pub cell_size_degrees: f64,
    /// Radius of the fixed analysis disc used for the density denominator.
    /// Uniform across cells so densities are comparable; not derived from
    /// the cell size.
    pub analysis_radius_km: f64,
    pub high: TierThreshold,
    pub medium: TierThreshold,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_degrees: 0.01,
            analysis_radius_km: 2.0,
            high: TierThreshold {
                min_weight_kg: 500.0,
                min_density: 1.5,
            },
            medium: TierThreshold {
                min_weight_kg: 150.0,
                min_density: 0.5,
            },
        }
    }
}

impl GridConfig {
    /// Classify a cell's totals; HIGH is checked first, LOW is the
    /// catch-all.
    pub fn tier_for(&self, total_kg: f64, density: f64) -> PotentialTier {
        if total_kg >= self.high.min_weight_kg && density >= self.high.min_density {
            PotentialTier::High
        } else if total_kg >= self.medium.min_weight_kg && density >= self.medium.min_density {
            PotentialTier::Medium
        } else {
            PotentialTier::Low
        }
    }
}

/// A populated square cell of the analysis grid.
#[derive(Debug, Clone)]
pub struct GridCell<'a, C> {
    /// Integer grid index along latitude (floor of lat / cell size).
    pub x: i64,
    /// Integer grid index along longitude (floor of lng / cell size).
    pub y: i64,
    /// Midpoint of the cell.
    pub center: Coordinate,
    /// Historical pickups whose coordinates fall inside this cell.
    pub pickups: Vec<&'a C>,
    /// Total collected weight across all waste types, in kilograms.
    pub total_kg: f64,
    /// Pickups per square kilometer over the analysis disc.
    pub density_per_km2: f64,
    pub tier: PotentialTier,
}

impl<C> GridCell<'_, C> {
    pub fn pickup_count(&self) -> usize {
        self.pickups.len()
    }
}

/// Partition historical pickups into grid cells and classify each one.
///
/// Every located record lands in exactly one cell; empty cells are never
/// emitted. Output is sorted by tier rank (HIGH first), ties broken by
/// descending total weight. Records without coordinates are skipped.
pub fn classify<'a, C: CompletedPickup>(
    pickups: &'a [C],
    config: &GridConfig,
) -> Vec<GridCell<'a, C>> {
    let mut members: HashMap<(i64, i64), Vec<&'a C>> = HashMap::new();
    let mut skipped = 0usize;
    for pickup in pickups {
        let Some(location) = pickup.location() else {
            skipped += 1;
            continue;
        };
        let x = (location.lat / config.cell_size_degrees).floor() as i64;
        let y = (location.lng / config.cell_size_degrees).floor() as i64;
        members.entry((x, y)).or_default().push(pickup);
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped records without coordinates in grid analysis");
    }

    let disc_area_km2 = PI * config.analysis_radius_km.powi(2);
    let mut cells: Vec<GridCell<'a, C>> = members
        .into_iter()
        .map(|((x, y), pickups)| {
            let total_kg = pickups
                .iter()
                .map(|p| p.collected_kg_by_type().values().sum::<f64>())
                .sum();
            let density_per_km2 = pickups.len() as f64 / disc_area_km2;
            let center = Coordinate::new(
                (x as f64 + 0.5) * config.cell_size_degrees,
                (y as f64 + 0.5) * config.cell_size_degrees,
            );
            GridCell {
                x,
                y,
                center,
                pickups,
                total_kg,
                density_per_km2,
                tier: config.tier_for(total_kg, density_per_km2),
            }
        })
        .collect();

    cells.sort_by(|a, b| {
        a.tier
            .cmp(&b.tier)
            .then_with(|| b.total_kg.total_cmp(&a.total_kg))
    });

    tracing::info!(
        cells = cells.len(),
        high = cells.iter().filter(|c| c.tier == PotentialTier::High).count(),
        "classified opportunity grid"
    );

    cells
}

/// Aggregate the environmental impact of all pickups within `radius_km` of
/// `center`, independent of the grid partition.
pub fn impact_within_radius<C: CompletedPickup>(
    center: Coordinate,
    radius_km: f64,
    pickups: &[C],
    table: &ImpactTable,
) -> ImpactTotals {
    let mut totals = ImpactTotals::default();
    for pickup in pickups {
        let Some(location) = pickup.location() else {
            continue;
        };
        if geometry::distance_km(center, location) <= radius_km {
            totals += table.estimate(pickup.collected_kg_by_type());
        }
    }
    totals
}
