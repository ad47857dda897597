//! Environmental impact estimation from collected-waste weights.
//!
//! A fixed per-waste-type conversion table turns kilograms collected into
//! emissions avoided, water saved, landfill volume avoided, and a trees
//! equivalent. Purely additive; unknown waste types contribute zero.

use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Conversion factors per kilogram collected for one waste type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactFactors {
    /// Kilograms of CO2-equivalent emissions avoided per kg.
    pub carbon_kg: f64,
    /// Liters of water saved per kg.
    pub water_liters: f64,
    /// Cubic meters of landfill avoided per kg.
    pub landfill_m3: f64,
    /// Trees-equivalent per kg, for types where that framing applies.
    pub trees: Option<f64>,
}

/// Per-waste-type conversion table, keyed by type name.
///
/// Deployment data: replace or extend the default table via configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImpactTable {
    pub by_type: HashMap<String, ImpactFactors>,
}

impl Default for ImpactTable {
    fn default() -> Self {
        let mut by_type = HashMap::new();
        by_type.insert(
            "paper".to_string(),
            ImpactFactors {
                carbon_kg: 1.5,
                water_liters: 1500.0,
                landfill_m3: 0.15,
                trees: Some(0.2),
            },
        );
        by_type.insert(
            "cardboard".to_string(),
            ImpactFactors {
                carbon_kg: 1.1,
                water_liters: 1200.0,
                landfill_m3: 0.12,
                trees: Some(0.15),
            },
        );
        by_type.insert(
            "plastic".to_string(),
            ImpactFactors {
                carbon_kg: 2.5,
                water_liters: 90.0,
                landfill_m3: 0.3,
                trees: None,
            },
        );
        by_type.insert(
            "glass".to_string(),
            ImpactFactors {
                carbon_kg: 0.3,
                water_liters: 2.0,
                landfill_m3: 0.08,
                trees: None,
            },
        );
        by_type.insert(
            "metal".to_string(),
            ImpactFactors {
                carbon_kg: 4.0,
                water_liters: 40.0,
                landfill_m3: 0.05,
                trees: None,
            },
        );
        by_type.insert(
            "organic".to_string(),
            ImpactFactors {
                carbon_kg: 0.25,
                water_liters: 10.0,
                landfill_m3: 0.2,
                trees: None,
            },
        );
        Self { by_type }
    }
}

impl ImpactTable {
    /// Estimate impact for a weights-by-type map.
    ///
    /// Types with no conversion row are skipped and contribute zero; that
    /// is intentional, not an error.
    pub fn estimate(&self, weights_by_type: &HashMap<String, f64>) -> ImpactTotals {
        let mut totals = ImpactTotals::default();
        for (waste_type, weight_kg) in weights_by_type {
            let Some(factors) = self.by_type.get(waste_type) else {
                tracing::debug!(
                    waste_type = %waste_type,
                    "no impact factors for waste type, contributing zero"
                );
                continue;
            };
            totals.carbon_kg += factors.carbon_kg * weight_kg;
            totals.water_liters += factors.water_liters * weight_kg;
            totals.landfill_m3 += factors.landfill_m3 * weight_kg;
            if let Some(trees) = factors.trees {
                totals.trees += trees * weight_kg;
            }
        }
        totals
    }
}

/// Aggregated environmental impact figures.
///
/// Additive across waste types and across pickups.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactTotals {
    pub carbon_kg: f64,
    pub water_liters: f64,
    pub landfill_m3: f64,
    pub trees: f64,
}

impl Add for ImpactTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            carbon_kg: self.carbon_kg + rhs.carbon_kg,
            water_liters: self.water_liters + rhs.water_liters,
            landfill_m3: self.landfill_m3 + rhs.landfill_m3,
            trees: self.trees + rhs.trees,
        }
    }
}

impl AddAssign for ImpactTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
