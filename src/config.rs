//! Planner configuration: every recognized option as deployment data.
//!
//! Deployment-time invariants are checked once at configuration-load time
//! via [`PlannerConfig::validate`], not per request.

use std::fmt;

use serde::Deserialize;

use crate::assembler::AssembleOptions;
use crate::grid::{GridConfig, TierThreshold};
use crate::impact::ImpactTable;
use crate::sequencer::SequenceOptions;

/// All recognized planner options. Each section has sensible defaults and
/// can be overridden independently by the caller or deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub sequencing: SequenceOptions,
    pub assembly: AssembleOptions,
    pub grid: GridConfig,
    pub impact: ImpactTable,
}

impl PlannerConfig {
    /// Fail-fast validation of deployment-time invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("sequencing.reference_load_kg", self.sequencing.reference_load_kg)?;
        require_positive("sequencing.kg_per_bag", self.sequencing.kg_per_bag)?;

        if self.assembly.max_concurrent_requests == 0 {
            return Err(ConfigError::NonPositive("assembly.max_concurrent_requests"));
        }

        require_positive("grid.cell_size_degrees", self.grid.cell_size_degrees)?;
        require_positive("grid.analysis_radius_km", self.grid.analysis_radius_km)?;
        validate_threshold("grid.high", &self.grid.high)?;
        validate_threshold("grid.medium", &self.grid.medium)?;
        if self.grid.high.min_weight_kg < self.grid.medium.min_weight_kg
            || self.grid.high.min_density < self.grid.medium.min_density
        {
            return Err(ConfigError::ThresholdOrder(
                "grid.high thresholds must not be below grid.medium",
            ));
        }

        for (waste_type, factors) in &self.impact.by_type {
            let mut values = vec![factors.carbon_kg, factors.water_liters, factors.landfill_m3];
            if let Some(trees) = factors.trees {
                values.push(trees);
            }
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ConfigError::InvalidFactor(waste_type.clone()));
            }
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(field))
    }
}

fn validate_threshold(field: &'static str, threshold: &TierThreshold) -> Result<(), ConfigError> {
    let valid = threshold.min_weight_kg.is_finite()
        && threshold.min_weight_kg >= 0.0
        && threshold.min_density.is_finite()
        && threshold.min_density >= 0.0;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Negative(field))
    }
}

/// A deployment-time configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The named field must be a positive, finite number.
    NonPositive(&'static str),
    /// The named threshold must be non-negative and finite.
    Negative(&'static str),
    /// Tier thresholds are not monotonic.
    ThresholdOrder(&'static str),
    /// The named waste type has a non-finite or negative impact factor.
    InvalidFactor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive(field) => write!(f, "{} must be positive", field),
            Self::Negative(field) => write!(f, "{} must be non-negative and finite", field),
            Self::ThresholdOrder(msg) => write!(f, "{}", msg),
            Self::InvalidFactor(waste_type) => {
                write!(f, "impact factors for '{}' must be non-negative and finite", waste_type)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
