//! Terrain kinds and the metabolic multiplier each one applies.
//!
//! Factors are relative to a paved road. Vegetation and sand depend on
//! walking speed; every other surface is a constant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::errors::EstimateError;

/// Multiplier used for descriptors outside the known set.
pub const DEFAULT_TERRAIN_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Terrain {
    #[serde(rename = "Slippery Terrain")]
    SlipperyTerrain,
    #[serde(rename = "Vegetation")]
    Vegetation,
    #[serde(rename = "Swamp")]
    Swamp,
    #[serde(rename = "Paved Road")]
    PavedRoad,
    #[serde(rename = "Gravel Road")]
    GravelRoad,
    #[serde(rename = "Dirt Road")]
    DirtRoad,
    #[serde(rename = "Sand")]
    Sand,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown terrain '{0}'")]
pub struct UnknownTerrain(pub String);

impl Terrain {
    /// All terrains, in the order the calculator form lists them.
    pub const ALL: [Terrain; 7] = [
        Terrain::SlipperyTerrain,
        Terrain::Vegetation,
        Terrain::Swamp,
        Terrain::PavedRoad,
        Terrain::GravelRoad,
        Terrain::DirtRoad,
        Terrain::Sand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::SlipperyTerrain => "Slippery Terrain",
            Terrain::Vegetation => "Vegetation",
            Terrain::Swamp => "Swamp",
            Terrain::PavedRoad => "Paved Road",
            Terrain::GravelRoad => "Gravel Road",
            Terrain::DirtRoad => "Dirt Road",
            Terrain::Sand => "Sand",
        }
    }

    /// Whether the factor varies with walking speed.
    pub fn is_speed_dependent(&self) -> bool {
        matches!(self, Terrain::Vegetation | Terrain::Sand)
    }

    /// Terrain multiplier at `speed` (m/s).
    ///
    /// Sand divides by the square of the speed, so it requires a positive,
    /// finite speed. Vegetation is a cubic fit that is defined everywhere but
    /// only meaningful for ordinary walking speeds.
    pub fn factor(&self, speed: f64) -> Result<f64, EstimateError> {
        let factor = match self {
            Terrain::SlipperyTerrain => 1.7,
            Terrain::Vegetation => {
                0.0718 * speed.powi(3) + 1.3 * speed.powi(2) - 5.3701 * speed + 6.0705
            }
            Terrain::Swamp => 3.5,
            Terrain::PavedRoad | Terrain::GravelRoad => 1.0,
            Terrain::DirtRoad => 1.2,
            Terrain::Sand => {
                if !speed.is_finite() || speed <= 0.0 {
                    return Err(EstimateError::Domain(
                        "speed must be positive on sand".to_string(),
                    ));
                }
                1.5 + 1.3 / speed.powi(2)
            }
        };
        Ok(factor)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = UnknownTerrain;

    /// Exact, case-sensitive match against the descriptor strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTerrain(s.to_string()))
    }
}

/// Resolves a terrain descriptor to its multiplier at `speed`.
///
/// Unrecognized descriptors, the empty string included, get
/// [`DEFAULT_TERRAIN_FACTOR`] instead of an error.
pub fn terrain_factor(descriptor: &str, speed: f64) -> Result<f64, EstimateError> {
    match descriptor.parse::<Terrain>() {
        Ok(terrain) => terrain.factor(speed),
        Err(unknown) => {
            tracing::debug!("{unknown}, using neutral terrain factor");
            Ok(DEFAULT_TERRAIN_FACTOR)
        }
    }
}
