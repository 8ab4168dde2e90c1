//! Response types for API endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{energy::CalorieValue, terrain::Terrain};

/// Calorie estimate response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateResponse {
    /// Whole kilocalories per hour, or the unrounded value when `round` is false.
    #[schema(value_type = f64)]
    pub calories_per_hour: CalorieValue,
    /// `calories_per_hour` times `hours`, when `hours` was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub total_calories: Option<CalorieValue>,
    /// Terrain multiplier the estimate used.
    pub terrain_factor: f64,
}

/// A selectable terrain.
#[derive(Debug, Serialize, ToSchema)]
pub struct TerrainInfo {
    pub name: Terrain,
    /// True when the multiplier depends on walking speed.
    pub speed_dependent: bool,
}

impl From<Terrain> for TerrainInfo {
    fn from(terrain: Terrain) -> Self {
        Self {
            name: terrain,
            speed_dependent: terrain.is_speed_dependent(),
        }
    }
}
