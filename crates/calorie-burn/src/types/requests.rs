//! Request body types for API endpoints.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    energy::{EstimateInputs, Rounding},
    errors::AppError,
    terrain::Terrain,
    units::{convert_mass, convert_speed},
};

/// Legacy clients send this in `terrain_factor` to ask for the vegetation curve.
pub const LEGACY_VEGETATION_FACTOR: f64 = -1.0;
/// Legacy clients send this in `terrain_factor` to ask for the sand curve.
pub const LEGACY_SAND_FACTOR: f64 = -2.0;

fn default_true() -> bool {
    true
}

/// Calorie estimate request.
///
/// Weights are kilograms and speed is meters per second unless the matching
/// unit flag is `false`, in which case they are pounds and miles per hour.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateRequest {
    pub weight: f64,
    pub pack_weight: f64,
    pub speed: f64,
    /// Percent grade; negative for descents.
    pub incline_grade: f64,
    /// One of the terrain names listed by `GET /terrains`. Other values use a factor of 1.0.
    pub terrain_type: Option<String>,
    /// Raw terrain multiplier, used only when `terrain_type` is absent.
    pub terrain_factor: Option<f64>,
    #[serde(rename = "isWeightKg", default = "default_true")]
    pub is_weight_kg: bool,
    #[serde(rename = "isPackWeightKg", default = "default_true")]
    pub is_pack_weight_kg: bool,
    #[serde(rename = "isSpeedMps", default = "default_true")]
    pub is_speed_mps: bool,
    /// Hike duration; adds `total_calories` to the response.
    pub hours: Option<f64>,
    /// Report whole kilocalories (default) or the unrounded value.
    #[serde(default = "default_true")]
    pub round: bool,
}

/// How the request names its terrain.
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainChoice {
    /// A descriptor string, resolved leniently.
    Named(String),
    /// A known terrain selected through a legacy sentinel factor.
    Kind(Terrain),
    /// An explicit multiplier.
    Factor(f64),
}

impl CalculateRequest {
    /// Inputs in SI units.
    pub fn inputs(&self) -> EstimateInputs {
        EstimateInputs {
            weight_kg: convert_mass(self.weight, self.is_weight_kg),
            pack_weight_kg: convert_mass(self.pack_weight, self.is_pack_weight_kg),
            speed_mps: convert_speed(self.speed, self.is_speed_mps),
            incline_grade: self.incline_grade,
        }
    }

    pub fn rounding(&self) -> Rounding {
        if self.round {
            Rounding::Nearest
        } else {
            Rounding::Exact
        }
    }

    pub fn terrain_choice(&self) -> Result<TerrainChoice, AppError> {
        if let Some(name) = &self.terrain_type {
            return Ok(TerrainChoice::Named(name.clone()));
        }
        match self.terrain_factor {
            None => Err(AppError::InvalidInput(
                "missing field `terrain_type`".to_string(),
            )),
            Some(f) if f == LEGACY_VEGETATION_FACTOR => {
                Ok(TerrainChoice::Kind(Terrain::Vegetation))
            }
            Some(f) if f == LEGACY_SAND_FACTOR => Ok(TerrainChoice::Kind(Terrain::Sand)),
            Some(f) if f.is_finite() && f >= 0.0 => Ok(TerrainChoice::Factor(f)),
            Some(f) => Err(AppError::InvalidInput(format!(
                "terrain_factor must be a non-negative number, got {f}"
            ))),
        }
    }

    /// Checks that belong to the request rather than to the energy model.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.pack_weight < 0.0 {
            return Err(AppError::InvalidInput(
                "pack_weight must not be negative".to_string(),
            ));
        }
        if let Some(hours) = self.hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(AppError::InvalidInput(
                    "hours must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CalculateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unit_flags_default_to_si() {
        let req = parse(json!({
            "weight": 70,
            "pack_weight": 15,
            "speed": 1.4,
            "incline_grade": 0,
            "terrain_type": "Paved Road",
        }));
        assert!(req.is_weight_kg && req.is_pack_weight_kg && req.is_speed_mps && req.round);
        assert_eq!(
            req.inputs(),
            EstimateInputs {
                weight_kg: 70.0,
                pack_weight_kg: 15.0,
                speed_mps: 1.4,
                incline_grade: 0.0,
            }
        );
        assert_eq!(req.rounding(), Rounding::Nearest);
    }

    #[test]
    fn test_imperial_inputs_are_normalized() {
        let req = parse(json!({
            "weight": 160,
            "isWeightKg": false,
            "pack_weight": 12,
            "isPackWeightKg": true,
            "speed": 3,
            "isSpeedMps": false,
            "incline_grade": 4,
            "terrain_type": "Sand",
            "round": false,
        }));
        let inputs = req.inputs();
        assert!((inputs.weight_kg - 72.57472).abs() < 1e-9);
        assert_eq!(inputs.pack_weight_kg, 12.0);
        assert!((inputs.speed_mps - 1.34112).abs() < 1e-9);
        assert_eq!(req.rounding(), Rounding::Exact);
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let result: Result<CalculateRequest, _> = serde_json::from_value(json!({
            "pack_weight": 15,
            "speed": 1.4,
            "incline_grade": 0,
            "terrain_type": "Swamp",
        }));
        assert!(result.unwrap_err().to_string().contains("weight"));
    }

    #[test]
    fn test_terrain_choice() {
        let base = json!({"weight": 70, "pack_weight": 15, "speed": 1.4, "incline_grade": 0});
        let with = |extra: serde_json::Value| {
            let mut value = base.clone();
            value
                .as_object_mut()
                .unwrap()
                .extend(extra.as_object().unwrap().clone());
            parse(value)
        };

        assert_eq!(
            with(json!({"terrain_type": "Swamp", "terrain_factor": 2.0}))
                .terrain_choice()
                .unwrap(),
            TerrainChoice::Named("Swamp".to_string())
        );
        assert_eq!(
            with(json!({"terrain_factor": -1})).terrain_choice().unwrap(),
            TerrainChoice::Kind(Terrain::Vegetation)
        );
        assert_eq!(
            with(json!({"terrain_factor": -2})).terrain_choice().unwrap(),
            TerrainChoice::Kind(Terrain::Sand)
        );
        assert_eq!(
            with(json!({"terrain_factor": 1.2})).terrain_choice().unwrap(),
            TerrainChoice::Factor(1.2)
        );
        assert!(with(json!({"terrain_factor": -3})).terrain_choice().is_err());
        assert!(with(json!({})).terrain_choice().is_err());
    }

    #[test]
    fn test_validate() {
        let ok = parse(json!({
            "weight": 70, "pack_weight": 0, "speed": 1.4, "incline_grade": 0,
            "terrain_type": "Swamp", "hours": 0,
        }));
        assert!(ok.validate().is_ok());

        let negative_pack = parse(json!({
            "weight": 70, "pack_weight": -1, "speed": 1.4, "incline_grade": 0,
            "terrain_type": "Swamp",
        }));
        assert!(negative_pack.validate().is_err());

        let negative_hours = parse(json!({
            "weight": 70, "pack_weight": 5, "speed": 1.4, "incline_grade": 0,
            "terrain_type": "Swamp", "hours": -2,
        }));
        assert!(negative_hours.validate().is_err());
    }
}
