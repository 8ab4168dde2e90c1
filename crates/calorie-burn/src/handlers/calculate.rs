//! Calorie estimate handler.

use axum::{Extension, extract::rejection::JsonRejection, response::Json};

use crate::{
    energy::{self, Estimate},
    errors::AppError,
    request_id::RequestId,
    types::{CalculateRequest, CalculateResponse, TerrainChoice},
};

/// Estimate calories burned per hour of hiking.
#[utoipa::path(
    post,
    path = "/calculate",
    tag = "calculator",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Calories burned per hour", body = CalculateResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 422, description = "Inputs outside the domain of the model")
    )
)]
pub async fn calculate(
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    req.validate()?;

    let inputs = req.inputs();
    let estimate: Estimate = match req.terrain_choice()? {
        TerrainChoice::Named(name) => energy::estimate(&inputs, &name)?,
        TerrainChoice::Kind(terrain) => {
            let factor = terrain.factor(inputs.speed_mps)?;
            energy::estimate_with_factor(&inputs, factor)?
        }
        TerrainChoice::Factor(factor) => energy::estimate_with_factor(&inputs, factor)?,
    };

    let rounding = req.rounding();
    let response = CalculateResponse {
        calories_per_hour: estimate.report(rounding),
        total_calories: req
            .hours
            .map(|hours| estimate.total_for(hours, rounding))
            .transpose()?,
        terrain_factor: estimate.terrain_factor(),
    };

    let request_id = request_id.map(|Extension(id)| id.to_string());
    tracing::debug!(
        request_id = request_id.as_deref().unwrap_or("-"),
        weight_kg = inputs.weight_kg,
        pack_weight_kg = inputs.pack_weight_kg,
        speed_mps = inputs.speed_mps,
        incline_grade = inputs.incline_grade,
        calories_per_hour = estimate.raw(),
        "Calculated calorie burn"
    );

    Ok(Json(response))
}
