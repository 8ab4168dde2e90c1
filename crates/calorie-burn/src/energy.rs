//! Load-carriage energy expenditure.
//!
//! Implements the Pandolf, Givoni & Goldman (1977) walking model:
//!
//! ```text
//! M = 1.5·W + 2.0·(W + L)·(L / W)² + η·(W + L)·(1.5·V² + 0.35·V·G)
//! ```
//!
//! with body mass `W` and load `L` in kilograms, speed `V` in m/s, grade `G`
//! in percent and terrain factor `η`. `M` is in watts; one watt sustained for
//! an hour is 3600 J, and a kilocalorie is 4184 J.
//!
//! <https://journals.physiology.org/doi/abs/10.1152/jappl.1977.43.4.577>

use serde::Serialize;

use crate::{errors::EstimateError, terrain::terrain_factor};

const SECONDS_PER_HOUR: f64 = 3600.0;
const JOULES_PER_KCAL: f64 = 4184.0;
const MAX_REPORTABLE_KCAL: f64 = i64::MAX as f64;

/// Inputs to the energy model, already normalized to SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateInputs {
    pub weight_kg: f64,
    pub pack_weight_kg: f64,
    pub speed_mps: f64,
    /// Percent grade; negative for descents.
    pub incline_grade: f64,
}

impl EstimateInputs {
    fn validate(&self) -> Result<(), EstimateError> {
        let fields = [
            ("weight", self.weight_kg),
            ("pack weight", self.pack_weight_kg),
            ("speed", self.speed_mps),
            ("incline grade", self.incline_grade),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EstimateError::Domain(format!("{name} must be a finite number")));
        }
        if self.weight_kg <= 0.0 {
            return Err(EstimateError::Domain("weight must be positive".to_string()));
        }
        Ok(())
    }
}

/// How a calorie figure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Nearest whole kilocalorie, halves away from zero.
    #[default]
    Nearest,
    /// The unrounded model output.
    Exact,
}

/// A reported calorie figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalorieValue {
    Whole(i64),
    Exact(f64),
}

impl CalorieValue {
    fn new(value: f64, rounding: Rounding) -> Self {
        match rounding {
            Rounding::Nearest => CalorieValue::Whole(value.round() as i64),
            Rounding::Exact => CalorieValue::Exact(value),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            CalorieValue::Whole(v) => v as f64,
            CalorieValue::Exact(v) => v,
        }
    }
}

/// Result of one estimate. Always finite, non-negative and small enough to
/// round into an `i64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    calories_per_hour: f64,
    terrain_factor: f64,
}

impl Estimate {
    /// Unrounded kilocalories per hour.
    pub fn raw(&self) -> f64 {
        self.calories_per_hour
    }

    pub fn rounded(&self) -> i64 {
        self.calories_per_hour.round() as i64
    }

    pub fn terrain_factor(&self) -> f64 {
        self.terrain_factor
    }

    pub fn report(&self, rounding: Rounding) -> CalorieValue {
        CalorieValue::new(self.calories_per_hour, rounding)
    }

    /// Energy over `hours` of walking at this rate. Rounding applies to the
    /// total, not to the hourly rate.
    pub fn total_for(
        &self,
        hours: f64,
        rounding: Rounding,
    ) -> Result<CalorieValue, EstimateError> {
        let total = self.calories_per_hour * hours;
        if !total.is_finite() || total < 0.0 || total >= MAX_REPORTABLE_KCAL {
            return Err(EstimateError::Domain(
                "hours must be a non-negative number of reasonable size".to_string(),
            ));
        }
        Ok(CalorieValue::new(total, rounding))
    }
}

fn check_factor(terrain_factor: f64) -> Result<(), EstimateError> {
    if !terrain_factor.is_finite() {
        return Err(EstimateError::Domain(
            "terrain factor must be a finite number".to_string(),
        ));
    }
    Ok(())
}

/// Ceiling for any reported figure, so whole-kilocalorie values fit an `i64`.
fn check_reportable(kcal: f64) -> Result<(), EstimateError> {
    if !kcal.is_finite() || kcal >= MAX_REPORTABLE_KCAL {
        return Err(EstimateError::Domain(
            "inputs are outside the range of the model".to_string(),
        ));
    }
    Ok(())
}

/// Pandolf rate for inputs that have already been validated.
fn pandolf_watts(inputs: &EstimateInputs, terrain_factor: f64) -> Result<f64, EstimateError> {
    let w = inputs.weight_kg;
    let p = inputs.pack_weight_kg;
    let v = inputs.speed_mps;
    let g = inputs.incline_grade;

    let mut m = 1.5 * w + 2.0 * (w + p) * (p / w).powi(2);
    m += terrain_factor * (w + p) * (1.5 * v.powi(2) + 0.35 * v * g);

    if !m.is_finite() {
        return Err(EstimateError::Domain(
            "inputs are outside the range of the model".to_string(),
        ));
    }
    Ok(m.max(0.0))
}

fn to_estimate(inputs: &EstimateInputs, terrain_factor: f64) -> Result<Estimate, EstimateError> {
    let watts = pandolf_watts(inputs, terrain_factor)?;
    let calories_per_hour = watts * SECONDS_PER_HOUR / JOULES_PER_KCAL;
    check_reportable(calories_per_hour)?;
    Ok(Estimate {
        calories_per_hour,
        terrain_factor,
    })
}

/// Metabolic rate in watts for an already resolved terrain factor.
///
/// Steep descents can drive the model below zero; the rate is floored at 0.
pub fn metabolic_rate(inputs: &EstimateInputs, terrain_factor: f64) -> Result<f64, EstimateError> {
    inputs.validate()?;
    check_factor(terrain_factor)?;
    pandolf_watts(inputs, terrain_factor)
}

/// Calories per hour for an already resolved terrain factor.
pub fn estimate_with_factor(
    inputs: &EstimateInputs,
    terrain_factor: f64,
) -> Result<Estimate, EstimateError> {
    inputs.validate()?;
    check_factor(terrain_factor)?;
    to_estimate(inputs, terrain_factor)
}

/// Calories per hour walking over the terrain named by `terrain`.
///
/// Fails with [`EstimateError::Domain`] when weight is not positive, when any
/// input is NaN or infinite, or when the terrain is sand and speed is not
/// positive. Input errors are reported before terrain errors. Unknown terrain
/// names use a neutral factor of 1.0.
pub fn estimate(inputs: &EstimateInputs, terrain: &str) -> Result<Estimate, EstimateError> {
    inputs.validate()?;
    let factor = terrain_factor(terrain, inputs.speed_mps)?;
    check_factor(factor)?;
    let estimate = to_estimate(inputs, factor)?;
    tracing::debug!(
        terrain,
        terrain_factor = factor,
        calories_per_hour = estimate.raw(),
        "Computed estimate"
    );
    Ok(estimate)
}
