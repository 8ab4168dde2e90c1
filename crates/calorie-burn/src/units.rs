//! Conversions from imperial input units to the SI units the estimator expects.

/// Kilograms per pound.
pub const KG_PER_LB: f64 = 0.453592;

/// Meters per second per mile per hour.
pub const MPS_PER_MPH: f64 = 0.44704;

/// Returns `value` in kilograms. Values not already in kilograms are treated as pounds.
pub fn convert_mass(value: f64, already_kg: bool) -> f64 {
    if already_kg {
        value
    } else {
        value * KG_PER_LB
    }
}

/// Returns `value` in meters per second. Values not already in m/s are treated as mph.
pub fn convert_speed(value: f64, already_mps: bool) -> f64 {
    if already_mps {
        value
    } else {
        value * MPS_PER_MPH
    }
}
