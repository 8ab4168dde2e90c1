//! HTTP request handlers for the calculator API.

pub mod calculate;
pub mod health;
pub mod terrains;

// Re-export handlers from submodules (including utoipa __path types for OpenAPI)
pub use calculate::{__path_calculate, calculate};
pub use health::{__path_health_check, health_check};
pub use terrains::{__path_list_terrains, list_terrains};
