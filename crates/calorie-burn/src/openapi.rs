use utoipa::OpenApi;

use crate::{
    handlers,
    terrain::Terrain,
    types::{CalculateRequest, CalculateResponse, TerrainInfo},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backpacking Calorie Burn Calculator",
        description = "Hiking energy expenditure from the Pandolf load-carriage model"
    ),
    paths(
        handlers::calculate,
        handlers::list_terrains,
        handlers::health_check,
    ),
    components(schemas(CalculateRequest, CalculateResponse, TerrainInfo, Terrain)),
    tags(
        (name = "calculator", description = "Calorie estimates"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
