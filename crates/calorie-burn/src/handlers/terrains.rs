//! Terrain catalogue for clients building a terrain picker.

use axum::response::Json;

use crate::{terrain::Terrain, types::TerrainInfo};

/// List the terrains the estimator recognizes, in display order.
#[utoipa::path(
    get,
    path = "/terrains",
    tag = "calculator",
    responses(
        (status = 200, description = "Known terrains", body = Vec<TerrainInfo>)
    )
)]
pub async fn list_terrains() -> Json<Vec<TerrainInfo>> {
    Json(Terrain::ALL.into_iter().map(TerrainInfo::from).collect())
}
