//! Autocomplete lookups for form fields.

use axum::{
    Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use serde::Deserialize;
use services::services::autocomplete::{self, IdLabel};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermQuery {
    #[serde(default)]
    pub term: String,
}

pub async fn worker_types(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<IdLabel>>>, ApiError> {
    let labels = autocomplete::worker_types(
        &state.db.pool,
        &query.term,
        state.settings.autocomplete_count,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(labels)))
}

pub async fn measure_types(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<IdLabel>>>, ApiError> {
    let labels = autocomplete::measure_types(
        &state.db.pool,
        &query.term,
        state.settings.autocomplete_count,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(labels)))
}

pub async fn cuisines(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<IdLabel>>>, ApiError> {
    let labels =
        autocomplete::cuisines(&state.db.pool, &query.term, state.settings.autocomplete_count)
            .await?;
    Ok(ResponseJson(ApiResponse::success(labels)))
}

pub async fn plant_classes(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<IdLabel>>>, ApiError> {
    let labels = autocomplete::plant_classes(
        &state.db.pool,
        &query.term,
        state.settings.autocomplete_count,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(labels)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/autocomplete",
        Router::new()
            .route("/worker-types", get(worker_types))
            .route("/measure-types", get(measure_types))
            .route("/cuisines", get(cuisines))
            .route("/plant-classes", get(plant_classes)),
    )
}
