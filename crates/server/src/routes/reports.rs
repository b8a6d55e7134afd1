//! Master-detail report rows as JSON; rendering to PDF/Excel happens in a
//! separate tool.

use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use services::services::reports::{
    self, HarvestPurchasesReport, RecipePlantsReport, WorkerMeasuresReport,
};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

pub async fn workers_report(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<WorkerMeasuresReport>>>, ApiError> {
    let rows = reports::worker_measures(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(rows)))
}

pub async fn harvests_report(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<HarvestPurchasesReport>>>, ApiError> {
    let rows = reports::harvest_purchases(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(rows)))
}

pub async fn recipes_report(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<RecipePlantsReport>>>, ApiError> {
    let rows = reports::recipe_plants(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(rows)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/reports",
        Router::new()
            .route("/workers", get(workers_report))
            .route("/harvests", get(harvests_report))
            .route("/recipes", get(recipes_report)),
    )
}
