//! Routes for plots of land.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::plot::{CreatePlot, Plot};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_plots(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<Plot>>>, ApiError> {
    let paged = listing::list_plots(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_plot(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreatePlot>,
) -> Result<ResponseJson<ApiResponse<Plot>>, ApiError> {
    let plot = Plot::create(&state.db.pool, &payload).await?;
    tracing::info!("plot {} created", plot.id);
    Ok(ResponseJson(ApiResponse::success(plot)))
}

pub async fn get_plot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Plot>>, ApiError> {
    let plot = Plot::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid plot id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(plot)))
}

pub async fn update_plot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreatePlot>,
) -> Result<ResponseJson<ApiResponse<Plot>>, ApiError> {
    let plot = Plot::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid plot id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(plot)))
}

pub async fn delete_plot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Plot::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid plot id: {id}")));
    }
    tracing::info!("plot {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/plots",
        Router::new()
            .route("/", get(list_plots).post(create_plot))
            .route("/{id}", get(get_plot).put(update_plot).delete(delete_plot)),
    )
}
