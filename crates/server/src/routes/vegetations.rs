//! Routes for vegetation (plantings), with optional plot/plant-class
//! filters on the list.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::vegetation::{
    CreateVegetation, Vegetation, VegetationFilter, VegetationViewModel,
};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_vegetations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<VegetationFilter>,
) -> Result<ResponseJson<ApiResponse<Paged<VegetationViewModel>>>, ApiError> {
    let paged =
        listing::list_vegetations(&state.db.pool, state.settings.page_size, query, filter).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_vegetation(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateVegetation>,
) -> Result<ResponseJson<ApiResponse<Vegetation>>, ApiError> {
    let vegetation = Vegetation::create(&state.db.pool, &payload).await?;
    tracing::info!("vegetation {} created", vegetation.id);
    Ok(ResponseJson(ApiResponse::success(vegetation)))
}

pub async fn get_vegetation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vegetation>>, ApiError> {
    let vegetation = Vegetation::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid vegetation id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(vegetation)))
}

pub async fn update_vegetation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateVegetation>,
) -> Result<ResponseJson<ApiResponse<Vegetation>>, ApiError> {
    let vegetation = Vegetation::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid vegetation id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(vegetation)))
}

pub async fn delete_vegetation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Vegetation::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid vegetation id: {id}")));
    }
    tracing::info!("vegetation {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/vegetations",
        Router::new()
            .route("/", get(list_vegetations).post(create_vegetation))
            .route(
                "/{id}",
                get(get_vegetation)
                    .put(update_vegetation)
                    .delete(delete_vegetation),
            ),
    )
}
