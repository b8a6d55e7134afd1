//! Routes for plant classes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::plant_class::{CreatePlantClass, PlantClass, PlantClassViewModel};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_plant_classes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<PlantClassViewModel>>>, ApiError> {
    let paged =
        listing::list_plant_classes(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_plant_class(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreatePlantClass>,
) -> Result<ResponseJson<ApiResponse<PlantClass>>, ApiError> {
    let class = PlantClass::create(&state.db.pool, &payload).await?;
    tracing::info!("plant class {} created", class.id);
    Ok(ResponseJson(ApiResponse::success(class)))
}

pub async fn get_plant_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<PlantClass>>, ApiError> {
    let class = PlantClass::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid plant class id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(class)))
}

pub async fn update_plant_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreatePlantClass>,
) -> Result<ResponseJson<ApiResponse<PlantClass>>, ApiError> {
    let class = PlantClass::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid plant class id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(class)))
}

pub async fn delete_plant_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = PlantClass::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid plant class id: {id}")));
    }
    tracing::info!("plant class {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/plant-classes",
        Router::new()
            .route("/", get(list_plant_classes).post(create_plant_class))
            .route(
                "/{id}",
                get(get_plant_class)
                    .put(update_plant_class)
                    .delete(delete_plant_class),
            ),
    )
}
