//! Routes for harvests; the detail view embeds the harvest's purchases.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{
    harvest::{CreateHarvest, Harvest, HarvestViewModel},
    purchase::Purchase,
};
use serde::{Deserialize, Serialize};
use services::services::listing;
use ts_rs::TS;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Detail response: the harvest plus the purchases made from it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct HarvestDetails {
    pub harvest: Harvest,
    pub purchases: Vec<Purchase>,
}

pub async fn list_harvests(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<HarvestViewModel>>>, ApiError> {
    let paged = listing::list_harvests(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_harvest(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateHarvest>,
) -> Result<ResponseJson<ApiResponse<Harvest>>, ApiError> {
    let harvest = Harvest::create(&state.db.pool, &payload).await?;
    tracing::info!("harvest {} created", harvest.id);
    Ok(ResponseJson(ApiResponse::success(harvest)))
}

pub async fn get_harvest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<HarvestDetails>>, ApiError> {
    let harvest = Harvest::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid harvest id: {id}")))?;
    let purchases = Purchase::find_by_harvest_id(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(HarvestDetails {
        harvest,
        purchases,
    })))
}

pub async fn update_harvest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateHarvest>,
) -> Result<ResponseJson<ApiResponse<Harvest>>, ApiError> {
    let harvest = Harvest::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid harvest id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(harvest)))
}

pub async fn delete_harvest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Harvest::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid harvest id: {id}")));
    }
    tracing::info!("harvest {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/harvests",
        Router::new()
            .route("/", get(list_harvests).post(create_harvest))
            .route(
                "/{id}",
                get(get_harvest).put(update_harvest).delete(delete_harvest),
            ),
    )
}
