//! Routes for purchases (sales of harvests).

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::purchase::{CreatePurchase, Purchase, PurchaseViewModel};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_purchases(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<PurchaseViewModel>>>, ApiError> {
    let paged = listing::list_purchases(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_purchase(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreatePurchase>,
) -> Result<ResponseJson<ApiResponse<Purchase>>, ApiError> {
    let purchase = Purchase::create(&state.db.pool, &payload).await?;
    tracing::info!("purchase {} created", purchase.id);
    Ok(ResponseJson(ApiResponse::success(purchase)))
}

pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Purchase>>, ApiError> {
    let purchase = Purchase::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid purchase id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(purchase)))
}

pub async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreatePurchase>,
) -> Result<ResponseJson<ApiResponse<Purchase>>, ApiError> {
    let purchase = Purchase::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid purchase id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(purchase)))
}

pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Purchase::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid purchase id: {id}")));
    }
    tracing::info!("purchase {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/purchases",
        Router::new()
            .route("/", get(list_purchases).post(create_purchase))
            .route(
                "/{id}",
                get(get_purchase)
                    .put(update_purchase)
                    .delete(delete_purchase),
            ),
    )
}
