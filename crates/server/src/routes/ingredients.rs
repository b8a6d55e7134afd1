//! Routes for recipe ingredients.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::ingredient::{CreateIngredient, Ingredient, IngredientViewModel};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<IngredientViewModel>>>, ApiError> {
    let paged = listing::list_ingredients(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_ingredient(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateIngredient>,
) -> Result<ResponseJson<ApiResponse<Ingredient>>, ApiError> {
    let ingredient = Ingredient::create(&state.db.pool, &payload).await?;
    tracing::info!("ingredient {} created", ingredient.id);
    Ok(ResponseJson(ApiResponse::success(ingredient)))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Ingredient>>, ApiError> {
    let ingredient = Ingredient::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid ingredient id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(ingredient)))
}

pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateIngredient>,
) -> Result<ResponseJson<ApiResponse<Ingredient>>, ApiError> {
    let ingredient = Ingredient::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid ingredient id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(ingredient)))
}

pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Ingredient::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid ingredient id: {id}")));
    }
    tracing::info!("ingredient {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/ingredients",
        Router::new()
            .route("/", get(list_ingredients).post(create_ingredient))
            .route(
                "/{id}",
                get(get_ingredient)
                    .put(update_ingredient)
                    .delete(delete_ingredient),
            ),
    )
}
