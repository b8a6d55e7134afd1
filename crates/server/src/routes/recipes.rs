//! Routes for recipes and the cuisine lookup.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::recipe::{CreateRecipe, Cuisine, Recipe, RecipeViewModel};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<RecipeViewModel>>>, ApiError> {
    let paged = listing::list_recipes(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateRecipe>,
) -> Result<ResponseJson<ApiResponse<Recipe>>, ApiError> {
    let recipe = Recipe::create(&state.db.pool, &payload).await?;
    tracing::info!("recipe {} created", recipe.id);
    Ok(ResponseJson(ApiResponse::success(recipe)))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Recipe>>, ApiError> {
    let recipe = Recipe::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid recipe id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(recipe)))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateRecipe>,
) -> Result<ResponseJson<ApiResponse<Recipe>>, ApiError> {
    let recipe = Recipe::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid recipe id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(recipe)))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Recipe::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid recipe id: {id}")));
    }
    tracing::info!("recipe {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_cuisines(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Cuisine>>>, ApiError> {
    let cuisines = Cuisine::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(cuisines)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest(
            "/recipes",
            Router::new()
                .route("/", get(list_recipes).post(create_recipe))
                .route(
                    "/{id}",
                    get(get_recipe).put(update_recipe).delete(delete_recipe),
                ),
        )
        .route("/cuisines", get(list_cuisines))
}
