//! List surface backing the rendered pages. Same pipeline as the API, but
//! an out-of-range page redirects to the first page (keeping sort and
//! direction) instead of failing the request.

use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Json as ResponseJson, Redirect, Response},
    routing::get,
};
use db::models::vegetation::VegetationFilter;
use services::services::listing::{self, ListError};
use utils::{pagination::ListQuery, response::ApiResponse};

use super::workers::ComplexFlag;
use crate::{AppState, error::ApiError};

fn first_page_redirect(entity: &str, query: ListQuery) -> Redirect {
    Redirect::to(&format!(
        "/web/{entity}?page=1&sort={}&ascending={}",
        query.sort, query.ascending
    ))
}

/// Wrap a list result in the page policy: serve the page, or bounce back
/// to page 1 when the requested page no longer exists.
fn page_response<T: serde::Serialize>(
    entity: &str,
    query: ListQuery,
    result: Result<T, ListError>,
) -> Result<Response, ApiError> {
    match result {
        Ok(paged) => Ok(ResponseJson(ApiResponse::success(paged)).into_response()),
        Err(ListError::Paging(err)) => {
            tracing::debug!("{entity} list: {err}, redirecting to first page");
            Ok(first_page_redirect(entity, query).into_response())
        }
        Err(other) => Err(other.into()),
    }
}

pub async fn workers_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(flags): Query<ComplexFlag>,
) -> Result<Response, ApiError> {
    let result = listing::list_workers(
        &state.db.pool,
        state.settings.page_size,
        query,
        flags.complex,
    )
    .await;
    page_response("workers", query, result)
}

pub async fn measures_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result = listing::list_measures(&state.db.pool, state.settings.page_size, query).await;
    page_response("measures", query, result)
}

pub async fn plots_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result = listing::list_plots(&state.db.pool, state.settings.page_size, query).await;
    page_response("plots", query, result)
}

pub async fn plant_classes_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result =
        listing::list_plant_classes(&state.db.pool, state.settings.page_size, query).await;
    page_response("plant-classes", query, result)
}

pub async fn vegetations_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<VegetationFilter>,
) -> Result<Response, ApiError> {
    let result =
        listing::list_vegetations(&state.db.pool, state.settings.page_size, query, filter).await;
    page_response("vegetations", query, result)
}

pub async fn harvests_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result = listing::list_harvests(&state.db.pool, state.settings.page_size, query).await;
    page_response("harvests", query, result)
}

pub async fn purchases_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result = listing::list_purchases(&state.db.pool, state.settings.page_size, query).await;
    page_response("purchases", query, result)
}

pub async fn recipes_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result = listing::list_recipes(&state.db.pool, state.settings.page_size, query).await;
    page_response("recipes", query, result)
}

pub async fn ingredients_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let result = listing::list_ingredients(&state.db.pool, state.settings.page_size, query).await;
    page_response("ingredients", query, result)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workers", get(workers_page))
        .route("/measures", get(measures_page))
        .route("/plots", get(plots_page))
        .route("/plant-classes", get(plant_classes_page))
        .route("/vegetations", get(vegetations_page))
        .route("/harvests", get(harvests_page))
        .route("/purchases", get(purchases_page))
        .route("/recipes", get(recipes_page))
        .route("/ingredients", get(ingredients_page))
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use db::{
        DBService,
        models::worker::{CreateWorker, Worker},
    };

    use super::*;
    use crate::config::AppSettings;

    async fn test_state() -> AppState {
        AppState {
            db: DBService::new("sqlite::memory:").await.unwrap(),
            settings: AppSettings {
                database_url: "sqlite::memory:".into(),
                port: 0,
                page_size: 3,
                autocomplete_count: 5,
            },
        }
    }

    #[tokio::test]
    async fn out_of_range_page_redirects_to_first_page() {
        let state = test_state().await;
        Worker::create(
            &state.db.pool,
            &CreateWorker {
                worker_type_id: None,
                tag: "solo".into(),
                notes: None,
                daily_wage: 75.0,
                email: None,
                phone: None,
            },
        )
        .await
        .unwrap();

        let response = workers_page(
            State(state),
            Query(ListQuery {
                page: 9,
                sort: 3,
                ascending: false,
            }),
            Query(ComplexFlag::default()),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert_eq!(location, "/web/workers?page=1&sort=3&ascending=false");
    }

    #[tokio::test]
    async fn valid_page_is_served() {
        let state = test_state().await;
        let response = workers_page(
            State(state),
            Query(ListQuery::default()),
            Query(ComplexFlag::default()),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
