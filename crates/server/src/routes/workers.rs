//! Routes for workers and their worker-type lookup.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{
    measure::Measure,
    worker::{CreateWorker, Worker, WorkerType, WorkerWithMeasures},
};
use serde::Deserialize;
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Extra flag on the workers list: embed each worker's measures.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ComplexFlag {
    #[serde(default)]
    pub complex: bool,
}

pub async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(flags): Query<ComplexFlag>,
) -> Result<ResponseJson<ApiResponse<Paged<WorkerWithMeasures>>>, ApiError> {
    let paged = listing::list_workers(
        &state.db.pool,
        state.settings.page_size,
        query,
        flags.complex,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_worker(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateWorker>,
) -> Result<ResponseJson<ApiResponse<Worker>>, ApiError> {
    let worker = Worker::create(&state.db.pool, &payload).await?;
    tracing::info!("worker {} created", worker.id);
    Ok(ResponseJson(ApiResponse::success(worker)))
}

pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<WorkerWithMeasures>>, ApiError> {
    let worker = Worker::find_view_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid worker id: {id}")))?;
    let measures = Measure::find_by_worker_id(&state.db.pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(WorkerWithMeasures {
        worker,
        measures,
    })))
}

pub async fn update_worker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateWorker>,
) -> Result<ResponseJson<ApiResponse<Worker>>, ApiError> {
    let worker = Worker::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid worker id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(worker)))
}

pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Worker::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid worker id: {id}")));
    }
    tracing::info!("worker {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_worker_types(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<WorkerType>>>, ApiError> {
    let types = WorkerType::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(types)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest(
            "/workers",
            Router::new()
                .route("/", get(list_workers).post(create_worker))
                .route(
                    "/{id}",
                    get(get_worker).put(update_worker).delete(delete_worker),
                ),
        )
        .route("/worker-types", get(list_worker_types))
}

#[cfg(test)]
mod tests {
    use db::DBService;

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
    async fn create_then_get_then_delete() {
        let state = test_state().await;
        let created = create_worker(
            State(state.clone()),
            axum::Json(CreateWorker {
                worker_type_id: None,
                tag: "picker-1".into(),
                notes: None,
                daily_wage: 90.0,
                email: None,
                phone: None,
            }),
        )
        .await
        .unwrap();
        let id = created.0.data.unwrap().id;

        let fetched = get_worker(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(fetched.0.data.unwrap().tag, "picker-1");

        delete_worker(State(state.clone()), Path(id)).await.unwrap();
        let err = get_worker(State(state), Path(id)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_rejects_out_of_range_page() {
        let state = test_state().await;
        create_worker(
            State(state.clone()),
            axum::Json(CreateWorker {
                worker_type_id: None,
                tag: "solo".into(),
                notes: None,
                daily_wage: 75.0,
                email: None,
                phone: None,
            }),
        )
        .await
        .unwrap();

        let err = list_workers(
            State(state),
            Query(ListQuery {
                page: 2,
                sort: 1,
                ascending: true,
            }),
            Query(ComplexFlag::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Paging(_)));
    }
}
