//! Routes for measures (field activities) and the measure-type lookup.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::measure::{CreateMeasure, Measure, MeasureType, MeasureViewModel};
use services::services::listing;
use utils::{
    pagination::{ListQuery, Paged},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_measures(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Paged<MeasureViewModel>>>, ApiError> {
    let paged = listing::list_measures(&state.db.pool, state.settings.page_size, query).await?;
    Ok(ResponseJson(ApiResponse::success(paged)))
}

pub async fn create_measure(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateMeasure>,
) -> Result<ResponseJson<ApiResponse<Measure>>, ApiError> {
    let measure = Measure::create(&state.db.pool, &payload).await?;
    tracing::info!("measure {} created", measure.id);
    Ok(ResponseJson(ApiResponse::success(measure)))
}

pub async fn get_measure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<MeasureViewModel>>, ApiError> {
    let measure = Measure::find_view_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid measure id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(measure)))
}

pub async fn update_measure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateMeasure>,
) -> Result<ResponseJson<ApiResponse<Measure>>, ApiError> {
    let measure = Measure::update(&state.db.pool, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invalid measure id: {id}")))?;
    Ok(ResponseJson(ApiResponse::success(measure)))
}

pub async fn delete_measure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Measure::delete(&state.db.pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Invalid measure id: {id}")));
    }
    tracing::info!("measure {id} deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_measure_types(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<MeasureType>>>, ApiError> {
    let types = MeasureType::find_all(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(types)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest(
            "/measures",
            Router::new()
                .route("/", get(list_measures).post(create_measure))
                .route(
                    "/{id}",
                    get(get_measure).put(update_measure).delete(delete_measure),
                ),
        )
        .route("/measure-types", get(list_measure_types))
}
