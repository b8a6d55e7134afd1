use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// Lookup table for field-activity kinds (watering, pruning, ...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct MeasureType {
    pub id: Uuid,
    pub caption: String,
    pub description: Option<String>,
}

impl MeasureType {
    pub async fn create(
        pool: &SqlitePool,
        caption: &str,
        description: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, MeasureType>(
            "INSERT INTO measure_types (id, caption, description)
             VALUES ($1, $2, $3)
             RETURNING id, caption, description",
        )
        .bind(id)
        .bind(caption)
        .bind(description)
        .fetch_one(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, MeasureType>(
            "SELECT id, caption, description FROM measure_types ORDER BY rowid",
        )
        .fetch_all(pool)
        .await
    }
}

/// A field activity performed on one vegetation, optionally by a worker.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Measure {
    pub id: Uuid,
    pub performed_on: DateTime<Utc>,
    pub description: String,
    pub measure_type_id: Uuid,
    pub vegetation_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateMeasure {
    pub performed_on: DateTime<Utc>,
    pub description: String,
    pub measure_type_id: Uuid,
    pub vegetation_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub duration_minutes: Option<i32>,
}

/// Flattened projection for lists: measure columns plus joined captions.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct MeasureViewModel {
    pub id: Uuid,
    pub performed_on: DateTime<Utc>,
    pub description: String,
    pub measure_type_id: Uuid,
    pub measure_type_caption: String,
    pub vegetation_id: Uuid,
    pub plant_class_name: String,
    pub worker_id: Option<Uuid>,
    pub worker_tag: Option<String>,
    pub duration_minutes: Option<i32>,
}

impl SortSelector for MeasureViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.performed_on.cmp(&b.performed_on)),
            3 => Some(|a, b| a.description.cmp(&b.description)),
            4 => Some(|a, b| a.measure_type_id.cmp(&b.measure_type_id)),
            5 => Some(|a, b| a.vegetation_id.cmp(&b.vegetation_id)),
            6 => Some(|a, b| a.worker_id.cmp(&b.worker_id)),
            7 => Some(|a, b| a.duration_minutes.cmp(&b.duration_minutes)),
            _ => None,
        }
    }
}

const VIEW_QUERY: &str = "SELECT
        m.id, m.performed_on, m.description,
        m.measure_type_id, mt.caption AS measure_type_caption,
        m.vegetation_id, pc.name AS plant_class_name,
        m.worker_id, w.tag AS worker_tag,
        m.duration_minutes
     FROM measures m
     JOIN measure_types mt ON mt.id = m.measure_type_id
     JOIN vegetations v ON v.id = m.vegetation_id
     JOIN plant_classes pc ON pc.id = v.plant_class_id
     LEFT JOIN workers w ON w.id = m.worker_id";

impl Measure {
    pub async fn create(pool: &SqlitePool, data: &CreateMeasure) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Measure>(
            "INSERT INTO measures (id, performed_on, description, measure_type_id, vegetation_id, worker_id, duration_minutes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, performed_on, description, measure_type_id, vegetation_id, worker_id, duration_minutes",
        )
        .bind(id)
        .bind(data.performed_on)
        .bind(&data.description)
        .bind(data.measure_type_id)
        .bind(data.vegetation_id)
        .bind(data.worker_id)
        .bind(data.duration_minutes)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Measure>(
            "SELECT id, performed_on, description, measure_type_id, vegetation_id, worker_id, duration_minutes
             FROM measures WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All measures as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<MeasureViewModel>, sqlx::Error> {
        sqlx::query_as::<_, MeasureViewModel>(&format!("{VIEW_QUERY} ORDER BY m.rowid"))
            .fetch_all(pool)
            .await
    }

    pub async fn find_view_by_id(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<MeasureViewModel>, sqlx::Error> {
        sqlx::query_as::<_, MeasureViewModel>(&format!("{VIEW_QUERY} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_worker_id(
        pool: &SqlitePool,
        worker_id: Uuid,
    ) -> Result<Vec<MeasureViewModel>, sqlx::Error> {
        sqlx::query_as::<_, MeasureViewModel>(&format!(
            "{VIEW_QUERY} WHERE m.worker_id = $1 ORDER BY m.performed_on"
        ))
        .bind(worker_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateMeasure,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Measure>(
            "UPDATE measures
             SET performed_on = $2, description = $3, measure_type_id = $4,
                 vegetation_id = $5, worker_id = $6, duration_minutes = $7
             WHERE id = $1
             RETURNING id, performed_on, description, measure_type_id, vegetation_id, worker_id, duration_minutes",
        )
        .bind(id)
        .bind(data.performed_on)
        .bind(&data.description)
        .bind(data.measure_type_id)
        .bind(data.vegetation_id)
        .bind(data.worker_id)
        .bind(data.duration_minutes)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM measures WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
