use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// Lookup table for worker roles (seasonal, permanent, ...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct WorkerType {
    pub id: Uuid,
    pub caption: String,
    pub description: Option<String>,
}

impl WorkerType {
    pub async fn create(
        pool: &SqlitePool,
        caption: &str,
        description: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, WorkerType>(
            "INSERT INTO worker_types (id, caption, description)
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
        sqlx::query_as::<_, WorkerType>(
            "SELECT id, caption, description FROM worker_types ORDER BY rowid",
        )
        .fetch_all(pool)
        .await
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Worker {
    pub id: Uuid,
    pub worker_type_id: Option<Uuid>,
    pub tag: String,
    pub notes: Option<String>,
    pub daily_wage: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateWorker {
    pub worker_type_id: Option<Uuid>,
    pub tag: String,
    pub notes: Option<String>,
    pub daily_wage: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Flattened projection for lists: worker columns plus the joined
/// worker-type caption.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct WorkerViewModel {
    pub id: Uuid,
    pub worker_type_id: Option<Uuid>,
    pub worker_type_caption: Option<String>,
    pub tag: String,
    pub notes: Option<String>,
    pub daily_wage: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Worker plus the measures performed by them (the "complex" listing and
/// the worker detail view).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct WorkerWithMeasures {
    #[serde(flatten)]
    #[ts(flatten)]
    pub worker: WorkerViewModel,
    pub measures: Vec<super::measure::MeasureViewModel>,
}

impl std::ops::Deref for WorkerWithMeasures {
    type Target = WorkerViewModel;
    fn deref(&self) -> &Self::Target {
        &self.worker
    }
}

impl SortSelector for WorkerViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.worker_type_id.cmp(&b.worker_type_id)),
            3 => Some(|a, b| a.tag.cmp(&b.tag)),
            4 => Some(|a, b| a.daily_wage.total_cmp(&b.daily_wage)),
            5 => Some(|a, b| a.email.cmp(&b.email)),
            6 => Some(|a, b| a.phone.cmp(&b.phone)),
            _ => None,
        }
    }
}

const VIEW_COLUMNS: &str = "w.id, w.worker_type_id, t.caption AS worker_type_caption,
     w.tag, w.notes, w.daily_wage, w.email, w.phone";

impl Worker {
    pub async fn create(pool: &SqlitePool, data: &CreateWorker) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query_as::<_, Worker>(
            "INSERT INTO workers (id, worker_type_id, tag, notes, daily_wage, email, phone, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, worker_type_id, tag, notes, daily_wage, email, phone, created_at",
        )
        .bind(id)
        .bind(data.worker_type_id)
        .bind(&data.tag)
        .bind(&data.notes)
        .bind(data.daily_wage)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(created_at)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Worker>(
            "SELECT id, worker_type_id, tag, notes, daily_wage, email, phone, created_at
             FROM workers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All workers as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<WorkerViewModel>, sqlx::Error> {
        sqlx::query_as::<_, WorkerViewModel>(&format!(
            "SELECT {VIEW_COLUMNS}
             FROM workers w
             LEFT JOIN worker_types t ON t.id = w.worker_type_id
             ORDER BY w.rowid"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_view_by_id(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<WorkerViewModel>, sqlx::Error> {
        sqlx::query_as::<_, WorkerViewModel>(&format!(
            "SELECT {VIEW_COLUMNS}
             FROM workers w
             LEFT JOIN worker_types t ON t.id = w.worker_type_id
             WHERE w.id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateWorker,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Worker>(
            "UPDATE workers
             SET worker_type_id = $2, tag = $3, notes = $4, daily_wage = $5, email = $6, phone = $7
             WHERE id = $1
             RETURNING id, worker_type_id, tag, notes, daily_wage, email, phone, created_at",
        )
        .bind(id)
        .bind(data.worker_type_id)
        .bind(&data.tag)
        .bind(&data.notes)
        .bind(data.daily_wage)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn worker_crud_round_trip() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        let wt = WorkerType::create(&db.pool, "Seasonal", None).await.unwrap();

        let created = Worker::create(
            &db.pool,
            &CreateWorker {
                worker_type_id: Some(wt.id),
                tag: "picker-1".into(),
                notes: None,
                daily_wage: 95.0,
                email: Some("picker@farm.test".into()),
                phone: None,
            },
        )
        .await
        .unwrap();

        let view = Worker::find_view_by_id(&db.pool, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.worker_type_caption.as_deref(), Some("Seasonal"));

        let updated = Worker::update(
            &db.pool,
            created.id,
            &CreateWorker {
                worker_type_id: Some(wt.id),
                tag: "picker-1".into(),
                notes: Some("promoted".into()),
                daily_wage: 110.0,
                email: None,
                phone: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.daily_wage, 110.0);
        assert_eq!(updated.created_at, created.created_at);

        assert_eq!(Worker::delete(&db.pool, created.id).await.unwrap(), 1);
        assert_eq!(Worker::delete(&db.pool, created.id).await.unwrap(), 0);
        assert!(Worker::find_by_id(&db.pool, created.id)
            .await
            .unwrap()
            .is_none());
    }
}
