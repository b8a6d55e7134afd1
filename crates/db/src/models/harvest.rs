use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Harvest {
    pub id: Uuid,
    pub collected_on: DateTime<Utc>,
    pub weight: f64,
    pub tag: Option<String>,
    pub vegetation_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateHarvest {
    pub collected_on: DateTime<Utc>,
    pub weight: f64,
    pub tag: Option<String>,
    pub vegetation_id: Uuid,
}

/// Flattened projection for lists: harvest columns plus the plant class of
/// the harvested vegetation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct HarvestViewModel {
    pub id: Uuid,
    pub collected_on: DateTime<Utc>,
    pub weight: f64,
    pub tag: Option<String>,
    pub vegetation_id: Uuid,
    pub plant_class_name: String,
}

impl SortSelector for HarvestViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.collected_on.cmp(&b.collected_on)),
            3 => Some(|a, b| a.weight.total_cmp(&b.weight)),
            4 => Some(|a, b| a.tag.cmp(&b.tag)),
            _ => None,
        }
    }
}

const COLUMNS: &str = "id, collected_on, weight, tag, vegetation_id";

impl Harvest {
    pub async fn create(pool: &SqlitePool, data: &CreateHarvest) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Harvest>(&format!(
            "INSERT INTO harvests (id, collected_on, weight, tag, vegetation_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.collected_on)
        .bind(data.weight)
        .bind(&data.tag)
        .bind(data.vegetation_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Harvest>(&format!("SELECT {COLUMNS} FROM harvests WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All harvests as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<HarvestViewModel>, sqlx::Error> {
        sqlx::query_as::<_, HarvestViewModel>(
            "SELECT h.id, h.collected_on, h.weight, h.tag, h.vegetation_id,
                    pc.name AS plant_class_name
             FROM harvests h
             JOIN vegetations v ON v.id = h.vegetation_id
             JOIN plant_classes pc ON pc.id = v.plant_class_id
             ORDER BY h.rowid",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateHarvest,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Harvest>(&format!(
            "UPDATE harvests
             SET collected_on = $2, weight = $3, tag = $4, vegetation_id = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.collected_on)
        .bind(data.weight)
        .bind(&data.tag)
        .bind(data.vegetation_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM harvests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
