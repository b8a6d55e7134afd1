use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// A sale of (part of) a harvest.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Purchase {
    pub id: Uuid,
    pub collected_on: DateTime<Utc>,
    pub weight: f64,
    pub gain: f64,
    pub tag: Option<String>,
    pub harvest_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreatePurchase {
    pub collected_on: DateTime<Utc>,
    pub weight: f64,
    pub gain: f64,
    pub tag: Option<String>,
    pub harvest_id: Uuid,
}

/// Flattened projection for lists: purchase columns plus the harvest tag.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PurchaseViewModel {
    pub id: Uuid,
    pub collected_on: DateTime<Utc>,
    pub weight: f64,
    pub gain: f64,
    pub tag: Option<String>,
    pub harvest_id: Uuid,
    pub harvest_tag: Option<String>,
}

impl SortSelector for PurchaseViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.collected_on.cmp(&b.collected_on)),
            3 => Some(|a, b| a.weight.total_cmp(&b.weight)),
            4 => Some(|a, b| a.gain.total_cmp(&b.gain)),
            _ => None,
        }
    }
}

const COLUMNS: &str = "id, collected_on, weight, gain, tag, harvest_id";

impl Purchase {
    pub async fn create(pool: &SqlitePool, data: &CreatePurchase) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Purchase>(&format!(
            "INSERT INTO purchases (id, collected_on, weight, gain, tag, harvest_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.collected_on)
        .bind(data.weight)
        .bind(data.gain)
        .bind(&data.tag)
        .bind(data.harvest_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Purchase>(&format!("SELECT {COLUMNS} FROM purchases WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All purchases as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<PurchaseViewModel>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseViewModel>(
            "SELECT p.id, p.collected_on, p.weight, p.gain, p.tag, p.harvest_id,
                    h.tag AS harvest_tag
             FROM purchases p
             JOIN harvests h ON h.id = p.harvest_id
             ORDER BY p.rowid",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_harvest_id(
        pool: &SqlitePool,
        harvest_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {COLUMNS} FROM purchases WHERE harvest_id = $1 ORDER BY collected_on"
        ))
        .bind(harvest_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreatePurchase,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Purchase>(&format!(
            "UPDATE purchases
             SET collected_on = $2, weight = $3, gain = $4, tag = $5, harvest_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.collected_on)
        .bind(data.weight)
        .bind(data.gain)
        .bind(&data.tag)
        .bind(data.harvest_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
