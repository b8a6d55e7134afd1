use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector, cmp_opt_f64};
use uuid::Uuid;

/// A plot of land. Soil and infrastructure descriptors are free-form
/// lookups maintained outside this service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Plot {
    pub id: Uuid,
    pub tag: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub area: Option<f64>,
    pub soil_quality: Option<String>,
    pub soil_type: Option<String>,
    pub sunlight: Option<String>,
    pub infrastructure: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreatePlot {
    pub tag: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub area: Option<f64>,
    pub soil_quality: Option<String>,
    pub soil_type: Option<String>,
    pub sunlight: Option<String>,
    pub infrastructure: Option<String>,
}

impl SortSelector for Plot {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.tag.cmp(&b.tag)),
            3 => Some(|a, b| cmp_opt_f64(a.area, b.area)),
            _ => None,
        }
    }
}

const COLUMNS: &str =
    "id, tag, latitude, longitude, area, soil_quality, soil_type, sunlight, infrastructure";

impl Plot {
    pub async fn create(pool: &SqlitePool, data: &CreatePlot) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Plot>(&format!(
            "INSERT INTO plots (id, tag, latitude, longitude, area, soil_quality, soil_type, sunlight, infrastructure)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&data.tag)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.area)
        .bind(&data.soil_quality)
        .bind(&data.soil_type)
        .bind(&data.sunlight)
        .bind(&data.infrastructure)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Plot>(&format!("SELECT {COLUMNS} FROM plots WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Plot>(&format!("SELECT {COLUMNS} FROM plots ORDER BY rowid"))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreatePlot,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Plot>(&format!(
            "UPDATE plots
             SET tag = $2, latitude = $3, longitude = $4, area = $5,
                 soil_quality = $6, soil_type = $7, sunlight = $8, infrastructure = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&data.tag)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.area)
        .bind(&data.soil_quality)
        .bind(&data.soil_type)
        .bind(&data.sunlight)
        .bind(&data.infrastructure)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
