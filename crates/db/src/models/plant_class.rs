use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// A plant class; classes form a tree through `parent_id`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PlantClass {
    pub id: Uuid,
    pub name: String,
    pub passport: Option<String>,
    pub parent_id: Option<Uuid>,
    pub fiber_per_serving: Option<f64>,
    pub potassium_per_serving: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreatePlantClass {
    pub name: String,
    pub passport: Option<String>,
    pub parent_id: Option<Uuid>,
    pub fiber_per_serving: Option<f64>,
    pub potassium_per_serving: Option<f64>,
}

/// Flattened projection for lists: class columns plus the parent name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PlantClassViewModel {
    pub id: Uuid,
    pub name: String,
    pub passport: Option<String>,
    pub parent_id: Option<Uuid>,
    pub parent_name: Option<String>,
    pub fiber_per_serving: Option<f64>,
    pub potassium_per_serving: Option<f64>,
}

impl SortSelector for PlantClassViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.name.cmp(&b.name)),
            _ => None,
        }
    }
}

const COLUMNS: &str = "id, name, passport, parent_id, fiber_per_serving, potassium_per_serving";

impl PlantClass {
    pub async fn create(pool: &SqlitePool, data: &CreatePlantClass) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, PlantClass>(&format!(
            "INSERT INTO plant_classes (id, name, passport, parent_id, fiber_per_serving, potassium_per_serving)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.passport)
        .bind(data.parent_id)
        .bind(data.fiber_per_serving)
        .bind(data.potassium_per_serving)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlantClass>(&format!(
            "SELECT {COLUMNS} FROM plant_classes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All plant classes as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<PlantClassViewModel>, sqlx::Error> {
        sqlx::query_as::<_, PlantClassViewModel>(
            "SELECT c.id, c.name, c.passport, c.parent_id, p.name AS parent_name,
                    c.fiber_per_serving, c.potassium_per_serving
             FROM plant_classes c
             LEFT JOIN plant_classes p ON p.id = c.parent_id
             ORDER BY c.rowid",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreatePlantClass,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlantClass>(&format!(
            "UPDATE plant_classes
             SET name = $2, passport = $3, parent_id = $4,
                 fiber_per_serving = $5, potassium_per_serving = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.passport)
        .bind(data.parent_id)
        .bind(data.fiber_per_serving)
        .bind(data.potassium_per_serving)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plant_classes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
