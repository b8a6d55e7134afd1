use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// Lookup table for cuisines.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Cuisine {
    pub id: Uuid,
    pub caption: String,
    pub description: Option<String>,
}

impl Cuisine {
    pub async fn create(
        pool: &SqlitePool,
        caption: &str,
        description: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Cuisine>(
            "INSERT INTO cuisines (id, caption, description)
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
        sqlx::query_as::<_, Cuisine>("SELECT id, caption, description FROM cuisines ORDER BY rowid")
            .fetch_all(pool)
            .await
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Recipe {
    pub id: Uuid,
    pub caption: String,
    pub description: Option<String>,
    pub calories_per_serving: f64,
    pub approximate_duration: Option<f64>,
    pub cuisine_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateRecipe {
    pub caption: String,
    pub description: Option<String>,
    pub calories_per_serving: f64,
    pub approximate_duration: Option<f64>,
    pub cuisine_id: Option<Uuid>,
}

/// Flattened projection for lists: recipe columns plus the cuisine caption.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct RecipeViewModel {
    pub id: Uuid,
    pub caption: String,
    pub description: Option<String>,
    pub calories_per_serving: f64,
    pub approximate_duration: Option<f64>,
    pub cuisine_id: Option<Uuid>,
    pub cuisine_caption: Option<String>,
}

impl SortSelector for RecipeViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.caption.cmp(&b.caption)),
            3 => Some(|a, b| a.calories_per_serving.total_cmp(&b.calories_per_serving)),
            _ => None,
        }
    }
}

const COLUMNS: &str =
    "id, caption, description, calories_per_serving, approximate_duration, cuisine_id";

impl Recipe {
    pub async fn create(pool: &SqlitePool, data: &CreateRecipe) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Recipe>(&format!(
            "INSERT INTO recipes (id, caption, description, calories_per_serving, approximate_duration, cuisine_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&data.caption)
        .bind(&data.description)
        .bind(data.calories_per_serving)
        .bind(data.approximate_duration)
        .bind(data.cuisine_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(&format!("SELECT {COLUMNS} FROM recipes WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All recipes as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<RecipeViewModel>, sqlx::Error> {
        sqlx::query_as::<_, RecipeViewModel>(
            "SELECT r.id, r.caption, r.description, r.calories_per_serving,
                    r.approximate_duration, r.cuisine_id, c.caption AS cuisine_caption
             FROM recipes r
             LEFT JOIN cuisines c ON c.id = r.cuisine_id
             ORDER BY r.rowid",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateRecipe,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(&format!(
            "UPDATE recipes
             SET caption = $2, description = $3, calories_per_serving = $4,
                 approximate_duration = $5, cuisine_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&data.caption)
        .bind(&data.description)
        .bind(data.calories_per_serving)
        .bind(data.approximate_duration)
        .bind(data.cuisine_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
