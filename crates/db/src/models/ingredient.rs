use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// Join between a recipe and a plant class it uses.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Ingredient {
    pub id: Uuid,
    pub plant_class_id: Uuid,
    pub recipe_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateIngredient {
    pub plant_class_id: Uuid,
    pub recipe_id: Uuid,
}

/// Flattened projection for lists: ingredient keys plus joined names.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct IngredientViewModel {
    pub id: Uuid,
    pub plant_class_id: Uuid,
    pub plant_class_name: String,
    pub recipe_id: Uuid,
    pub recipe_caption: String,
}

impl SortSelector for IngredientViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.plant_class_name.cmp(&b.plant_class_name)),
            3 => Some(|a, b| a.recipe_caption.cmp(&b.recipe_caption)),
            _ => None,
        }
    }
}

impl Ingredient {
    pub async fn create(pool: &SqlitePool, data: &CreateIngredient) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Ingredient>(
            "INSERT INTO ingredients (id, plant_class_id, recipe_id)
             VALUES ($1, $2, $3)
             RETURNING id, plant_class_id, recipe_id",
        )
        .bind(id)
        .bind(data.plant_class_id)
        .bind(data.recipe_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            "SELECT id, plant_class_id, recipe_id FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All ingredients as flat view models, in natural (insertion) order.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<IngredientViewModel>, sqlx::Error> {
        sqlx::query_as::<_, IngredientViewModel>(
            "SELECT i.id, i.plant_class_id, pc.name AS plant_class_name,
                    i.recipe_id, r.caption AS recipe_caption
             FROM ingredients i
             JOIN plant_classes pc ON pc.id = i.plant_class_id
             JOIN recipes r ON r.id = i.recipe_id
             ORDER BY i.rowid",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateIngredient,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            "UPDATE ingredients
             SET plant_class_id = $2, recipe_id = $3
             WHERE id = $1
             RETURNING id, plant_class_id, recipe_id",
        )
        .bind(id)
        .bind(data.plant_class_id)
        .bind(data.recipe_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
