use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use ts_rs::TS;
use utils::pagination::{Comparator, SortSelector};
use uuid::Uuid;

/// One planting of a plant class on a plot, from planting to removal.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Vegetation {
    pub id: Uuid,
    pub units: i32,
    pub planted_on: DateTime<Utc>,
    pub removed_on: Option<DateTime<Utc>>,
    pub yield_anticipated_on: Option<DateTime<Utc>>,
    pub expiry_anticipated_on: Option<DateTime<Utc>>,
    pub plot_id: Uuid,
    pub plant_class_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateVegetation {
    pub units: i32,
    pub planted_on: DateTime<Utc>,
    pub removed_on: Option<DateTime<Utc>>,
    pub yield_anticipated_on: Option<DateTime<Utc>>,
    pub expiry_anticipated_on: Option<DateTime<Utc>>,
    pub plot_id: Uuid,
    pub plant_class_id: Uuid,
}

/// Optional list filters: by plot and/or plant class.
#[derive(Debug, Clone, Copy, Default, Deserialize, TS)]
pub struct VegetationFilter {
    pub plot_id: Option<Uuid>,
    pub plant_class_id: Option<Uuid>,
}

/// Flattened projection for lists: vegetation columns plus joined names.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct VegetationViewModel {
    pub id: Uuid,
    pub units: i32,
    pub planted_on: DateTime<Utc>,
    pub removed_on: Option<DateTime<Utc>>,
    pub yield_anticipated_on: Option<DateTime<Utc>>,
    pub expiry_anticipated_on: Option<DateTime<Utc>>,
    pub plot_id: Uuid,
    pub plot_tag: String,
    pub plant_class_id: Uuid,
    pub plant_class_name: String,
}

impl SortSelector for VegetationViewModel {
    fn comparator(sort: i32) -> Option<Comparator<Self>> {
        match sort {
            1 => Some(|a, b| a.id.cmp(&b.id)),
            2 => Some(|a, b| a.planted_on.cmp(&b.planted_on)),
            3 => Some(|a, b| a.units.cmp(&b.units)),
            _ => None,
        }
    }
}

const COLUMNS: &str = "id, units, planted_on, removed_on, yield_anticipated_on, expiry_anticipated_on, plot_id, plant_class_id";

impl Vegetation {
    pub async fn create(pool: &SqlitePool, data: &CreateVegetation) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Vegetation>(&format!(
            "INSERT INTO vegetations (id, units, planted_on, removed_on, yield_anticipated_on, expiry_anticipated_on, plot_id, plant_class_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.units)
        .bind(data.planted_on)
        .bind(data.removed_on)
        .bind(data.yield_anticipated_on)
        .bind(data.expiry_anticipated_on)
        .bind(data.plot_id)
        .bind(data.plant_class_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Vegetation>(&format!(
            "SELECT {COLUMNS} FROM vegetations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Vegetations as flat view models, optionally filtered by plot and/or
    /// plant class, in natural (insertion) order.
    pub async fn find_all(
        pool: &SqlitePool,
        filter: VegetationFilter,
    ) -> Result<Vec<VegetationViewModel>, sqlx::Error> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT v.id, v.units, v.planted_on, v.removed_on, v.yield_anticipated_on,
                    v.expiry_anticipated_on, v.plot_id, p.tag AS plot_tag,
                    v.plant_class_id, pc.name AS plant_class_name
             FROM vegetations v
             JOIN plots p ON p.id = v.plot_id
             JOIN plant_classes pc ON pc.id = v.plant_class_id
             WHERE 1 = 1",
        );
        if let Some(plot_id) = filter.plot_id {
            builder.push(" AND v.plot_id = ").push_bind(plot_id);
        }
        if let Some(plant_class_id) = filter.plant_class_id {
            builder.push(" AND v.plant_class_id = ").push_bind(plant_class_id);
        }
        builder.push(" ORDER BY v.rowid");
        builder.build_query_as().fetch_all(pool).await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateVegetation,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Vegetation>(&format!(
            "UPDATE vegetations
             SET units = $2, planted_on = $3, removed_on = $4, yield_anticipated_on = $5,
                 expiry_anticipated_on = $6, plot_id = $7, plant_class_id = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.units)
        .bind(data.planted_on)
        .bind(data.removed_on)
        .bind(data.yield_anticipated_on)
        .bind(data.expiry_anticipated_on)
        .bind(data.plot_id)
        .bind(data.plant_class_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vegetations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
