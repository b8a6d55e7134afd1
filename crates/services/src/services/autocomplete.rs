//! Label lookups for form autocomplete fields: substring match, ordered by
//! label then id, capped by the configured suggestion count.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct IdLabel {
    pub id: Uuid,
    pub label: String,
}

async fn suggest(
    pool: &SqlitePool,
    table: &str,
    label_column: &str,
    term: &str,
    limit: i64,
) -> Result<Vec<IdLabel>, sqlx::Error> {
    // LIKE wildcards in the term must match literally, so escape them
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    // table/column names come from the fixed call sites below, never from
    // client input
    sqlx::query_as::<_, IdLabel>(&format!(
        "SELECT id, {label_column} AS label
         FROM {table}
         WHERE {label_column} LIKE '%' || $1 || '%' ESCAPE '\\'
         ORDER BY label, id
         LIMIT $2"
    ))
    .bind(escaped)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn worker_types(
    pool: &SqlitePool,
    term: &str,
    limit: i64,
) -> Result<Vec<IdLabel>, sqlx::Error> {
    suggest(pool, "worker_types", "caption", term, limit).await
}

pub async fn measure_types(
    pool: &SqlitePool,
    term: &str,
    limit: i64,
) -> Result<Vec<IdLabel>, sqlx::Error> {
    suggest(pool, "measure_types", "caption", term, limit).await
}

pub async fn cuisines(
    pool: &SqlitePool,
    term: &str,
    limit: i64,
) -> Result<Vec<IdLabel>, sqlx::Error> {
    suggest(pool, "cuisines", "caption", term, limit).await
}

pub async fn plant_classes(
    pool: &SqlitePool,
    term: &str,
    limit: i64,
) -> Result<Vec<IdLabel>, sqlx::Error> {
    suggest(pool, "plant_classes", "name", term, limit).await
}

#[cfg(test)]
mod tests {
    use db::{DBService, models::measure::MeasureType};

    use super::*;

    #[tokio::test]
    async fn suggestions_are_filtered_ordered_and_limited() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        for caption in ["Watering", "Weeding", "Pruning", "Winter pruning"] {
            MeasureType::create(&db.pool, caption, None).await.unwrap();
        }

        let hits = measure_types(&db.pool, "ing", 10).await.unwrap();
        let labels: Vec<_> = hits.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Pruning", "Watering", "Weeding", "Winter pruning"]);

        let capped = measure_types(&db.pool, "ing", 2).await.unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].label, "Pruning");

        let none = measure_types(&db.pool, "zzz", 10).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn wildcard_characters_match_literally() {
        let db = DBService::new("sqlite::memory:").await.unwrap();
        for caption in ["100% shade", "full sun", "under_glass", "underglass"] {
            MeasureType::create(&db.pool, caption, None).await.unwrap();
        }

        let percent = measure_types(&db.pool, "%", 10).await.unwrap();
        let labels: Vec<_> = percent.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["100% shade"]);

        let underscore = measure_types(&db.pool, "r_g", 10).await.unwrap();
        let labels: Vec<_> = underscore.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["under_glass"]);
    }
}
