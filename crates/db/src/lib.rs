pub mod models;

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Shared handle to the SQLite pool with migrations applied.
#[derive(Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        // An in-memory database exists per connection, so the pool must be
        // pinned to a single connection for it to behave like one database.
        let in_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .min_connections(if in_memory { 1 } else { 0 })
            .max_connections(if in_memory { 1 } else { 5 })
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("database ready at {database_url}");
        Ok(Self { pool })
    }
}
