use crate::config::ScribeConfig;
use crate::error::ScribeError;
use crate::store::PgNoteStore;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool(config: &ScribeConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_timeout())
        .connect(&config.database_url)
        .await
}

pub async fn health_check(pool: &PgPool) -> Result<String, sqlx::Error> {
    let row: (String,) = sqlx::query_as("SELECT version()").fetch_one(pool).await?;
    Ok(row.0)
}

/// Connect and make sure the notes schema exists.
pub async fn open_note_store(config: &ScribeConfig) -> Result<PgNoteStore, ScribeError> {
    let pool = create_pool(config).await?;
    Ok(PgNoteStore::init(pool, config.database_timeout()).await?)
}
