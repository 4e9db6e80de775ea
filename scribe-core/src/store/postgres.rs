use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::NoteStore;
use crate::error::StoreError;
use crate::models::{NewNote, Note, UserId};

const CREATE_NOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id)";

/// Postgres-backed store. Every call is bounded by `timeout`, except the
/// final commit of a create.
#[derive(Debug, Clone)]
pub struct PgNoteStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgNoteStore {
    /// Ensure the `notes` table and its owner index exist, then wrap the pool.
    /// Idempotent, so it runs on every start.
    pub async fn init(pool: PgPool, timeout: Duration) -> Result<Self, StoreError> {
        let store = Self { pool, timeout };

        store
            .bounded(async {
                sqlx::query(CREATE_NOTES_TABLE).execute(&store.pool).await?;
                sqlx::query(CREATE_USER_INDEX).execute(&store.pool).await?;
                Ok::<_, sqlx::Error>(())
            })
            .await?;

        tracing::info!("Notes table created or already exists");
        Ok(store)
    }

    /// Same pool, different per-call bound.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn create(&self, note: NewNote) -> Result<Note, StoreError> {
        let now = Utc::now();

        // Commit stays outside the bound. A timeout after COMMIT is sent
        // would report failure for a row that may already be stored.
        let (tx, created) = self
            .bounded(async {
                let mut tx = self.pool.begin().await?;

                let created = sqlx::query_as::<_, Note>(
                    r#"
                    INSERT INTO notes (user_id, title, content, created_at)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, user_id, title, content, created_at
                    "#,
                )
                .bind(note.user_id)
                .bind(&note.title)
                .bind(&note.content)
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;

                Ok::<_, sqlx::Error>((tx, created))
            })
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Note>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, Note>(
                r#"
                SELECT id, user_id, title, content, created_at
                FROM notes
                WHERE user_id = $1
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool),
        )
        .await
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
