use async_trait::async_trait;
use chrono::{DateTime, Utc};
use errors::StoreError;
use notes_core::{Note, NoteStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, Pool, Postgres};
use std::time::Duration;

const BACKEND: &str = "postgres";

#[derive(Debug, FromRow)]
struct NoteRow {
    id: i64,
    title: String,
    content: String,
    creation_date: DateTime<Utc>,
    last_mod_date: DateTime<Utc>
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            creation_date: row.creation_date,
            last_mod_date: row.last_mod_date
        }
    }
}

/// Maps a driver error onto the store taxonomy. `title` names the row the
/// statement was writing, for the unique-violation case.
fn map_sqlx_error(err: sqlx::Error, title: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::duplicate(BACKEND, title)
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::connection(BACKEND, err.to_string()),
        _ => StoreError::query(BACKEND, err.to_string())
    }
}

pub struct PostgresNoteStore {
    pool: Pool<Postgres>
}

impl PostgresNoteStore {
    pub async fn new(connection_url: &str) -> Result<Self, StoreError> {
        Self::connect(connection_url, 10, 30).await
    }

    pub async fn connect(
        connection_url: &str,
        max_connections: u32,
        timeout_seconds: u64
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(timeout_seconds))
            .connect(connection_url)
            .await
            .map_err(|e| StoreError::connection(BACKEND, e.to_string()))?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn with_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Creates the `notes` table. The unique constraint on `title` is the
    /// authoritative uniqueness guard.
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS notes (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                creation_date TIMESTAMPTZ NOT NULL DEFAULT now(),
                last_mod_date TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT notes_title_key UNIQUE (title)
            )"
        )
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, ""))?;

        tracing::debug!("Notes schema initialized");
        Ok(())
    }
}

#[async_trait]
impl NoteStore for PostgresNoteStore {
    async fn find_by_title_contains(&self, fragment: &str) -> Result<Vec<Note>, StoreError> {
        let rows: Vec<NoteRow> = sqlx::query_as(
            "SELECT id, title, content, creation_date, last_mod_date
             FROM notes
             WHERE strpos(lower(title), lower($1)) > 0
             ORDER BY id"
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, fragment))?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn find_by_title_exact(&self, title: &str) -> Result<Option<Note>, StoreError> {
        let row: Option<NoteRow> = sqlx::query_as(
            "SELECT id, title, content, creation_date, last_mod_date
             FROM notes WHERE title = $1"
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, title))?;

        Ok(row.map(Note::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let row: Option<NoteRow> = sqlx::query_as(
            "SELECT id, title, content, creation_date, last_mod_date
             FROM notes WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, ""))?;

        Ok(row.map(Note::from))
    }

    async fn insert(&self, title: &str, content: &str) -> Result<Note, StoreError> {
        let row: NoteRow = sqlx::query_as(
            "INSERT INTO notes (title, content)
             VALUES ($1, $2)
             RETURNING id, title, content, creation_date, last_mod_date"
        )
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, title))?;

        tracing::trace!(id = row.id, "Inserted note");
        Ok(row.into())
    }

    async fn replace(&self, note: &Note) -> Result<Note, StoreError> {
        let row: Option<NoteRow> = sqlx::query_as(
            "UPDATE notes
             SET title = $2, content = $3, last_mod_date = now()
             WHERE id = $1
             RETURNING id, title, content, creation_date, last_mod_date"
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &note.title))?;

        row.map(Note::from)
            .ok_or_else(|| StoreError::not_found(BACKEND, note.id.to_string()))
    }

    async fn delete_by_title_exact(&self, title: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE title = $1")
            .bind(title)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, title))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(BACKEND, title));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::connection(BACKEND, e.to_string()))?;
        Ok(())
    }
}
