use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("record store query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// One persisted grade row. The primary key is store-assigned at insert time
/// and immutable; rows are append-only (no update path exists).
#[derive(Debug, Clone, FromRow)]
pub struct GradeRow {
    pub id: Uuid,
    pub student_id: String,
    pub course_id: String,
    pub score: f64,
    pub weight: i32,
}

/// Process-wide handle to the grades table.
///
/// The pool is created lazily on first use: the cell serializes concurrent
/// first requests, a failed connect leaves it unset and is retried
/// transparently on the next access. No backoff, no circuit breaker, so any
/// operation may independently fail or succeed under flaky connectivity.
pub struct RecordStore {
    database_url: String,
    insert_sql: String,
    select_sql: String,
    pool: OnceCell<PgPool>,
}

impl RecordStore {
    pub fn new(database_url: impl Into<String>, table: &str) -> Self {
        Self {
            database_url: database_url.into(),
            insert_sql: format!(
                "INSERT INTO {table} (id, student_id, course_id, score, weight) \
                 VALUES ($1, $2, $3, $4, $5)"
            ),
            select_sql: format!(
                "SELECT id, student_id, course_id, score, weight \
                 FROM {table} WHERE student_id = $1"
            ),
            pool: OnceCell::new(),
        }
    }

    async fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                match PgPoolOptions::new()
                    .max_connections(5)
                    .connect(&self.database_url)
                    .await
                {
                    Ok(pool) => {
                        info!("record store connected");
                        Ok(pool)
                    }
                    Err(err) => {
                        warn!(error = %err, "record store connect failed; will retry on next access");
                        Err(StoreError::Unavailable(err.to_string()))
                    }
                }
            })
            .await
    }

    /// Insert one record, returning the store-generated identifier.
    pub async fn insert(
        &self,
        student_id: &str,
        course_id: &str,
        score: f64,
        weight: i32,
    ) -> Result<Uuid, StoreError> {
        let pool = self.pool().await?;
        let id = Uuid::new_v4();
        sqlx::query(&self.insert_sql)
            .bind(id)
            .bind(student_id)
            .bind(course_id)
            .bind(score)
            .bind(weight)
            .execute(pool)
            .await?;
        Ok(id)
    }

    /// All rows for one student. No ordering guarantee, no limit.
    pub async fn find_by_student(&self, student_id: &str) -> Result<Vec<GradeRow>, StoreError> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, GradeRow>(&self.select_sql)
            .bind(student_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
