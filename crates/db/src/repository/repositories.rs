//! Source repository operations.

use chrono::Utc;
use uuid::Uuid;

use crate::{models::RepositoryRow, DbError, DbPool};

/// Insert a new repository row with a fresh id and timestamp.
///
/// Returns `DbError::UniqueViolation` when `source_url` is already registered.
pub async fn insert_repository(
    pool: &DbPool,
    name: &str,
    source_provider: &str,
    source_url: &str,
) -> Result<RepositoryRow, DbError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let row = sqlx::query_as::<_, RepositoryRow>(
        r#"
        INSERT INTO repositories (id, name, source_provider, source_url, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, name, source_provider, source_url, created_at
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(source_provider)
    .bind(source_url)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(DbError::from_write)?;

    Ok(row)
}

/// Whether a repository with the given primary key exists.
pub async fn repository_exists(pool: &DbPool, id: &str) -> Result<bool, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM repositories WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Return all repositories ordered by creation time (newest first).
pub async fn list_repositories(pool: &DbPool) -> Result<Vec<RepositoryRow>, DbError> {
    let rows = sqlx::query_as::<_, RepositoryRow>(
        r#"
        SELECT id, name, source_provider, source_url, created_at
        FROM repositories
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
