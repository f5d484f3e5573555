//! Replication target operations.

use chrono::Utc;
use uuid::Uuid;

use crate::{models::TargetRow, DbError, DbPool};

/// Insert a new target under `repository_id`.
///
/// Returns `DbError::UniqueViolation` when the repository already has a target
/// with this `remote_url`, and `DbError::ForeignKeyViolation` when the parent
/// repository does not exist.
pub async fn insert_target(
    pool: &DbPool,
    repository_id: &str,
    provider: &str,
    remote_url: &str,
) -> Result<TargetRow, DbError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let row = sqlx::query_as::<_, TargetRow>(
        r#"
        INSERT INTO replication_targets (id, repository_id, provider, remote_url, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, repository_id, provider, remote_url, created_at
        "#,
    )
    .bind(&id)
    .bind(repository_id)
    .bind(provider)
    .bind(remote_url)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(DbError::from_write)?;

    Ok(row)
}

/// Return the targets of one repository, oldest first.
pub async fn list_targets_for_repository(
    pool: &DbPool,
    repository_id: &str,
) -> Result<Vec<TargetRow>, DbError> {
    let rows = sqlx::query_as::<_, TargetRow>(
        r#"
        SELECT id, repository_id, provider, remote_url, created_at
        FROM replication_targets
        WHERE repository_id = ?1
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(repository_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
