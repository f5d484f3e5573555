//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! Provider columns stay plain strings here; the `registry` crate owns the
//! enumerated type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// repositories
// ---------------------------------------------------------------------------

/// A persisted source repository row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RepositoryRow {
    pub id: String,
    pub name: String,
    pub source_provider: String,
    /// Unique across the whole table.
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// replication_targets
// ---------------------------------------------------------------------------

/// A persisted replication target row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TargetRow {
    pub id: String,
    pub repository_id: String,
    pub provider: String,
    /// Unique per `repository_id`.
    pub remote_url: String,
    pub created_at: DateTime<Utc>,
}
