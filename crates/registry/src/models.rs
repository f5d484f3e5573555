//! Domain records returned by the registry services and the commands that
//! create them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use db::models::{RepositoryRow, TargetRow};

use crate::{Provider, RegistryError};

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// A registered source repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub source_provider: Provider,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
    /// Omitted from JSON when the repository has no targets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,
}

impl TryFrom<RepositoryRow> for Repository {
    type Error = RegistryError;

    fn try_from(row: RepositoryRow) -> Result<Self, Self::Error> {
        let source_provider = row.source_provider.parse::<Provider>().map_err(|e| {
            RegistryError::CorruptRecord(format!("repository {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            source_provider,
            source_url: row.source_url,
            created_at: row.created_at,
            targets: Vec::new(),
        })
    }
}

/// Input for [`crate::RepositoryRegistrar::create`].  Fields are raw and
/// unvalidated.
#[derive(Debug, Clone, Default)]
pub struct CreateRepository {
    pub name: String,
    pub source_provider: String,
    pub source_url: String,
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// A replication destination attached to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub id: String,
    pub repository_id: String,
    pub provider: Provider,
    pub remote_url: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TargetRow> for Target {
    type Error = RegistryError;

    fn try_from(row: TargetRow) -> Result<Self, Self::Error> {
        let provider = row
            .provider
            .parse::<Provider>()
            .map_err(|e| RegistryError::CorruptRecord(format!("target {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            repository_id: row.repository_id,
            provider,
            remote_url: row.remote_url,
            created_at: row.created_at,
        })
    }
}

/// Input for [`crate::TargetRegistrar::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateTarget {
    pub provider: String,
    pub remote_url: String,
}
