//! Repository Registrar — validates and records source repositories.

use tracing::{info, warn};

use db::repository::repositories as repo_db;
use db::{DbError, DbPool};

use crate::{validation::validate_repository, CreateRepository, RegistryError, Repository};

/// Creates repository records.  Holds nothing but a handle to the shared pool.
#[derive(Debug, Clone)]
pub struct RepositoryRegistrar {
    pool: DbPool,
}

impl RepositoryRegistrar {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate `input` and persist it as a new repository.
    ///
    /// `source_url` uniqueness is enforced by the store; a duplicate surfaces
    /// as [`RegistryError::Conflict`] even when two identical requests race.
    pub async fn create(&self, input: CreateRepository) -> Result<Repository, RegistryError> {
        let provider = validate_repository(&input)?;

        let row = repo_db::insert_repository(
            &self.pool,
            &input.name,
            provider.as_str(),
            &input.source_url,
        )
        .await
        .map_err(|err| match err {
            DbError::UniqueViolation => {
                warn!(source_url = %input.source_url, "repository already registered");
                RegistryError::Conflict("repository with this source_url already exists".into())
            }
            other => RegistryError::Store(other),
        })?;

        info!(repository_id = %row.id, source_url = %row.source_url, "repository created");
        Repository::try_from(row)
    }
}
