//! Target Registrar — attaches replication targets to existing repositories.

use tracing::{info, warn};

use db::repository::{repositories as repo_db, targets as target_db};
use db::{DbError, DbPool};

use crate::{validation::validate_target, CreateTarget, RegistryError, Target};

/// Creates replication target records scoped to a repository.
#[derive(Debug, Clone)]
pub struct TargetRegistrar {
    pool: DbPool,
}

impl TargetRegistrar {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fail with [`RegistryError::NotFound`] unless `repository_id` exists.
    ///
    /// Callers run this before decoding or validating the payload so an
    /// unknown repository is reported the same way whatever the body holds.
    pub async fn ensure_repository(&self, repository_id: &str) -> Result<(), RegistryError> {
        if repo_db::repository_exists(&self.pool, repository_id).await? {
            Ok(())
        } else {
            Err(RegistryError::NotFound("repository"))
        }
    }

    /// Validate `input` and persist it as a new target of `repository_id`.
    pub async fn create(
        &self,
        repository_id: &str,
        input: CreateTarget,
    ) -> Result<Target, RegistryError> {
        self.ensure_repository(repository_id).await?;
        self.create_in_checked_repository(repository_id, input).await
    }

    /// Like [`Self::create`] for callers that already ran
    /// [`Self::ensure_repository`].  The foreign key still turns a missing
    /// parent into [`RegistryError::NotFound`].
    pub async fn create_in_checked_repository(
        &self,
        repository_id: &str,
        input: CreateTarget,
    ) -> Result<Target, RegistryError> {
        let provider = validate_target(&input)?;

        let row = target_db::insert_target(
            &self.pool,
            repository_id,
            provider.as_str(),
            &input.remote_url,
        )
        .await
        .map_err(|err| match err {
            DbError::UniqueViolation => {
                warn!(repository_id, remote_url = %input.remote_url, "target already registered");
                RegistryError::Conflict(
                    "target with this remote_url already exists for this repository".into(),
                )
            }
            // The parent disappeared between the existence check and the insert.
            DbError::ForeignKeyViolation => RegistryError::NotFound("repository"),
            other => RegistryError::Store(other),
        })?;

        info!(target_id = %row.id, repository_id, "replication target created");
        Target::try_from(row)
    }
}
