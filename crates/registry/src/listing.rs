//! Listing Service — repositories joined with their targets.

use db::repository::{repositories as repo_db, targets as target_db};
use db::DbPool;

use crate::{RegistryError, Repository, Target};

/// Read-only view over repositories and their targets.
#[derive(Debug, Clone)]
pub struct ListingService {
    pool: DbPool,
}

impl ListingService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All repositories, newest first, each with its full target list.
    ///
    /// A failure while loading any one repository's targets aborts the whole
    /// listing; callers never see a partial result.
    pub async fn list(&self) -> Result<Vec<Repository>, RegistryError> {
        let rows = repo_db::list_repositories(&self.pool).await?;

        let mut repositories = Vec::with_capacity(rows.len());
        for row in rows {
            let mut repository = Repository::try_from(row)?;
            repository.targets = target_db::list_targets_for_repository(&self.pool, &repository.id)
                .await?
                .into_iter()
                .map(Target::try_from)
                .collect::<Result<_, _>>()?;
            repositories.push(repository);
        }

        Ok(repositories)
    }
}
