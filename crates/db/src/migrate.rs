//! Schema migrator.
//!
//! Scripts are applied in file-name order every time the process starts.
//! There is no applied-migrations table: each script guards itself with
//! `CREATE ... IF NOT EXISTS`, so re-running the whole set is a no-op.

use std::borrow::Cow;
use std::path::Path;

use tracing::info;

use crate::{DbError, DbPool};

/// A single named schema script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// File name, used for ordering and error reporting.
    pub name: Cow<'static, str>,
    /// One or more SQL statements executed as a batch.
    pub sql: Cow<'static, str>,
}

impl Migration {
    pub fn new(name: impl Into<Cow<'static, str>>, sql: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }
}

/// Every script in the workspace `migrations/` directory, compiled into the
/// binary.
///
/// `sqlx::migrate!` only does the embedding here; its ledger-keeping runner is
/// never used.  Names are rebuilt from `<version>_<description>.sql`.
pub fn embedded() -> Vec<Migration> {
    sqlx::migrate!("../../migrations")
        .iter()
        .map(|m| {
            let name = format!("{:04}_{}.sql", m.version, m.description.replace(' ', "_"));
            Migration::new(name, m.sql.clone())
        })
        .collect()
}

/// Load every `*.sql` file in `dir`, sorted by file name.
///
/// Sub-directories and files with other extensions are skipped.
pub fn discover(dir: &Path) -> Result<Vec<Migration>, DbError> {
    let dir_error = |source| DbError::MigrationIo {
        name: dir.display().to_string(),
        source,
    };

    let mut migrations = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(dir_error)? {
        let path = entry.map_err(dir_error)?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("sql") {
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sql = std::fs::read_to_string(&path).map_err(|source| DbError::MigrationIo {
            name: name.clone(),
            source,
        })?;
        migrations.push(Migration::new(name, sql));
    }

    migrations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(migrations)
}

/// Apply `migrations` in ascending name order.
///
/// Stops at the first failing script and reports it by name.  Returns the
/// number of scripts executed.
pub async fn apply(pool: &DbPool, mut migrations: Vec<Migration>) -> Result<usize, DbError> {
    migrations.sort_by(|a, b| a.name.cmp(&b.name));

    for migration in &migrations {
        sqlx::raw_sql(migration.sql.as_ref())
            .execute(pool)
            .await
            .map_err(|source| DbError::Migration {
                name: migration.name.to_string(),
                source,
            })?;
        info!(migration = %migration.name, "applied migration");
    }

    Ok(migrations.len())
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<usize, DbError> {
    info!("Running database migrations");
    apply(pool, embedded()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::create_in_memory_pool;

    async fn table_exists(pool: &DbPool, table: &str) -> bool {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(table)
                .fetch_one(pool)
                .await
                .unwrap();
        count > 0
    }

    #[test]
    fn embedded_scripts_match_the_migrations_directory() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
        let on_disk = discover(&dir).unwrap();
        let built_in = embedded();

        let names = |ms: &[Migration]| ms.iter().map(|m| m.name.to_string()).collect::<Vec<_>>();
        assert_eq!(names(&built_in), names(&on_disk));
        for (built, disk) in built_in.iter().zip(&on_disk) {
            assert_eq!(built.sql, disk.sql, "{} differs from the file on disk", built.name);
        }
    }

    #[tokio::test]
    async fn embedded_migrations_create_schema_and_can_rerun() {
        let pool = create_in_memory_pool().await.unwrap();

        assert_eq!(run_migrations(&pool).await.unwrap(), 3);
        assert_eq!(run_migrations(&pool).await.unwrap(), 3);

        for table in ["repositories", "replication_targets", "executions"] {
            assert!(table_exists(&pool, table).await, "missing table {table}");
        }
    }

    #[tokio::test]
    async fn scripts_run_in_name_order_regardless_of_input_order() {
        let pool = create_in_memory_pool().await.unwrap();
        let migrations = vec![
            Migration::new("0002_index.sql", "CREATE INDEX IF NOT EXISTS idx_a_x ON a (x);"),
            Migration::new("0001_table.sql", "CREATE TABLE IF NOT EXISTS a (x INTEGER);"),
        ];

        assert_eq!(apply(&pool, migrations).await.unwrap(), 2);
        assert!(table_exists(&pool, "a").await);
    }

    #[tokio::test]
    async fn first_failure_halts_and_names_the_script() {
        let pool = create_in_memory_pool().await.unwrap();
        let migrations = vec![
            Migration::new("0001_ok.sql", "CREATE TABLE IF NOT EXISTS a (x INTEGER);"),
            Migration::new("0002_broken.sql", "CREATE TABLEX nope;"),
            Migration::new("0003_never.sql", "CREATE TABLE IF NOT EXISTS c (x INTEGER);"),
        ];

        let err = apply(&pool, migrations).await.unwrap_err();
        match err {
            DbError::Migration { name, .. } => assert_eq!(name, "0002_broken.sql"),
            other => panic!("expected migration error, got {other:?}"),
        }
        assert!(table_exists(&pool, "a").await);
        assert!(!table_exists(&pool, "c").await);
    }

    #[test]
    fn discover_reads_sql_files_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0002_second.sql"), "SELECT 2;").unwrap();
        std::fs::write(dir.path().join("0001_first.sql"), "SELECT 1;").unwrap();
        std::fs::write(dir.path().join("README.txt"), "not a migration").unwrap();
        std::fs::create_dir(dir.path().join("0003_dir.sql")).unwrap();

        let found = discover(dir.path()).unwrap();
        let names: Vec<_> = found.iter().map(|m| m.name.as_ref()).collect();
        assert_eq!(names, ["0001_first.sql", "0002_second.sql"]);
        assert_eq!(found[0].sql, "SELECT 1;");
    }

    #[test]
    fn discover_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover(&missing),
            Err(DbError::MigrationIo { .. })
        ));
    }
}
