//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A UNIQUE (or primary key) constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,

    /// A FOREIGN KEY constraint rejected the write.
    #[error("foreign key constraint violated")]
    ForeignKeyViolation,

    #[error("failed to read migration {name}: {source}")]
    MigrationIo {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute migration {name}: {source}")]
    Migration {
        name: String,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    /// Classify the error returned by an INSERT so callers can tell constraint
    /// rejections apart from I/O failures.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => Self::UniqueViolation,
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                Self::ForeignKeyViolation
            }
            other => Self::Sqlx(other),
        }
    }
}
