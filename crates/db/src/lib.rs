//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, the schema migrator, typed row structs, and
//! repository functions for every table in the gitsync schema.  No business
//! logic lives here.

pub mod error;
pub mod migrate;
pub mod pool;
pub mod repository;
pub mod models;

pub use pool::DbPool;
pub use error::DbError;
