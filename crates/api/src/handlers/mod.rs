//! Route handlers and the state they share.

pub mod repositories;
pub mod targets;

use axum::Json;
use serde_json::{json, Value};

use db::DbPool;
use registry::{ListingService, RepositoryRegistrar, TargetRegistrar};

/// Services composed at the routing boundary.  They share only the pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub repositories: RepositoryRegistrar,
    pub targets: TargetRegistrar,
    pub listing: ListingService,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            repositories: RepositoryRegistrar::new(pool.clone()),
            targets: TargetRegistrar::new(pool.clone()),
            listing: ListingService::new(pool),
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
