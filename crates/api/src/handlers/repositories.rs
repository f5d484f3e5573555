use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use registry::{CreateRepository, Repository};
use serde::Deserialize;

use super::AppState;
use crate::ApiError;

/// Missing fields decode as empty strings so they are reported by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRepositoryDto {
    pub name: String,
    pub source_provider: String,
    pub source_url: String,
}

impl From<CreateRepositoryDto> for CreateRepository {
    fn from(dto: CreateRepositoryDto) -> Self {
        Self {
            name: dto.name,
            source_provider: dto.source_provider,
            source_url: dto.source_url,
        }
    }
}

#[tracing::instrument(name = "create_repository", skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateRepositoryDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Repository>), ApiError> {
    let Json(payload) = payload?;
    let repository = state.repositories.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(repository)))
}

#[tracing::instrument(name = "list_repositories", skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Repository>>, ApiError> {
    let repositories = state.listing.list().await?;
    Ok(Json(repositories))
}
