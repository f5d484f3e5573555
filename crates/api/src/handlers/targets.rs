use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use registry::{CreateTarget, Target};
use serde::Deserialize;

use super::AppState;
use crate::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTargetDto {
    pub provider: String,
    pub remote_url: String,
}

impl From<CreateTargetDto> for CreateTarget {
    fn from(dto: CreateTargetDto) -> Self {
        Self {
            provider: dto.provider,
            remote_url: dto.remote_url,
        }
    }
}

#[tracing::instrument(name = "create_target", skip(state, payload))]
pub async fn create(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<CreateTargetDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Target>), ApiError> {
    // An unknown repository wins over a malformed body.
    state.targets.ensure_repository(&id).await?;

    let Json(payload) = payload?;
    let target = state
        .targets
        .create_in_checked_repository(&id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(target)))
}
