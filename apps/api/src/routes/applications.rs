use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::EntityId;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: EntityId,
    pub user_id: EntityId,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: ApplicationStatus,
    pub feedback: Option<String>,
}

/// POST /api/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<Application>, AppError> {
    Ok(Json(state.store.apply_to_job(req.job_id, req.user_id).await?))
}

/// GET /api/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Application>, AppError> {
    Ok(Json(state.store.get_application(id).await?))
}

/// PUT /api/applications/:id/status
pub async fn handle_set_status(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Application>, AppError> {
    Ok(Json(
        state
            .store
            .set_application_status(id, req.status, req.feedback)
            .await?,
    ))
}

/// POST /api/applications/:id/viewed
pub async fn handle_mark_viewed(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Application>, AppError> {
    Ok(Json(state.store.mark_application_viewed(id).await?))
}
