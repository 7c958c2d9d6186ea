use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::application::UserApplicationView;
use crate::models::user::UserSummary;
use crate::models::EntityId;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRequest {
    pub cv_data: Value,
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<UserSummary>, AppError> {
    let user = state.store.get_user(id).await?;
    Ok(Json(UserSummary::from(&user)))
}

/// PUT /api/users/:id/cv
pub async fn handle_update_cv(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(req): Json<CvRequest>,
) -> Result<Json<UserSummary>, AppError> {
    if req.cv_data.is_null() {
        return Err(AppError::Validation("cvData is required".to_string()));
    }
    let user = state.store.update_cv(id, req.cv_data).await?;
    Ok(Json(UserSummary::from(&user)))
}

/// GET /api/users/:id/applications
pub async fn handle_user_applications(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Vec<UserApplicationView>>, AppError> {
    Ok(Json(state.store.list_user_applications(id).await?))
}
