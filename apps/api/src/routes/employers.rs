use axum::{
    extract::{Path, State},
    Json,
};

use super::require;
use crate::errors::AppError;
use crate::models::employer::{Employer, EmployerPatch, EmployerProfile};
use crate::models::EntityId;
use crate::state::AppState;

/// POST /api/employers
pub async fn handle_register_employer(
    State(state): State<AppState>,
    Json(profile): Json<EmployerProfile>,
) -> Result<Json<Employer>, AppError> {
    require("companyName", &profile.company_name)?;
    require("email", &profile.email)?;
    require("phone", &profile.phone)?;
    Ok(Json(state.store.register_employer(profile).await?))
}

/// GET /api/employers/:id
pub async fn handle_get_employer(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Employer>, AppError> {
    Ok(Json(state.store.get_employer(id).await?))
}

/// PATCH /api/employers/:id
pub async fn handle_update_employer(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<EmployerPatch>,
) -> Result<Json<Employer>, AppError> {
    if let Some(name) = &patch.company_name {
        require("companyName", name)?;
    }
    Ok(Json(state.store.update_employer(id, patch).await?))
}
