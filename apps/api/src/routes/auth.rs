use axum::{extract::State, Json};
use serde::Deserialize;

use super::require;
use crate::errors::AppError;
use crate::models::user::UserSummary;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Clients send exactly one of `identifier`, `email` or `phone`. Each holds
/// an email address or a phone number.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

impl LoginRequest {
    fn login_identifier(&self) -> Result<&str, AppError> {
        let mut given = [&self.identifier, &self.email, &self.phone]
            .into_iter()
            .flatten()
            .map(String::as_str);
        match (given.next(), given.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(AppError::Validation("identifier is required".into())),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "send only one of identifier, email or phone".into(),
            )),
        }
    }
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserSummary>, AppError> {
    require("name", &req.name)?;
    require("email", &req.email)?;
    require("phone", &req.phone)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = state
        .store
        .register_user(&req.name, &req.email, &req.phone, &req.password)
        .await?;
    Ok(Json(UserSummary::from(&user)))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserSummary>, AppError> {
    let identifier = req.login_identifier()?;
    require("identifier", identifier)?;
    let user = state.store.authenticate(identifier, &req.password).await?;
    Ok(Json(UserSummary::from(&user)))
}
