pub mod applications;
pub mod auth;
pub mod employers;
pub mod health;
pub mod jobs;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/users/:id", get(users::handle_get_user))
        .route("/api/users/:id/cv", put(users::handle_update_cv))
        .route(
            "/api/users/:id/applications",
            get(users::handle_user_applications),
        )
        // Employers
        .route("/api/employers", post(employers::handle_register_employer))
        .route(
            "/api/employers/:id",
            get(employers::handle_get_employer).patch(employers::handle_update_employer),
        )
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/jobs/search", get(jobs::handle_search_jobs))
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route(
            "/api/jobs/:id/applications",
            get(jobs::handle_job_applications),
        )
        // Applications
        .route("/api/applications", post(applications::handle_apply))
        .route(
            "/api/applications/:id",
            get(applications::handle_get_application),
        )
        .route(
            "/api/applications/:id/status",
            put(applications::handle_set_status),
        )
        .route(
            "/api/applications/:id/viewed",
            post(applications::handle_mark_viewed),
        )
        .with_state(state)
}

/// Rejects a missing or whitespace-only required field.
pub(crate) fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}
