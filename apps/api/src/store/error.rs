use thiserror::Error;

use crate::models::application::ApplicationStatus;
use crate::models::EntityId;

/// Failure reading or writing the persisted document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Every way a JobStore operation can fail. A failed operation leaves no
/// trace in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User {0} not found")]
    UserNotFound(EntityId),

    #[error("Job {0} not found")]
    JobNotFound(EntityId),

    #[error("Employer {0} not found")]
    EmployerNotFound(EntityId),

    #[error("Application {0} not found")]
    ApplicationNotFound(EntityId),

    #[error("Email {0} is already registered")]
    DuplicateEmail(String),

    #[error("Phone number {0} is already registered")]
    DuplicatePhone(String),

    #[error("User {user_id} has already applied to job {job_id}")]
    DuplicateApplication { user_id: EntityId, job_id: EntityId },

    #[error("User {0} must create a CV before applying")]
    MissingCv(EntityId),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Cannot move application from {from} to {to}")]
    InvalidStatusTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("salaryMin ({min}) exceeds salaryMax ({max})")]
    InvalidSalaryRange { min: u32, max: u32 },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
}
