use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Status only moves forward; `accepted` and `rejected` are final.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Reviewing)
                | (Pending, Accepted)
                | (Pending, Rejected)
                | (Reviewing, Accepted)
                | (Reviewing, Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: EntityId,
    pub job_id: EntityId,
    pub user_id: EntityId,
    pub employer_id: EntityId,
    pub status: ApplicationStatus,
    pub employer_viewed: bool,
    #[serde(default)]
    pub feedback: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An application joined with the job it targets, as shown to the applicant.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_type: Option<String>,
}

/// An application joined with the applicant, as shown to the employer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantView {
    #[serde(flatten)]
    pub application: Application,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
}
