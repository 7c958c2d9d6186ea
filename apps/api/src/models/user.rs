use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EntityId;

/// A job seeker as persisted in the `users` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Argon2 PHC string. Never leaves the store layer.
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(rename = "hasCV")]
    pub has_cv: bool,
    #[serde(default)]
    pub cv_data: Option<Value>,
    #[serde(default)]
    pub cv_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applications: Vec<UserApplicationRef>,
    #[serde(default)]
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Back-reference from a user to one of their applications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationRef {
    pub job_id: EntityId,
    pub application_id: EntityId,
    pub applied_at: DateTime<Utc>,
}

/// The public projection of a user returned by register/login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "hasCV")]
    pub has_cv: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            has_cv: user.has_cv,
        }
    }
}
