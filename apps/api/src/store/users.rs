use serde_json::Value;
use tracing::info;

use super::error::{PersistenceError, StoreError};
use super::events::StoreEvent;
use super::password::{hash_password, verify_password};
use super::JobStore;
use crate::models::application::UserApplicationView;
use crate::models::user::User;
use crate::models::EntityId;

/// Emails compare case-insensitively and are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_phone(phone: &str) -> String {
    phone.trim().to_string()
}

impl JobStore {
    /// Registers a job seeker. Email and phone must both be unused.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password_plain: &str,
    ) -> Result<User, StoreError> {
        let email = normalize_email(email);
        let phone = normalize_phone(phone);

        // Cheap rejection before spending time on the hash. The check is
        // repeated under the writer lock.
        check_unique(&self.snapshot().await.users, &email, &phone)?;

        let plain = password_plain.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| PersistenceError::Hash(e.to_string()))??;

        let name = name.trim().to_string();
        let user = self
            .mutate("register_user", move |txn| {
                check_unique(&txn.doc.users, &email, &phone)?;
                let user = User {
                    id: txn.allocate_id(),
                    name,
                    email,
                    phone,
                    password_hash,
                    has_cv: false,
                    cv_data: None,
                    cv_updated_at: None,
                    applications: Vec::new(),
                    verified: false,
                    created_at: txn.now,
                };
                txn.doc.users.push(user.clone());
                txn.emit(StoreEvent::UserRegistered { user_id: user.id });
                Ok(user)
            })
            .await?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// `identifier` is either the email or the phone number. An email match
    /// wins over a phone match.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password_plain: &str,
    ) -> Result<User, StoreError> {
        let identifier = identifier.trim();
        let email = normalize_email(identifier);
        let snapshot = self.snapshot().await;
        let user = snapshot
            .users
            .iter()
            .find(|u| u.email == email)
            .or_else(|| snapshot.users.iter().find(|u| u.phone == identifier))
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;
        drop(snapshot);

        let plain = password_plain.to_string();
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&plain, &stored))
            .await
            .map_err(|e| PersistenceError::Hash(e.to_string()))?;

        if valid {
            Ok(user)
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    pub async fn get_user(&self, user_id: EntityId) -> Result<User, StoreError> {
        self.snapshot()
            .await
            .user(user_id)
            .cloned()
            .ok_or(StoreError::UserNotFound(user_id))
    }

    /// Stores the CV payload and marks the user as able to apply.
    pub async fn update_cv(&self, user_id: EntityId, cv_data: Value) -> Result<User, StoreError> {
        let user = self
            .mutate("update_cv", move |txn| {
                let now = txn.now;
                let user = txn
                    .doc
                    .user_mut(user_id)
                    .ok_or(StoreError::UserNotFound(user_id))?;
                user.cv_data = Some(cv_data);
                user.has_cv = true;
                user.cv_updated_at = Some(now);
                let user = user.clone();
                txn.emit(StoreEvent::CvUpdated { user_id });
                Ok(user)
            })
            .await?;

        info!("Updated CV for user {user_id}");
        Ok(user)
    }

    /// The user's applications, newest first, joined with job details.
    pub async fn list_user_applications(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<UserApplicationView>, StoreError> {
        let snapshot = self.snapshot().await;
        if snapshot.user(user_id).is_none() {
            return Err(StoreError::UserNotFound(user_id));
        }

        let mut views: Vec<UserApplicationView> = snapshot
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| {
                let job = snapshot.job(a.job_id);
                UserApplicationView {
                    application: a.clone(),
                    job_title: job.map(|j| j.title.clone()),
                    company: job.map(|j| j.company.clone()),
                    job_type: job.map(|j| j.job_type.clone()),
                }
            })
            .collect();
        views.sort_by(|a, b| {
            b.application
                .applied_at
                .cmp(&a.application.applied_at)
                .then(b.application.id.cmp(&a.application.id))
        });
        Ok(views)
    }
}

/// Email and phone share one login namespace, so each is checked against
/// both stored fields.
fn check_unique(users: &[User], email: &str, phone: &str) -> Result<(), StoreError> {
    if users
        .iter()
        .any(|u| u.email == email || normalize_email(&u.phone) == email)
    {
        return Err(StoreError::DuplicateEmail(email.to_string()));
    }
    let phone_as_email = normalize_email(phone);
    if users
        .iter()
        .any(|u| u.phone == phone || u.email == phone_as_email)
    {
        return Err(StoreError::DuplicatePhone(phone.to_string()));
    }
    Ok(())
}
