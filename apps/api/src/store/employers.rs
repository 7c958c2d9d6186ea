use tracing::info;

use super::error::StoreError;
use super::events::StoreEvent;
use super::users::normalize_email;
use super::JobStore;
use crate::models::employer::{Employer, EmployerPatch, EmployerProfile};
use crate::models::EntityId;

impl JobStore {
    /// New employers start unverified and active with no postings.
    pub async fn register_employer(&self, profile: EmployerProfile) -> Result<Employer, StoreError> {
        let email = normalize_email(&profile.email);
        let employer = self
            .mutate("register_employer", move |txn| {
                if txn.doc.employers.iter().any(|e| e.email == email) {
                    return Err(StoreError::DuplicateEmail(email));
                }
                let employer = Employer {
                    id: txn.allocate_id(),
                    company_name: profile.company_name.trim().to_string(),
                    email,
                    phone: profile.phone.trim().to_string(),
                    address: profile.address,
                    tax_code: profile.tax_code,
                    contact_person: profile.contact_person,
                    position: profile.position,
                    industry: profile.industry,
                    is_verified: false,
                    is_active: true,
                    job_posts: 0,
                    created_at: txn.now,
                    last_login: None,
                    updated_at: None,
                };
                txn.doc.employers.push(employer.clone());
                txn.emit(StoreEvent::EmployerRegistered {
                    employer_id: employer.id,
                });
                Ok(employer)
            })
            .await?;

        info!("Registered employer {}", employer.id);
        Ok(employer)
    }

    pub async fn get_employer(&self, employer_id: EntityId) -> Result<Employer, StoreError> {
        self.snapshot()
            .await
            .employer(employer_id)
            .cloned()
            .ok_or(StoreError::EmployerNotFound(employer_id))
    }

    /// Updates profile fields. A new company name is not copied onto jobs
    /// that were already posted.
    pub async fn update_employer(
        &self,
        employer_id: EntityId,
        patch: EmployerPatch,
    ) -> Result<Employer, StoreError> {
        self.mutate("update_employer", move |txn| {
            let now = txn.now;
            let employer = txn
                .doc
                .employer_mut(employer_id)
                .ok_or(StoreError::EmployerNotFound(employer_id))?;
            patch.apply(employer);
            employer.updated_at = Some(now);
            Ok(employer.clone())
        })
        .await
    }
}
