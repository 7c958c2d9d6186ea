use chrono::{DateTime, Utc};
use tracing::info;

use super::error::StoreError;
use super::events::StoreEvent;
use super::JobStore;
use crate::models::application::ApplicantView;
use crate::models::job::{Job, JobFields, JobPatch, JobStatus};
use crate::models::EntityId;

fn check_salary_range(min: Option<u32>, max: Option<u32>) -> Result<(), StoreError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(StoreError::InvalidSalaryRange { min, max }),
        _ => Ok(()),
    }
}

impl JobStore {
    /// Jobs with status `active`, in posting order.
    pub async fn list_active_jobs(&self) -> Vec<Job> {
        self.snapshot()
            .await
            .jobs
            .iter()
            .filter(|j| j.status == JobStatus::Active)
            .cloned()
            .collect()
    }

    pub async fn get_job(&self, job_id: EntityId) -> Result<Job, StoreError> {
        self.snapshot()
            .await
            .job(job_id)
            .cloned()
            .ok_or(StoreError::JobNotFound(job_id))
    }

    /// Posts a job and bumps the employer's `job_posts` in the same commit.
    pub async fn create_job(&self, employer_id: EntityId, fields: JobFields) -> Result<Job, StoreError> {
        let ttl = self.job_ttl();
        let job = self
            .mutate("create_job", move |txn| {
                check_salary_range(fields.salary_min, fields.salary_max)?;
                let now = txn.now;
                let id = txn.allocate_id();
                let employer = txn
                    .doc
                    .employer_mut(employer_id)
                    .ok_or(StoreError::EmployerNotFound(employer_id))?;
                employer.job_posts += 1;

                let job = Job {
                    id,
                    employer_id,
                    title: fields.title.trim().to_string(),
                    company: employer.company_name.clone(),
                    industry: fields.industry,
                    location: fields.location.trim().to_string(),
                    job_type: fields.job_type,
                    experience: fields.experience,
                    salary_min: fields.salary_min,
                    salary_max: fields.salary_max,
                    work_arrangement: fields.work_arrangement,
                    description: fields.description,
                    requirements: fields.requirements,
                    benefits: fields.benefits,
                    vacancies: fields.vacancies,
                    application_deadline: fields.application_deadline,
                    contact_info: fields.contact_info,
                    status: fields.status.unwrap_or_default(),
                    applications: 0,
                    views: 0,
                    created_at: now,
                    updated_at: now,
                    // An out-of-range TTL leaves the posting without an expiry.
                    expires_at: now.checked_add_signed(ttl),
                };
                txn.doc.jobs.push(job.clone());
                txn.emit(StoreEvent::JobCreated {
                    job_id: id,
                    employer_id,
                });
                Ok(job)
            })
            .await?;

        info!("Employer {employer_id} posted job {}", job.id);
        Ok(job)
    }

    pub async fn update_job(&self, job_id: EntityId, patch: JobPatch) -> Result<Job, StoreError> {
        self.mutate("update_job", move |txn| {
            let now = txn.now;
            let job = txn
                .doc
                .job_mut(job_id)
                .ok_or(StoreError::JobNotFound(job_id))?;
            patch.apply(job);
            check_salary_range(job.salary_min, job.salary_max)?;
            job.updated_at = now;
            let job = job.clone();
            txn.emit(StoreEvent::JobUpdated { job_id });
            Ok(job)
        })
        .await
    }

    /// Removes a job together with its applications and the users'
    /// references to them, and decrements the employer's `job_posts`.
    pub async fn delete_job(&self, job_id: EntityId) -> Result<(), StoreError> {
        let removed = self
            .mutate("delete_job", move |txn| {
                let idx = txn
                    .doc
                    .jobs
                    .iter()
                    .position(|j| j.id == job_id)
                    .ok_or(StoreError::JobNotFound(job_id))?;
                let job = txn.doc.jobs.remove(idx);

                if let Some(employer) = txn.doc.employer_mut(job.employer_id) {
                    employer.job_posts = employer.job_posts.saturating_sub(1);
                }

                let before = txn.doc.applications.len();
                txn.doc.applications.retain(|a| a.job_id != job_id);
                let removed = before - txn.doc.applications.len();
                for user in txn.doc.users.iter_mut() {
                    user.applications.retain(|r| r.job_id != job_id);
                }

                txn.emit(StoreEvent::JobDeleted {
                    job_id,
                    employer_id: job.employer_id,
                    removed_applications: removed,
                });
                Ok(removed)
            })
            .await?;

        info!("Deleted job {job_id} ({removed} applications removed)");
        Ok(())
    }

    pub async fn record_job_view(&self, job_id: EntityId) -> Result<Job, StoreError> {
        self.mutate("record_job_view", move |txn| {
            let job = txn
                .doc
                .job_mut(job_id)
                .ok_or(StoreError::JobNotFound(job_id))?;
            job.views += 1;
            Ok(job.clone())
        })
        .await
    }

    /// Marks active jobs whose `expires_at` is before `now` as expired and
    /// returns how many changed.
    pub async fn expire_overdue_jobs(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let is_overdue =
            move |j: &Job| j.status == JobStatus::Active && j.expires_at.is_some_and(|at| at < now);

        if !self.snapshot().await.jobs.iter().any(is_overdue) {
            return Ok(0);
        }

        let expired = self
            .mutate("expire_overdue_jobs", move |txn| {
                let stamp = txn.now;
                let mut job_ids = Vec::new();
                for job in txn.doc.jobs.iter_mut().filter(|j| is_overdue(j)) {
                    job.status = JobStatus::Expired;
                    job.updated_at = stamp;
                    job_ids.push(job.id);
                }
                let count = job_ids.len();
                if count > 0 {
                    txn.emit(StoreEvent::JobsExpired { job_ids });
                }
                Ok(count)
            })
            .await?;

        info!("Expired {expired} overdue jobs");
        Ok(expired)
    }

    /// Applications to one job in the order they arrived, with applicant
    /// contact details.
    pub async fn list_job_applications(
        &self,
        job_id: EntityId,
    ) -> Result<Vec<ApplicantView>, StoreError> {
        let snapshot = self.snapshot().await;
        if snapshot.job(job_id).is_none() {
            return Err(StoreError::JobNotFound(job_id));
        }

        Ok(snapshot
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .filter_map(|a| {
                let user = snapshot.user(a.user_id)?;
                Some(ApplicantView {
                    application: a.clone(),
                    applicant_name: user.name.clone(),
                    applicant_email: user.email.clone(),
                    applicant_phone: user.phone.clone(),
                })
            })
            .collect())
    }
}
