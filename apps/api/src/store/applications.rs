use tracing::info;

use super::error::StoreError;
use super::events::StoreEvent;
use super::JobStore;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::user::UserApplicationRef;
use crate::models::EntityId;

impl JobStore {
    /// Submits a user's application to a job.
    ///
    /// Checks run in order: job exists, user exists, user has a CV, no
    /// earlier application for the same pair. On success the job's
    /// `applications` counter and the user's reference list change in the
    /// same commit as the new row.
    pub async fn apply_to_job(
        &self,
        job_id: EntityId,
        user_id: EntityId,
    ) -> Result<Application, StoreError> {
        let application = self
            .mutate("apply_to_job", move |txn| {
                let employer_id = txn
                    .doc
                    .job(job_id)
                    .ok_or(StoreError::JobNotFound(job_id))?
                    .employer_id;
                let user = txn
                    .doc
                    .user(user_id)
                    .ok_or(StoreError::UserNotFound(user_id))?;
                if !user.has_cv {
                    return Err(StoreError::MissingCv(user_id));
                }
                if txn
                    .doc
                    .applications
                    .iter()
                    .any(|a| a.job_id == job_id && a.user_id == user_id)
                {
                    return Err(StoreError::DuplicateApplication { user_id, job_id });
                }

                let now = txn.now;
                let application = Application {
                    id: txn.allocate_id(),
                    job_id,
                    user_id,
                    employer_id,
                    status: ApplicationStatus::Pending,
                    employer_viewed: false,
                    feedback: String::new(),
                    applied_at: now,
                    updated_at: now,
                };
                txn.doc.applications.push(application.clone());

                if let Some(job) = txn.doc.job_mut(job_id) {
                    job.applications += 1;
                }
                if let Some(user) = txn.doc.user_mut(user_id) {
                    user.applications.push(UserApplicationRef {
                        job_id,
                        application_id: application.id,
                        applied_at: now,
                    });
                }

                txn.emit(StoreEvent::ApplicationSubmitted {
                    application_id: application.id,
                    job_id,
                    user_id,
                });
                Ok(application)
            })
            .await?;

        info!(
            "User {user_id} applied to job {job_id} (application {})",
            application.id
        );
        Ok(application)
    }

    pub async fn get_application(&self, application_id: EntityId) -> Result<Application, StoreError> {
        self.snapshot()
            .await
            .application(application_id)
            .cloned()
            .ok_or(StoreError::ApplicationNotFound(application_id))
    }

    /// Moves an application forward. `feedback`, when given, replaces the
    /// stored feedback.
    pub async fn set_application_status(
        &self,
        application_id: EntityId,
        status: ApplicationStatus,
        feedback: Option<String>,
    ) -> Result<Application, StoreError> {
        let (application, from) = self
            .mutate("set_application_status", move |txn| {
                let now = txn.now;
                let application = txn
                    .doc
                    .application_mut(application_id)
                    .ok_or(StoreError::ApplicationNotFound(application_id))?;
                let from = application.status;
                if !from.can_transition_to(status) {
                    return Err(StoreError::InvalidStatusTransition { from, to: status });
                }
                application.status = status;
                if let Some(feedback) = feedback {
                    application.feedback = feedback;
                }
                application.updated_at = now;
                let application = application.clone();

                txn.emit(StoreEvent::ApplicationStatusChanged {
                    application_id,
                    from,
                    to: status,
                });
                Ok((application, from))
            })
            .await?;

        info!("Application {application_id}: {from} -> {status}");
        Ok(application)
    }

    /// Records that the employer opened the applicant's CV.
    pub async fn mark_application_viewed(
        &self,
        application_id: EntityId,
    ) -> Result<Application, StoreError> {
        self.mutate("mark_application_viewed", move |txn| {
            let now = txn.now;
            let application = txn
                .doc
                .application_mut(application_id)
                .ok_or(StoreError::ApplicationNotFound(application_id))?;
            let first_view = !application.employer_viewed;
            application.employer_viewed = true;
            application.updated_at = now;
            let application = application.clone();
            if first_view {
                txn.emit(StoreEvent::ApplicationViewed { application_id });
            }
            Ok(application)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::fixtures::*;
    use super::*;
    use crate::models::application::ApplicationStatus::*;

    #[tokio::test]
    async fn test_apply_creates_pending_application_and_counts() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;

        let app = store.apply_to_job(j.id, u.id).await.unwrap();
        assert_eq!(app.status, Pending);
        assert_eq!(app.employer_id, e.id);
        assert!(!app.employer_viewed);

        let doc = store.snapshot().await;
        assert_eq!(doc.job(j.id).unwrap().applications, 1);
        let refs = &doc.user(u.id).unwrap().applications;
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].application_id, app.id);
    }

    #[tokio::test]
    async fn test_second_application_is_duplicate_and_counter_unchanged() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;
        store.apply_to_job(j.id, u.id).await.unwrap();

        let err = store.apply_to_job(j.id, u.id).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateApplication { .. }));
        let doc = store.snapshot().await;
        assert_eq!(doc.job(j.id).unwrap().applications, 1);
        assert_eq!(doc.applications.len(), 1);
        assert_eq!(doc.user(u.id).unwrap().applications.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_cv_leaves_state_untouched() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, false).await;
        let before = store.snapshot().await;

        let err = store.apply_to_job(j.id, u.id).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingCv(id) if id == u.id));
        assert_eq!(*store.snapshot().await, *before);
    }

    #[tokio::test]
    async fn test_apply_unknown_job_or_user() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;

        assert!(matches!(
            store.apply_to_job(999, u.id).await,
            Err(StoreError::JobNotFound(999))
        ));
        assert!(matches!(
            store.apply_to_job(j.id, 999).await,
            Err(StoreError::UserNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_apply_fails_cleanly_when_write_fails() {
        let seeded = memory_store().await;
        let e = employer(&seeded).await;
        let j = job(&seeded, e.id, "Frontend").await;
        let u = user(&seeded, 1, true).await;
        let doc = (*seeded.snapshot().await).clone();

        let store = JobStore::open(Arc::new(ReadOnlyBackend {
            initial: Some(doc.clone()),
        }))
        .await
        .unwrap();
        assert!(matches!(
            store.apply_to_job(j.id, u.id).await,
            Err(StoreError::Persistence(_))
        ));
        assert_eq!(*store.snapshot().await, doc);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_applications_single_winner() {
        let store = Arc::new(memory_store().await);
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;
        let (job_id, user_id) = (j.id, u.id);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.apply_to_job(job_id, user_id).await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StoreError::DuplicateApplication { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.get_job(j.id).await.unwrap().applications, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_distinct_applicants_all_counted() {
        let store = Arc::new(memory_store().await);
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let mut users = Vec::new();
        for n in 0..10 {
            users.push(user(&store, n, true).await);
        }

        let mut handles = Vec::new();
        for u in &users {
            // Each applicant tries twice.
            for _ in 0..2 {
                let store = Arc::clone(&store);
                let (job_id, user_id) = (j.id, u.id);
                handles.push(tokio::spawn(async move {
                    store.apply_to_job(job_id, user_id).await.is_ok()
                }));
            }
        }
        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap() {
                ok += 1;
            }
        }

        assert_eq!(ok, users.len());
        let doc = store.snapshot().await;
        assert_eq!(doc.job(j.id).unwrap().applications as usize, users.len());
        assert_eq!(doc.applications.len(), users.len());
    }

    #[tokio::test]
    async fn test_accepted_is_final() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;
        let app = store.apply_to_job(j.id, u.id).await.unwrap();

        store
            .set_application_status(app.id, Accepted, Some("Welcome aboard".to_string()))
            .await
            .unwrap();
        let err = store
            .set_application_status(app.id, Rejected, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidStatusTransition {
                from: Accepted,
                to: Rejected
            }
        ));

        let stored = store.get_application(app.id).await.unwrap();
        assert_eq!(stored.status, Accepted);
        assert_eq!(stored.feedback, "Welcome aboard");
    }

    #[tokio::test]
    async fn test_reviewing_then_rejected_keeps_feedback_when_absent() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;
        let app = store.apply_to_job(j.id, u.id).await.unwrap();

        store
            .set_application_status(app.id, Reviewing, Some("Shortlisted".to_string()))
            .await
            .unwrap();
        let rejected = store
            .set_application_status(app.id, Rejected, None)
            .await
            .unwrap();
        assert_eq!(rejected.status, Rejected);
        assert_eq!(rejected.feedback, "Shortlisted");
        assert!(matches!(
            store.set_application_status(app.id, Pending, None).await,
            Err(StoreError::InvalidStatusTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_status_of_unknown_application() {
        let store = memory_store().await;
        assert!(matches!(
            store.set_application_status(12, Reviewing, None).await,
            Err(StoreError::ApplicationNotFound(12))
        ));
    }

    #[tokio::test]
    async fn test_mark_viewed_emits_once() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend").await;
        let u = user(&store, 1, true).await;
        let app = store.apply_to_job(j.id, u.id).await.unwrap();

        let mut rx = store.subscribe();
        assert!(store.mark_application_viewed(app.id).await.unwrap().employer_viewed);
        store.mark_application_viewed(app.id).await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::ApplicationViewed {
                application_id: app.id
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
