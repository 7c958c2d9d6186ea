//! Applicant notifications.
//!
//! Subscribes to store events and renders the message an applicant would
//! receive. Delivery is a structured log record; there is no mail or SMS
//! transport.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::application::ApplicationStatus;
use crate::models::document::StoreDocument;
use crate::models::EntityId;
use crate::store::{JobStore, StoreEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub user_id: EntityId,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub body: String,
}

/// Runs for the life of the process.
pub fn spawn_notifier(store: Arc<JobStore>) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let snapshot = store.snapshot().await;
                    if let Some(notice) = compose_notice(&snapshot, &event) {
                        deliver(&notice);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Notifier fell behind; {skipped} events skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn deliver(notice: &Notice) {
    info!(
        user_id = notice.user_id,
        email = %notice.email,
        phone = %notice.phone,
        subject = %notice.subject,
        "{}",
        notice.body
    );
}

/// Builds the applicant-facing message for an event, if it warrants one.
/// Returns `None` when the referenced rows are gone by the time the event
/// is handled.
pub fn compose_notice(doc: &StoreDocument, event: &StoreEvent) -> Option<Notice> {
    let application_id = match event {
        StoreEvent::ApplicationSubmitted { application_id, .. }
        | StoreEvent::ApplicationStatusChanged { application_id, .. } => *application_id,
        _ => return None,
    };
    let application = doc.application(application_id)?;
    let user = doc.user(application.user_id)?;
    let job = doc.job(application.job_id)?;

    let (subject, mut body) = match event {
        StoreEvent::ApplicationSubmitted { .. } => (
            "Application submitted".to_string(),
            format!(
                "Position: {}\nCompany: {}\nSubmitted: {}\n\n\
                 Your application has been sent to the employer. \
                 You will be notified when there is a result.",
                job.title,
                job.company,
                application.applied_at.format("%d/%m/%Y")
            ),
        ),
        StoreEvent::ApplicationStatusChanged { to, .. } => match to {
            ApplicationStatus::Reviewing => (
                "Your application is under review".to_string(),
                format!(
                    "Your application for {} at {} is being reviewed by the employer.",
                    job.title, job.company
                ),
            ),
            ApplicationStatus::Accepted => (
                "Congratulations, you got the job!".to_string(),
                format!(
                    "You have been accepted for {} at {}. \
                     Contact the employer for the next steps.",
                    job.title, job.company
                ),
            ),
            ApplicationStatus::Rejected => (
                "Application result".to_string(),
                format!(
                    "Thank you for your interest in {} at {}. \
                     Unfortunately your profile was not selected this time.",
                    job.title, job.company
                ),
            ),
            ApplicationStatus::Pending => return None,
        },
        _ => return None,
    };

    if application.status.is_terminal() && !application.feedback.is_empty() {
        body.push_str("\n\nEmployer feedback:\n");
        body.push_str(&application.feedback);
    }

    Some(Notice {
        user_id: user.id,
        email: user.email.clone(),
        phone: user.phone.clone(),
        subject,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;

    #[tokio::test]
    async fn test_submission_confirmation() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend Developer").await;
        let u = user(&store, 1, true).await;
        let app = store.apply_to_job(j.id, u.id).await.unwrap();

        let event = StoreEvent::ApplicationSubmitted {
            application_id: app.id,
            job_id: j.id,
            user_id: u.id,
        };
        let notice = compose_notice(&*store.snapshot().await, &event).unwrap();
        assert_eq!(notice.email, u.email);
        assert_eq!(notice.subject, "Application submitted");
        assert!(notice.body.contains("Frontend Developer"));
        assert!(notice.body.contains("ABC Technology"));
    }

    #[tokio::test]
    async fn test_rejection_includes_feedback() {
        let store = memory_store().await;
        let e = employer(&store).await;
        let j = job(&store, e.id, "Frontend Developer").await;
        let u = user(&store, 1, true).await;
        let app = store.apply_to_job(j.id, u.id).await.unwrap();
        store
            .set_application_status(
                app.id,
                ApplicationStatus::Rejected,
                Some("Needs more React experience".to_string()),
            )
            .await
            .unwrap();

        let event = StoreEvent::ApplicationStatusChanged {
            application_id: app.id,
            from: ApplicationStatus::Pending,
            to: ApplicationStatus::Rejected,
        };
        let notice = compose_notice(&*store.snapshot().await, &event).unwrap();
        assert_eq!(notice.subject, "Application result");
        assert!(notice.body.ends_with("Needs more React experience"));
    }

    #[tokio::test]
    async fn test_unrelated_and_dangling_events_are_silent() {
        let store = memory_store().await;
        let doc = store.snapshot().await;
        assert!(compose_notice(&doc, &StoreEvent::JobUpdated { job_id: 1 }).is_none());
        assert!(compose_notice(
            &doc,
            &StoreEvent::ApplicationSubmitted {
                application_id: 1,
                job_id: 2,
                user_id: 3
            }
        )
        .is_none());
    }
}
