//! JobStore: sole owner of the persisted job-board document.
//!
//! Every mutation runs load → mutate → persist under one writer lock, on a
//! private copy of the latest snapshot. The copy is published only after the
//! backend accepted it, so a failed operation has no visible effect.
//! Readers take an `Arc` of the published snapshot and never wait on I/O.

pub mod applications;
pub mod backend;
pub mod employers;
pub mod error;
pub mod events;
pub mod jobs;
pub mod password;
pub mod search;
pub mod users;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{broadcast, Mutex, OwnedMutexGuard, RwLock};
use tracing::{error, info};

use crate::models::document::StoreDocument;
use crate::models::EntityId;

pub use backend::{DocumentBackend, JsonFileBackend, MemoryBackend};
pub use error::{PersistenceError, StoreError};
pub use events::StoreEvent;

const EVENT_CHANNEL_CAPACITY: usize = 256;
/// Lifetime of a new posting before `expire_overdue_jobs` retires it.
pub const DEFAULT_JOB_TTL_DAYS: i64 = 30;

pub struct JobStore {
    backend: Arc<dyn DocumentBackend>,
    snapshot: Arc<RwLock<Arc<StoreDocument>>>,
    /// Writer lock; the guarded value is the next id to hand out.
    writer: Arc<Mutex<EntityId>>,
    events: broadcast::Sender<StoreEvent>,
    job_ttl: Duration,
}

/// A mutation in progress: a private copy of the document plus everything
/// that becomes visible only if the mutation commits.
pub struct Txn {
    pub doc: StoreDocument,
    pub now: DateTime<Utc>,
    next_id: EntityId,
    events: Vec<StoreEvent>,
}

impl Txn {
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
    }
}

impl JobStore {
    /// Loads the backend's document, or starts empty when nothing was ever
    /// persisted. A document that exists but cannot be read is an error.
    pub async fn open(backend: Arc<dyn DocumentBackend>) -> Result<Self, StoreError> {
        let doc = backend.load().await?.unwrap_or_default();
        let next_id = doc.max_id() + 1;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        info!("JobStore opened (next id {next_id})");

        Ok(JobStore {
            backend,
            snapshot: Arc::new(RwLock::new(Arc::new(doc))),
            writer: Arc::new(Mutex::new(next_id)),
            events,
            job_ttl: Duration::days(DEFAULT_JOB_TTL_DAYS),
        })
    }

    pub fn with_job_ttl(mut self, ttl: Duration) -> Self {
        self.job_ttl = ttl;
        self
    }

    pub fn job_ttl(&self) -> Duration {
        self.job_ttl
    }

    /// Latest committed state.
    pub async fn snapshot(&self) -> Arc<StoreDocument> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Events are delivered after the mutation that caused them has been
    /// persisted. Slow subscribers may observe `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Runs `apply` against a copy of the current document and commits the
    /// result. `apply` must not have side effects outside the `Txn`.
    pub async fn mutate<T, F>(&self, op: &'static str, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Txn) -> Result<T, StoreError>,
    {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        let base = self.snapshot().await;
        let mut txn = Txn {
            doc: (*base).clone(),
            now: Utc::now(),
            next_id: *guard,
            events: Vec::new(),
        };
        drop(base);

        let value = apply(&mut txn)?;

        // Commit on a separate task so a caller dropped mid-write cannot leave
        // the file and the published snapshot out of step.
        let commit = Commit {
            backend: Arc::clone(&self.backend),
            snapshot: Arc::clone(&self.snapshot),
            events: self.events.clone(),
        };
        let result = tokio::spawn(commit.run(guard, txn))
            .await
            .map_err(|e| PersistenceError::Io(std::io::Error::other(e.to_string())))?;

        if let Err(e) = result {
            error!("{op}: store document was not persisted: {e}");
            return Err(e.into());
        }
        Ok(value)
    }
}

struct Commit {
    backend: Arc<dyn DocumentBackend>,
    snapshot: Arc<RwLock<Arc<StoreDocument>>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Commit {
    async fn run(
        self,
        mut writer: OwnedMutexGuard<EntityId>,
        txn: Txn,
    ) -> Result<(), PersistenceError> {
        let Txn {
            doc,
            next_id,
            events,
            ..
        } = txn;

        self.backend.persist(&doc).await?;

        *writer = next_id;
        *self.snapshot.write().await = Arc::new(doc);
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::employer::{Employer, EmployerProfile};
    use crate::models::job::{Job, JobFields};
    use crate::models::user::User;

    pub async fn memory_store() -> JobStore {
        JobStore::open(Arc::new(MemoryBackend::new())).await.unwrap()
    }

    /// Backend whose writes always fail, for checking that nothing leaks.
    #[derive(Default)]
    pub struct ReadOnlyBackend {
        pub initial: Option<StoreDocument>,
    }

    #[async_trait::async_trait]
    impl DocumentBackend for ReadOnlyBackend {
        async fn load(&self) -> Result<Option<StoreDocument>, PersistenceError> {
            Ok(self.initial.clone())
        }

        async fn persist(&self, _doc: &StoreDocument) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only media",
            )))
        }
    }

    pub fn employer_profile(company: &str, email: &str) -> EmployerProfile {
        EmployerProfile {
            company_name: company.to_string(),
            email: email.to_string(),
            phone: "0912345678".to_string(),
            address: "123 Le Loi, District 1".to_string(),
            tax_code: "0123456789".to_string(),
            contact_person: "Nguyen Van A".to_string(),
            position: "HR Manager".to_string(),
            industry: "technology".to_string(),
        }
    }

    pub fn job_fields(title: &str) -> JobFields {
        JobFields {
            title: title.to_string(),
            industry: "technology".to_string(),
            location: "Hồ Chí Minh".to_string(),
            job_type: "fulltime".to_string(),
            experience: "junior".to_string(),
            salary_min: Some(15),
            salary_max: Some(25),
            description: "Build user interfaces for web applications".to_string(),
            requirements: "React, JavaScript, HTML/CSS".to_string(),
            ..JobFields::default()
        }
    }

    pub async fn employer(store: &JobStore) -> Employer {
        store
            .register_employer(employer_profile("ABC Technology", "hr@abc.example"))
            .await
            .unwrap()
    }

    pub async fn job(store: &JobStore, employer_id: EntityId, title: &str) -> Job {
        store.create_job(employer_id, job_fields(title)).await.unwrap()
    }

    /// Registers a user and, when `with_cv` is set, uploads a CV.
    pub async fn user(store: &JobStore, n: u32, with_cv: bool) -> User {
        let user = store
            .register_user(
                &format!("Applicant {n}"),
                &format!("applicant{n}@example.com"),
                &format!("09000000{n:02}"),
                "hunter22",
            )
            .await
            .unwrap();
        if with_cv {
            store
                .update_cv(user.id, serde_json::json!({ "summary": "Frontend developer" }))
                .await
                .unwrap()
        } else {
            user
        }
    }
}
