use crate::models::application::ApplicationStatus;
use crate::models::EntityId;

/// Published after a mutation has been persisted. Subscribers use it to
/// re-query the store; it never carries the full entity.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    UserRegistered {
        user_id: EntityId,
    },
    CvUpdated {
        user_id: EntityId,
    },
    EmployerRegistered {
        employer_id: EntityId,
    },
    JobCreated {
        job_id: EntityId,
        employer_id: EntityId,
    },
    JobUpdated {
        job_id: EntityId,
    },
    JobDeleted {
        job_id: EntityId,
        employer_id: EntityId,
        removed_applications: usize,
    },
    JobsExpired {
        job_ids: Vec<EntityId>,
    },
    ApplicationSubmitted {
        application_id: EntityId,
        job_id: EntityId,
        user_id: EntityId,
    },
    ApplicationViewed {
        application_id: EntityId,
    },
    ApplicationStatusChanged {
        application_id: EntityId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}
