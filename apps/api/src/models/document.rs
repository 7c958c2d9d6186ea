use serde::{Deserialize, Serialize};

use super::application::Application;
use super::employer::Employer;
use super::job::Job;
use super::user::User;
use super::EntityId;

/// The single persisted JSON document. Array order is insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub employers: Vec<Employer>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl StoreDocument {
    /// Largest id in use across all collections, or 0 for an empty document.
    pub fn max_id(&self) -> EntityId {
        let users = self.users.iter().map(|u| u.id);
        let employers = self.employers.iter().map(|e| e.id);
        let jobs = self.jobs.iter().map(|j| j.id);
        let applications = self.applications.iter().map(|a| a.id);
        users
            .chain(employers)
            .chain(jobs)
            .chain(applications)
            .max()
            .unwrap_or(0)
    }

    pub fn user(&self, id: EntityId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: EntityId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn employer(&self, id: EntityId) -> Option<&Employer> {
        self.employers.iter().find(|e| e.id == id)
    }

    pub fn employer_mut(&mut self, id: EntityId) -> Option<&mut Employer> {
        self.employers.iter_mut().find(|e| e.id == id)
    }

    pub fn job(&self, id: EntityId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn job_mut(&mut self, id: EntityId) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }

    pub fn application(&self, id: EntityId) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn application_mut(&mut self, id: EntityId) -> Option<&mut Application> {
        self.applications.iter_mut().find(|a| a.id == id)
    }
}
