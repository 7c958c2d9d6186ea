use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Active,
    Draft,
    Expired,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: EntityId,
    pub employer_id: EntityId,
    pub title: String,
    /// Company name copied from the employer when the job was posted.
    pub company: String,
    #[serde(default)]
    pub industry: String,
    pub location: String,
    pub job_type: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    #[serde(default)]
    pub work_arrangement: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub vacancies: Option<u32>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub contact_info: String,
    pub status: JobStatus,
    /// Always equal to the number of applications referencing this job.
    pub applications: u32,
    pub views: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a new posting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFields {
    pub title: String,
    #[serde(default)]
    pub industry: String,
    pub location: String,
    pub job_type: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    #[serde(default)]
    pub work_arrangement: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub vacancies: Option<u32>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub contact_info: String,
    /// Defaults to `active`; employers may save a `draft` instead.
    #[serde(default)]
    pub status: Option<JobStatus>,
}

/// Partial update for an existing posting. The owning employer and the
/// counters are fixed for the lifetime of a job.
///
/// Absent and `null` fields both mean "leave unchanged", so the optional
/// `salaryMin`, `salaryMax`, `vacancies` and `applicationDeadline` can be
/// replaced but not cleared once set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    pub title: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub work_arrangement: Option<Vec<String>>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub vacancies: Option<u32>,
    pub application_deadline: Option<NaiveDate>,
    pub contact_info: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobPatch {
    pub fn apply(self, job: &mut Job) {
        if let Some(v) = self.title {
            job.title = v;
        }
        if let Some(v) = self.industry {
            job.industry = v;
        }
        if let Some(v) = self.location {
            job.location = v;
        }
        if let Some(v) = self.job_type {
            job.job_type = v;
        }
        if let Some(v) = self.experience {
            job.experience = v;
        }
        if let Some(v) = self.work_arrangement {
            job.work_arrangement = v;
        }
        if let Some(v) = self.description {
            job.description = v;
        }
        if let Some(v) = self.requirements {
            job.requirements = v;
        }
        if let Some(v) = self.benefits {
            job.benefits = v;
        }
        if let Some(v) = self.contact_info {
            job.contact_info = v;
        }
        if let Some(v) = self.status {
            job.status = v;
        }
        if self.salary_min.is_some() {
            job.salary_min = self.salary_min;
        }
        if self.salary_max.is_some() {
            job.salary_max = self.salary_max;
        }
        if self.vacancies.is_some() {
            job.vacancies = self.vacancies;
        }
        if self.application_deadline.is_some() {
            job.application_deadline = self.application_deadline;
        }
    }
}
