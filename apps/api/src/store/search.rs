use serde::Deserialize;

use super::JobStore;
use crate::models::job::{Job, JobStatus};

/// Optional narrowing of a search. Blank values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchFilters {
    /// Exact match.
    pub job_type: Option<String>,
    /// Case-insensitive substring match.
    pub location: Option<String>,
    /// Exact match.
    pub experience: Option<String>,
}

impl JobStore {
    /// Searches active jobs. All supplied criteria must match.
    pub async fn search_jobs(&self, query: Option<&str>, filters: &JobSearchFilters) -> Vec<Job> {
        let snapshot = self.snapshot().await;
        filter_jobs(
            snapshot
                .jobs
                .iter()
                .filter(|j| j.status == JobStatus::Active),
            query,
            filters,
        )
    }
}

/// `query` is matched case-insensitively against title, company,
/// description and requirements.
pub fn filter_jobs<'a>(
    jobs: impl IntoIterator<Item = &'a Job>,
    query: Option<&str>,
    filters: &JobSearchFilters,
) -> Vec<Job> {
    let needle = non_blank(query).map(str::to_lowercase);
    let job_type = non_blank(filters.job_type.as_deref());
    let location = non_blank(filters.location.as_deref()).map(str::to_lowercase);
    let experience = non_blank(filters.experience.as_deref());

    jobs.into_iter()
        .filter(|job| needle.as_deref().map_or(true, |n| matches_query(job, n)))
        .filter(|job| job_type.map_or(true, |t| job.job_type == t))
        .filter(|job| {
            location
                .as_deref()
                .map_or(true, |l| job.location.to_lowercase().contains(l))
        })
        .filter(|job| experience.map_or(true, |x| job.experience == x))
        .cloned()
        .collect()
}

fn matches_query(job: &Job, needle: &str) -> bool {
    [&job.title, &job.company, &job.description, &job.requirements]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
