use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::require;
use crate::errors::AppError;
use crate::models::application::ApplicantView;
use crate::models::job::{Job, JobFields, JobPatch};
use crate::models::EntityId;
use crate::state::AppState;
use crate::store::search::JobSearchFilters;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub employer_id: EntityId,
    #[serde(flatten)]
    pub fields: JobFields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
}

/// GET /api/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.store.list_active_jobs().await)
}

/// GET /api/jobs/search
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Job>> {
    let filters = JobSearchFilters {
        job_type: params.job_type,
        location: params.location,
        experience: params.experience,
    };
    Json(state.store.search_jobs(params.q.as_deref(), &filters).await)
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<Job>, AppError> {
    require("title", &req.fields.title)?;
    require("location", &req.fields.location)?;
    require("jobType", &req.fields.job_type)?;

    Ok(Json(state.store.create_job(req.employer_id, req.fields).await?))
}

/// GET /api/jobs/:id
/// Counts as a view of the posting.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.store.record_job_view(id).await?))
}

/// PUT /api/jobs/:id
/// The salary range is checked against the stored job inside the same commit.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<Job>, AppError> {
    if let Some(title) = &patch.title {
        require("title", title)?;
    }
    Ok(Json(state.store.update_job(id, patch).await?))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, AppError> {
    state.store.delete_job(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/jobs/:id/applications
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Vec<ApplicantView>>, AppError> {
    Ok(Json(state.store.list_job_applications(id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{app, send};
    use crate::store::fixtures;

    #[tokio::test]
    async fn test_create_job_then_list_and_counter() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;

        let (status, job) = send(
            &router,
            "POST",
            "/api/jobs",
            Some(json!({
                "employerId": employer.id,
                "title": "Lập trình viên Frontend",
                "location": "Hồ Chí Minh",
                "jobType": "fulltime",
                "experience": "junior",
                "salaryMin": 15,
                "salaryMax": 25,
                "requirements": "React, JavaScript"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(job["status"], "active");
        assert_eq!(job["applications"], 0);
        assert_eq!(job["company"], "ABC Technology");

        let (_, jobs) = send(&router, "GET", "/api/jobs", None).await;
        assert_eq!(jobs.as_array().unwrap().len(), 1);
        assert_eq!(store.get_employer(employer.id).await.unwrap().job_posts, 1);
    }

    #[tokio::test]
    async fn test_create_job_unknown_employer() {
        let (router, _) = app().await;
        let (status, body) = send(
            &router,
            "POST",
            "/api/jobs",
            Some(json!({
                "employerId": 404,
                "title": "Ghost",
                "location": "Hà Nội",
                "jobType": "fulltime"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "EMPLOYER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_job_inverted_salary_rejected() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;
        let (status, _) = send(
            &router,
            "POST",
            "/api/jobs",
            Some(json!({
                "employerId": employer.id,
                "title": "Backend",
                "location": "Hà Nội",
                "jobType": "fulltime",
                "salaryMin": 30,
                "salaryMax": 10
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.get_employer(employer.id).await.unwrap().job_posts, 0);
    }

    #[tokio::test]
    async fn test_update_job_inverted_salary_rejected() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;
        let job = fixtures::job(&store, employer.id, "Backend").await;

        let (status, body) = send(
            &router,
            "PUT",
            &format!("/api/jobs/{}", job.id),
            Some(json!({ "salaryMin": 99 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(store.get_job(job.id).await.unwrap().salary_min, job.salary_min);
    }

    #[tokio::test]
    async fn test_update_job_null_keeps_optional_fields() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;
        let job = fixtures::job(&store, employer.id, "Backend").await;

        let (status, body) = send(
            &router,
            "PUT",
            &format!("/api/jobs/{}", job.id),
            Some(json!({ "salaryMin": null, "salaryMax": 40 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["salaryMin"], 15);
        assert_eq!(body["salaryMax"], 40);
    }

    #[tokio::test]
    async fn test_search_endpoint_filters() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;
        fixtures::job(&store, employer.id, "Lập trình viên Frontend").await;
        fixtures::job(&store, employer.id, "Kế toán").await;

        let (status, found) = send(&router, "GET", "/api/jobs/search?q=frontend", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (_, none) = send(&router, "GET", "/api/jobs/search?q=zzz-no-match", None).await;
        assert!(none.as_array().unwrap().is_empty());

        let (_, by_type) = send(&router, "GET", "/api/jobs/search?jobType=parttime", None).await;
        assert!(by_type.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_job_counts_views_and_delete() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;
        let job = fixtures::job(&store, employer.id, "Viewed").await;
        let uri = format!("/api/jobs/{}", job.id);

        send(&router, "GET", &uri, None).await;
        let (status, body) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["views"], 2);

        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store.get_employer(employer.id).await.unwrap().job_posts, 0);
    }

    #[tokio::test]
    async fn test_update_job_status() {
        let (router, store) = app().await;
        let employer = fixtures::employer(&store).await;
        let job = fixtures::job(&store, employer.id, "Closing soon").await;

        let (status, body) = send(
            &router,
            "PUT",
            &format!("/api/jobs/{}", job.id),
            Some(json!({ "status": "archived" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "archived");

        let (_, jobs) = send(&router, "GET", "/api/jobs", None).await;
        assert!(jobs.as_array().unwrap().is_empty());
    }
}
