use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::ArticleInputs;
use crate::notices;
use crate::pipeline::execute_pipeline;
use crate::web::AppState;
use crate::web::jobs::{JobSnapshot, JobStatus};
use crate::web::page::render_index;

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub limit: String,
}

#[derive(Debug, Serialize)]
pub struct Notice {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct JobAccepted {
    pub id: Uuid,
    pub status: JobStatus,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct JobView {
    pub id: Uuid,
    pub status: JobStatus,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<JobSnapshot> for JobView {
    fn from(job: JobSnapshot) -> Self {
        let message = match job.status {
            JobStatus::Running => notices::IN_PROGRESS,
            JobStatus::Succeeded => notices::SUCCESS,
            JobStatus::Failed => notices::GENERIC_ERROR,
            JobStatus::Cancelled => notices::CANCELLED,
        };
        // Only a succeeded job ever exposes text
        let article = match job.status {
            JobStatus::Succeeded => job.article,
            _ => None,
        };
        Self {
            id: job.id,
            status: job.status,
            message,
            article,
            created_at: job.created_at,
            finished_at: job.finished_at,
        }
    }
}

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn health() -> &'static str {
    "OK"
}

/// Start a background run. An empty topic is rejected without starting anything.
pub async fn submit_article(
    State(state): State<AppState>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected article request: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(Notice {
                    status: "error",
                    message: notices::GENERIC_ERROR,
                }),
            )
                .into_response();
        }
    };
    let inputs = ArticleInputs::new(request.topic, request.limit);
    if !inputs.has_topic() {
        return (
            StatusCode::BAD_REQUEST,
            Json(Notice {
                status: "warning",
                message: notices::EMPTY_TOPIC_WARNING,
            }),
        )
            .into_response();
    }

    let (id, cancel) = state.jobs.start().await;
    info!("Job {}: topic {:?}, limit {:?}", id, inputs.topic, inputs.limit);

    let AppState { backend, crew, jobs } = state;
    tokio::spawn(async move {
        let outcome = execute_pipeline(backend.as_ref(), &crew, inputs, &cancel).await;
        jobs.finish(id, outcome).await;
    });

    (
        StatusCode::ACCEPTED,
        Json(JobAccepted {
            id,
            status: JobStatus::Running,
            message: notices::IN_PROGRESS,
        }),
    )
        .into_response()
}

pub async fn article_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobView>, StatusCode> {
    state
        .jobs
        .get(id)
        .await
        .map(|job| Json(JobView::from(job)))
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn cancel_article(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.jobs.cancel(id).await {
        StatusCode::ACCEPTED
    } else {
        StatusCode::NOT_FOUND
    }
}
