//! REST endpoints for email submission and status polling.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::ApiError;
use crate::jobs::{JobRunner, JobStatus, JobView};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub runner: JobRunner,
}

/// Build the Axum router for the email API.
pub fn email_routes(runner: JobRunner) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/emails", post(create_email))
        .route("/emails/{id}", get(get_email_status))
        .with_state(AppState { runner })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mail-triage"
    }))
}

// ── Emails ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EmailIn {
    pub title: String,
    pub content: String,
}

impl EmailIn {
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_empty() {
            return Err(ApiError::Validation("title must not be empty".into()));
        }
        if self.content.is_empty() {
            return Err(ApiError::Validation("content must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailPendingOut {
    pub id: String,
    pub status: JobStatus,
}

async fn create_email(
    State(state): State<AppState>,
    Json(body): Json<EmailIn>,
) -> Result<Json<EmailPendingOut>, ApiError> {
    body.validate()?;

    let id = state.runner.submit(body.title, body.content).await?;
    Ok(Json(EmailPendingOut {
        id: id.to_string(),
        status: JobStatus::Pending,
    }))
}

async fn get_email_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobView>, ApiError> {
    let record = state.runner.store().get(&id).await.inspect_err(|e| {
        debug!(id = %id, error = %e, "Status query for unknown job");
    })?;
    Ok(Json(record.view()))
}
