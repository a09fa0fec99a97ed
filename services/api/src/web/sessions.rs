//! services/api/src/web/sessions.rs
//!
//! Mentoring session endpoints: scheduling, listing, completion and
//! cancellation.

use crate::web::rest::OkResponse;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use mentor_core::domain::Session;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub volunteer_id: String,
    pub student_id: String,
    pub topic: String,
    /// Free-form display string chosen by the scheduler, e.g. "2024-03-01 17:00".
    pub scheduled_time: String,
}

/// The response payload sent after successfully creating a session.
#[derive(Serialize, ToSchema)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CompleteSessionRequest {
    /// Session length in whole minutes.
    pub duration: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CancelSessionRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: String,
    pub volunteer_id: String,
    pub student_id: String,
    pub topic: String,
    pub scheduled_time: String,
    pub status: String,
    pub duration: u32,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            volunteer_id: session.volunteer_id,
            student_id: session.student_id,
            topic: session.topic,
            scheduled_time: session.scheduled_time,
            status: session.status.to_string(),
            duration: session.duration,
            notes: session.notes,
            created_at: session.created_at,
            completed_at: session.completed_at,
            cancelled_at: session.cancelled_at,
            cancellation_reason: session.cancellation_reason,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /sessions - Schedule a new mentoring session
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created successfully", body = CreateSessionResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_session_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = state
        .ledger
        .create(
            &req.volunteer_id,
            &req.student_id,
            &req.topic,
            &req.scheduled_time,
        )
        .await
        .map_err(|e| {
            error!("Failed to create session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session".to_string(),
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    ))
}

/// GET /volunteers/{volunteer_id}/sessions - Upcoming scheduled sessions
#[utoipa::path(
    get,
    path = "/volunteers/{volunteer_id}/sessions",
    responses(
        (status = 200, description = "Scheduled sessions", body = [SessionResponse]),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn list_sessions_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let sessions = state
        .ledger
        .list_scheduled(&volunteer_id)
        .await
        .map_err(|e| {
            error!("Failed to list sessions: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list sessions".to_string(),
            )
        })?;

    let response: Vec<SessionResponse> =
        sessions.into_iter().map(SessionResponse::from).collect();
    Ok(Json(response))
}

/// POST /sessions/{session_id}/complete - Mark a session completed
///
/// An unknown session id reports `ok = false` rather than an HTTP error.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/complete",
    request_body = CompleteSessionRequest,
    responses(
        (status = 200, description = "Completion recorded (ok=false when the id is unknown)", body = OkResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("session_id" = String, Path, description = "The session id.")
    )
)]
pub async fn complete_session_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(req): Json<CompleteSessionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let ok = state
        .ledger
        .complete(&session_id, req.duration, &req.notes)
        .await
        .map_err(|e| {
            error!("Failed to complete session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to complete session".to_string(),
            )
        })?;
    Ok(Json(OkResponse { ok }))
}

/// POST /sessions/{session_id}/cancel - Cancel a scheduled session
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/cancel",
    request_body = CancelSessionRequest,
    responses(
        (status = 200, description = "Cancellation recorded (ok=false when the id is unknown)", body = OkResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("session_id" = String, Path, description = "The session id.")
    )
)]
pub async fn cancel_session_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(req): Json<CancelSessionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let ok = state
        .ledger
        .cancel(&session_id, &req.reason)
        .await
        .map_err(|e| {
            error!("Failed to cancel session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to cancel session".to_string(),
            )
        })?;
    Ok(Json(OkResponse { ok }))
}
