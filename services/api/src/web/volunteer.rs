//! services/api/src/web/volunteer.rs
//!
//! Volunteer-facing endpoints: presence and availability, mentoring topics,
//! assigned students, statistics, and topic search.

use crate::web::rest::OkResponse;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mentor_core::domain::{StudentProfile, VolunteerProfile, VolunteerStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SetStatusRequest {
    /// One of "available", "busy" or "offline".
    pub status: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetAvailabilityRequest {
    pub day: String,
    pub start: String,
    pub end: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddTopicRequest {
    pub topic: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveTopicsRequest {
    pub topics: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ChatTurnResponse {
    pub role: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentProfileResponse {
    pub id: String,
    pub weak_topics: Vec<String>,
    pub history: Vec<ChatTurnResponse>,
}

impl From<StudentProfile> for StudentProfileResponse {
    fn from(profile: StudentProfile) -> Self {
        Self {
            id: profile.id,
            weak_topics: profile.weak_topics,
            history: profile
                .history
                .into_iter()
                .map(|turn| ChatTurnResponse {
                    role: turn.role.to_string(),
                    message: turn.message,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TimeWindowResponse {
    pub start: String,
    pub end: String,
}

#[derive(Serialize, ToSchema)]
pub struct VolunteerProfileResponse {
    pub id: String,
    pub status: String,
    pub topics: Vec<String>,
    pub availability: BTreeMap<String, TimeWindowResponse>,
    pub students_assigned: Vec<String>,
    pub sessions_completed: u64,
    pub total_hours: f64,
    pub rating: f64,
}

impl From<VolunteerProfile> for VolunteerProfileResponse {
    fn from(profile: VolunteerProfile) -> Self {
        Self {
            id: profile.id,
            status: profile.status.to_string(),
            topics: profile.topics,
            availability: profile
                .availability
                .into_iter()
                .map(|(day, window)| {
                    (
                        day,
                        TimeWindowResponse {
                            start: window.start,
                            end: window.end,
                        },
                    )
                })
                .collect(),
            students_assigned: profile.students_assigned,
            sessions_completed: profile.sessions_completed,
            total_hours: profile.total_hours,
            rating: profile.rating,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub sessions_completed: u64,
    pub total_hours: f64,
    pub students_helped: usize,
    pub rating: f64,
    pub topics: Vec<String>,
    pub status: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /volunteers/{volunteer_id}/status - Set the volunteer's status
///
/// An unknown status string reports `ok = false` without touching the store.
#[utoipa::path(
    post,
    path = "/volunteers/{volunteer_id}/status",
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated (or rejected via ok=false)", body = OkResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn set_status_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let status = match VolunteerStatus::parse(&req.status) {
        Some(status) => status,
        None => return Ok(Json(OkResponse { ok: false })),
    };

    state
        .roster
        .set_status(&volunteer_id, status)
        .await
        .map_err(|e| {
            error!("Failed to set status: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to set status".to_string(),
            )
        })?;
    Ok(Json(OkResponse { ok: true }))
}

/// POST /volunteers/{volunteer_id}/availability - Set one weekday's window
#[utoipa::path(
    post,
    path = "/volunteers/{volunteer_id}/availability",
    request_body = SetAvailabilityRequest,
    responses(
        (status = 200, description = "Availability updated", body = OkResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn set_availability_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
    Json(req): Json<SetAvailabilityRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .roster
        .set_availability(&volunteer_id, &req.day, &req.start, &req.end)
        .await
        .map_err(|e| {
            error!("Failed to set availability: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to set availability".to_string(),
            )
        })?;
    Ok(Json(OkResponse { ok: true }))
}

/// POST /volunteers/{volunteer_id}/topics - Add one mentoring topic
///
/// `ok = false` means the topic was already present; nothing was written.
#[utoipa::path(
    post,
    path = "/volunteers/{volunteer_id}/topics",
    request_body = AddTopicRequest,
    responses(
        (status = 200, description = "Topic added (ok=false when already present)", body = OkResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn add_topic_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
    Json(req): Json<AddTopicRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let ok = state
        .topics
        .add_topic(&volunteer_id, &req.topic)
        .await
        .map_err(|e| {
            error!("Failed to add topic: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to add topic".to_string(),
            )
        })?;
    Ok(Json(OkResponse { ok }))
}

/// POST /volunteers/{volunteer_id}/topics/remove - Remove listed topics
#[utoipa::path(
    post,
    path = "/volunteers/{volunteer_id}/topics/remove",
    request_body = RemoveTopicsRequest,
    responses(
        (status = 200, description = "Topics removed", body = OkResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn remove_topics_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
    Json(req): Json<RemoveTopicsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let ok = state
        .topics
        .remove_topics(&volunteer_id, &req.topics)
        .await
        .map_err(|e| {
            error!("Failed to remove topics: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to remove topics".to_string(),
            )
        })?;
    Ok(Json(OkResponse { ok }))
}

/// GET /volunteers/{volunteer_id}/students - List assigned students
#[utoipa::path(
    get,
    path = "/volunteers/{volunteer_id}/students",
    responses(
        (status = 200, description = "Assigned students", body = [StudentProfileResponse]),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn list_students_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let students = state
        .roster
        .assigned_students(&volunteer_id)
        .await
        .map_err(|e| {
            error!("Failed to list assigned students: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list students".to_string(),
            )
        })?;

    let response: Vec<StudentProfileResponse> =
        students.into_iter().map(StudentProfileResponse::from).collect();
    Ok(Json(response))
}

/// GET /volunteers/{volunteer_id}/stats - Volunteer statistics
#[utoipa::path(
    get,
    path = "/volunteers/{volunteer_id}/stats",
    responses(
        (status = 200, description = "Volunteer statistics", body = StatsResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("volunteer_id" = String, Path, description = "The volunteer's user id.")
    )
)]
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Path(volunteer_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let stats = state.stats.stats(&volunteer_id).await.map_err(|e| {
        error!("Failed to compute stats: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to compute stats".to_string(),
        )
    })?;

    Ok(Json(StatsResponse {
        sessions_completed: stats.sessions_completed,
        total_hours: stats.total_hours,
        students_helped: stats.students_helped,
        rating: stats.rating,
        topics: stats.topics,
        status: stats.status.to_string(),
    }))
}

/// GET /volunteers/by-topic/{topic} - Volunteers who mentor a topic
///
/// The match is exact and case-sensitive, like the underlying store query.
#[utoipa::path(
    get,
    path = "/volunteers/by-topic/{topic}",
    responses(
        (status = 200, description = "Matching volunteers", body = [VolunteerProfileResponse]),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("topic" = String, Path, description = "The topic to search for.")
    )
)]
pub async fn by_topic_handler(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let volunteers = state.topics.by_topic(&topic).await.map_err(|e| {
        error!("Failed to search volunteers by topic: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to search volunteers".to_string(),
        )
    })?;

    let response: Vec<VolunteerProfileResponse> =
        volunteers.into_iter().map(VolunteerProfileResponse::from).collect();
    Ok(Json(response))
}
