//! services/api/src/web/student.rs
//!
//! The student-facing endpoint: one question in, one mentor reply out.

use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mentor_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct AskRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct AskResponse {
    pub reply: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /student/ask - Ask the mentor a question
#[utoipa::path(
    post,
    path = "/student/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Mentor replied", body = AskResponse),
        (status = 400, description = "Empty message"),
        (status = 502, description = "The mentor model failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Please type something.".to_string()));
    }

    match state.agent.ask(&req.user_id, &req.message).await {
        Ok(reply) => Ok(Json(AskResponse { reply })),
        Err(e @ PortError::Model(_)) => {
            error!("Mentor model failed: {:?}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "The mentor is unavailable right now".to_string(),
            ))
        }
        Err(e) => {
            error!("Failed to answer student message: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to answer".to_string(),
            ))
        }
    }
}
