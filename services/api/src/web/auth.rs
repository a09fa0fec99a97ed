//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup and login.

use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mentor_core::domain::Role;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

fn default_role() -> String {
    "student".to_string()
}

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// Either "student" or "volunteer".
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub id: String,
    pub email: String,
    pub role: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let existing = state.accounts.find_by_email(&req.email).await.map_err(|e| {
        error!("Failed to look up email: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create user".to_string(),
        )
    })?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            "Email already registered.".to_string(),
        ));
    }
    if req.email.is_empty() || req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter email and password.".to_string(),
        ));
    }
    let role = Role::parse(&req.role)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("Unknown role '{}'", req.role)))?;

    let user = state
        .accounts
        .create(&req.email, &req.password, role)
        .await
        .map_err(|e| {
            error!("Failed to create user: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create user".to_string(),
            )
        })?;

    let response = AuthResponse {
        id: user.id,
        email: user.email,
        role: user.role.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user = state.accounts.find_by_email(&req.email).await.map_err(|e| {
        error!("Failed to look up email: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to log in".to_string(),
        )
    })?;

    let user = match user {
        Some(user) => user,
        None => return Err((StatusCode::UNAUTHORIZED, "User not found.".to_string())),
    };
    if !user.password_matches(&req.password) {
        return Err((StatusCode::UNAUTHORIZED, "Incorrect password.".to_string()));
    }

    let response = AuthResponse {
        id: user.id,
        email: user.email,
        role: user.role.to_string(),
    };
    Ok((StatusCode::OK, Json(response)))
}
