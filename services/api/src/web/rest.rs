//! services/api/src/web/rest.rs
//!
//! Contains the master definition for the OpenAPI specification, plus the
//! small response types shared across the handler modules.

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::student::ask_handler,
        crate::web::volunteer::set_status_handler,
        crate::web::volunteer::set_availability_handler,
        crate::web::volunteer::add_topic_handler,
        crate::web::volunteer::remove_topics_handler,
        crate::web::volunteer::list_students_handler,
        crate::web::volunteer::stats_handler,
        crate::web::volunteer::by_topic_handler,
        crate::web::sessions::create_session_handler,
        crate::web::sessions::list_sessions_handler,
        crate::web::sessions::complete_session_handler,
        crate::web::sessions::cancel_session_handler,
    ),
    components(
        schemas(
            OkResponse,
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            crate::web::student::AskRequest,
            crate::web::student::AskResponse,
            crate::web::volunteer::SetStatusRequest,
            crate::web::volunteer::SetAvailabilityRequest,
            crate::web::volunteer::AddTopicRequest,
            crate::web::volunteer::RemoveTopicsRequest,
            crate::web::volunteer::ChatTurnResponse,
            crate::web::volunteer::StudentProfileResponse,
            crate::web::volunteer::TimeWindowResponse,
            crate::web::volunteer::VolunteerProfileResponse,
            crate::web::volunteer::StatsResponse,
            crate::web::sessions::CreateSessionRequest,
            crate::web::sessions::CreateSessionResponse,
            crate::web::sessions::CompleteSessionRequest,
            crate::web::sessions::CancelSessionRequest,
            crate::web::sessions::SessionResponse,
        )
    ),
    tags(
        (name = "Mentor Platform API", description = "API endpoints for the tutoring platform.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Response Types
//=========================================================================================

/// A boolean outcome body for operations that report failure as a value
/// rather than an HTTP error (unknown session ids, rejected status strings,
/// already-present topics).
#[derive(Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}
