//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{db::DbAdapter, mentor_llm::OpenAiMentorAdapter},
    config::Config,
    error::ApiError,
    web::{
        auth::{login_handler, signup_handler},
        rest::ApiDoc,
        sessions::{
            cancel_session_handler, complete_session_handler, create_session_handler,
            list_sessions_handler,
        },
        state::AppState,
        student::ask_handler,
        volunteer::{
            add_topic_handler, by_topic_handler, list_students_handler, remove_topics_handler,
            set_availability_handler, set_status_handler, stats_handler,
        },
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    routing::{get, post},
    Router,
};
use mentor_core::domain::{StudentProfile, VolunteerProfile};
use mentor_core::ports::{DatabaseService, MentorModelService};
use mentor_core::profiles::ProfileStore;
use mentor_core::{
    accounts::Accounts, agent::ConversationAgent, roster::VolunteerRoster,
    sessions::SessionLedger, stats::StatsAggregator, topics::TopicDirectory,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use tower_http::cors::CorsLayer;
use axum::http::{Method, HeaderValue, header::{AUTHORIZATION, CONTENT_TYPE, ACCEPT}};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");
    let db: Arc<dyn DatabaseService> = db_adapter;

    // --- 3. Initialize the Mentor Model Adapter ---
    let openai_config = OpenAIConfig::new().with_api_key(
        config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| ApiError::Internal("OPENAI_API_KEY is required".to_string()))?,
    );
    let openai_client = Client::with_config(openai_config);

    let mentor_adapter: Arc<dyn MentorModelService> = Arc::new(OpenAiMentorAdapter::new(
        openai_client,
        config.mentor_model.clone(),
    ));

    // --- 4. Build the Core Components & Shared AppState ---
    // Each component gets its own handle to the store; the two profile
    // stores are shared by everything that touches profiles.
    let students: ProfileStore<StudentProfile> = ProfileStore::new(db.clone());
    let volunteers: ProfileStore<VolunteerProfile> = ProfileStore::new(db.clone());

    let app_state = Arc::new(AppState {
        config: config.clone(),
        accounts: Accounts::new(db.clone()),
        agent: ConversationAgent::new(students, mentor_adapter),
        ledger: SessionLedger::new(db.clone(), volunteers.clone()),
        topics: TopicDirectory::new(db.clone(), volunteers.clone()),
        stats: StatsAggregator::new(volunteers.clone()),
        roster: VolunteerRoster::new(db, volunteers),
    });

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8501".parse::<HeaderValue>().unwrap())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/student/ask", post(ask_handler))
        .route("/volunteers/by-topic/{topic}", get(by_topic_handler))
        .route("/volunteers/{volunteer_id}/status", post(set_status_handler))
        .route("/volunteers/{volunteer_id}/availability", post(set_availability_handler))
        .route("/volunteers/{volunteer_id}/topics", post(add_topic_handler))
        .route("/volunteers/{volunteer_id}/topics/remove", post(remove_topics_handler))
        .route("/volunteers/{volunteer_id}/students", get(list_students_handler))
        .route("/volunteers/{volunteer_id}/sessions", get(list_sessions_handler))
        .route("/volunteers/{volunteer_id}/stats", get(stats_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/{session_id}/complete", post(complete_session_handler))
        .route("/sessions/{session_id}/cancel", post(cancel_session_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
