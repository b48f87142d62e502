//! Embellisher - AI text assist for chat
//!
//! Rewrites a user's in-progress chat message with a language model and lets
//! them forward, edit, or regenerate the result before it is posted.

mod api;
mod config;
mod db;
mod inference;
mod interaction;
mod llm;
mod platform;
mod prompt;

use api::{create_router, AppState};
use config::{HostConfig, ModelSettings, ServerConfig};
use db::Database;
use inference::InferenceClient;
use interaction::ProductionDispatcher;
use llm::{LlmService, LoggingService, ModelEndpoint, OpenAIService};
use platform::{DatabaseStateStore, RestPlatform};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "embellisher=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let server = ServerConfig::from_env();
    let settings = ModelSettings::from_env();
    let host = HostConfig::from_env();

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&server.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %server.db_path, "Opening database");
    let db = Database::open(&server.db_path)?;

    // Model endpoint
    let endpoint = ModelEndpoint::resolve(&settings);
    tracing::info!(
        model = %endpoint.model,
        url = %endpoint.completions_url(),
        authenticated = endpoint.credential.is_some(),
        use_case = %settings.use_case,
        "Model endpoint resolved"
    );
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(OpenAIService::new(endpoint))));

    if host.token.is_empty() {
        tracing::warn!("No platform credentials configured. Set EMBELLISHER_HOST_USER_ID and EMBELLISHER_HOST_TOKEN.");
    }
    let platform = Arc::new(RestPlatform::new(host));

    let inference = InferenceClient::new(llm, platform.clone(), settings.use_case, settings.temperature);
    let dispatcher: ProductionDispatcher =
        ProductionDispatcher::new(DatabaseStateStore::new(db), platform, inference);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(dispatcher))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    tracing::info!("Embellisher listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
