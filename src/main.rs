//! Jyotish Chat - guided Vedic astrology consultation service
//!
//! Walks a user through a fixed five-question intake and answers with
//! remedies picked from the classified answers.

mod api;
mod chat;
mod config;
mod conversation;
mod llm;
mod session;
mod system_prompt;

use api::{create_router, AppState};
use axum::http::HeaderValue;
use chat::ChatService;
use config::AppConfig;
use conversation::ResponseSelector;
use session::InMemorySessionStore;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jyotish_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    // Provider and reply selection
    let provider = llm::build_provider(config.openai_config());
    if provider.is_some() {
        tracing::info!(model = %config.model, "LLM provider initialized");
    }
    let picker = config.template_selection.build(config.template_seed);
    let selector = ResponseSelector::new(provider, picker, config.provider_timeout);

    let store = Arc::new(InMemorySessionStore::new());
    let state = AppState::new(ChatService::new(store, selector));

    // Create router
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers mirror the request
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        origins = ?config.allowed_origins,
        "Jyotish chat server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
