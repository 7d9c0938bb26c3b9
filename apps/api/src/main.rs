mod auth;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod pipeline;
mod render;
mod routes;
mod state;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::Credentials;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::assets::LogoSource;
use crate::routes::build_router;
use crate::state::{AppState, RenderSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JD Studio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_model.clone(),
        config.llm_max_tokens,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let logo = LogoSource::from_path(config.logo_path.clone());
    info!(
        "Render settings: logo {:?}, missing separator {:?}",
        logo, config.missing_separator
    );

    let state = AppState {
        generator: Arc::new(llm),
        credentials: Arc::new(Credentials::new(
            config.auth_user.clone(),
            config.auth_password.clone(),
        )),
        render: RenderSettings {
            logo,
            missing_separator: config.missing_separator,
        },
    };

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
