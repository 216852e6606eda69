//! Sakhi - a supportive wellness chat companion
//!
//! Routes each message to local wellness content, hosted image generation
//! or hosted chat completion, over one shared conversation transcript.

mod api;
mod config;
mod image_store;
mod intent;
mod llm;
mod routing;
mod session;
mod wellness;

use api::{create_router, AppState};
use config::AppConfig;
use image_store::FileImageStore;
use llm::{ChatCompletionsService, LoggingChat, LoggingImage, TextToImageService};
use routing::MessageRouter;
use session::Session;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wellness::CuratedWellness;

/// Slack on top of the per-call timeout so the router's own timer fires first
const HTTP_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sakhi=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration (a missing token stops startup here)
    let config = AppConfig::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

    let http = reqwest::Client::builder()
        .timeout(config.downstream_timeout + HTTP_TIMEOUT_SLACK)
        .build()?;

    let chat = Arc::new(LoggingChat::new(Arc::new(ChatCompletionsService::new(
        http.clone(),
        config.api_token.clone(),
        config.chat_model.clone(),
        &config.chat_base_url,
    ))));
    let image = Arc::new(LoggingImage::new(Arc::new(TextToImageService::new(
        http,
        config.api_token.clone(),
        config.image_model.clone(),
        &config.image_base_url,
    ))));
    let store = Arc::new(FileImageStore::new(config.static_dir.clone()));

    tracing::info!(
        chat_model = %config.chat_model,
        image_model = %config.image_model,
        static_dir = %store.dir().display(),
        timeout_secs = config.downstream_timeout.as_secs(),
        "Clients initialized"
    );

    // One session for the whole process, dropped at shutdown
    let session = Arc::new(Session::new());
    let router = Arc::new(MessageRouter::new(
        session,
        chat,
        image,
        store,
        Arc::new(CuratedWellness::new()),
        config.downstream_timeout,
    ));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(AppState::new(router), &config.static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Sakhi server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
