use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllabot::api::{create_router, AppState};
use syllabot::canvas::CanvasClient;
use syllabot::config::Config;
use syllabot::embeddings::EmbeddingProvider;
use syllabot::index::VectorIndexClient;
use syllabot::llm::LlmProvider;
use syllabot::memory::{InMemorySessionStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "syllabot=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.canvas.access_token.is_empty() {
        tracing::warn!("CANVAS_ACCESS_TOKEN is not set — course ingestion will be rejected upstream.");
    }

    tracing::info!("Initializing embedding provider: {}...", config.embeddings.model);
    let embeddings = EmbeddingProvider::new(&config.embeddings)?;

    tracing::info!("Initializing vector index client: {}...", config.index.base_url);
    let index = VectorIndexClient::new(&config.index)?;

    tracing::info!("Initializing LLM provider: {}...", config.llm.model);
    let llm = LlmProvider::new(&config.llm)?;

    let canvas = CanvasClient::new(&config.canvas)?;

    let store = Arc::new(InMemorySessionStore::new());
    let session_store: Arc<dyn SessionStore> = store.clone();

    let state = AppState::new(
        config.clone(),
        canvas,
        embeddings,
        index,
        llm,
        session_store,
    );

    let cancel_token = CancellationToken::new();

    tracing::info!("Starting session expiry sweeper...");
    let sweep_interval = config.memory.sweep_interval_secs;
    let token = cancel_token.child_token();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("Session sweeper shutting down...");
                    break;
                }
                _ = tokio::time::sleep(tokio::time::Duration::from_secs(sweep_interval)) => {
                    let removed = store.sweep_expired().await;
                    if removed > 0 {
                        tracing::debug!("swept {removed} expired chat sessions");
                    }
                }
            }
        }
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Syllabot starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
