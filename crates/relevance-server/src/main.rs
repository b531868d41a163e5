//! Relevance HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use relevance::config::Config;
use relevance::llm::OpenAiCompatClient;
use relevance::reddit::RedditClient;
use relevance::relevance::RelevancePipeline;
use relevance_server::gateway::{HandlerState, create_router_with_state};
use relevance_server::{health_check_url, telemetry};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    let config = Config::from_env()?;
    config.validate()?;
    let _log_guard = telemetry::init_tracing(&config)?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.bind_addr,
        port = config.port,
        "Starting Reddit relevance API"
    );

    let source = RedditClient::from_config(&config);
    let llm = OpenAiCompatClient::from_config(&config);

    tracing::info!(
        reddit = %config.reddit_base_url,
        llm = %config.llm_base_url,
        embedding_model = %config.embedding_model,
        chat_model = %config.chat_model,
        request_timeout = ?config.request_timeout,
        "Collaborators configured"
    );

    let pipeline = Arc::new(RelevancePipeline::new(source, llm));
    let state = HandlerState::new(pipeline, config.request_timeout);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Relevance server shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let config = Config::from_env().unwrap_or_default();
    let url = health_check_url(&config);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
