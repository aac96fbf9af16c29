//! MyGram API server binary

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use mygram_api::{build_router, setup_metrics, AppState, Config};
use mygram_db::Repositories;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("mygram_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MyGram API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        token_ttl_secs = config.auth.token_ttl.as_secs(),
        hash_workers = config.auth.hash_workers,
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Storage backend
    let (repos, pool) = match &config.database_url {
        Some(url) => {
            let pool = mygram_db::create_pool(url).await?;
            mygram_db::run_migrations(&pool).await?;
            tracing::info!("Database pool created and migrations applied");
            (Repositories::postgres(pool.clone()), Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage; data is lost on exit");
            (Repositories::in_memory(), None)
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(repos, pool, config)?;
    let app = build_router(state, metrics_handle);

    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
