//! Wiring & DI. Entry point: bootstrap adapters, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use portfolio_contact::adapters::auth::StaticTokenAuthorizer;
use portfolio_contact::adapters::http::{AppState, ResponseComposer, build_router, cors_layer};
use portfolio_contact::adapters::persistence::{MemoryStore, SqliteStore};
use portfolio_contact::ports::{AdminAuthorizer, ContactIntakePort, SubmissionStore};
use portfolio_contact::shared::config::{AppConfig, StoreBackend};
use portfolio_contact::usecases::{ContactService, StoreGateway};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed; using defaults");
        AppConfig::default()
    });

    // --- Store: one handle for the process, injected into the gateway ---
    let mut sqlite: Option<Arc<SqliteStore>> = None;
    let store: Arc<dyn SubmissionStore> = match cfg.store_backend() {
        StoreBackend::Sqlite => {
            let s = Arc::new(
                SqliteStore::connect(cfg.data_dir_or_default())
                    .await
                    .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
            );
            sqlite = Some(Arc::clone(&s));
            s
        }
        StoreBackend::Memory => {
            warn!("PORTFOLIO_STORE=memory: submissions are not persisted across restarts");
            Arc::new(MemoryStore::new())
        }
    };

    // --- Services ---
    let bound = cfg.write_timeout();
    info!(bound_secs = bound.as_secs(), "store call bound");
    let gateway = StoreGateway::new(store, bound);
    let intake: Arc<dyn ContactIntakePort> =
        Arc::new(ContactService::new(gateway, cfg.list_cap_or_default()));

    let authorizer = StaticTokenAuthorizer::new(cfg.admin_token());
    if !authorizer.is_configured() {
        warn!("PORTFOLIO_ADMIN_TOKEN not set; admin reads are disabled");
    }
    let auth: Arc<dyn AdminAuthorizer> = Arc::new(authorizer);

    let dev_mode = cfg.is_development();
    if dev_mode {
        info!("development mode: store error detail is included in 500 responses");
    }
    let state = AppState::new(intake, auth, ResponseComposer::new(dev_mode));

    let origins = cfg.allowed_origins();
    info!(?origins, "CORS allow-list");
    let app = build_router(state, cors_layer(&origins));

    // --- Serve until Ctrl+C / SIGTERM ---
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port_or_default()));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(s) = sqlite {
        s.close();
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
