//! aulario HTTP API.
//!
//! Wires the Record Store, the Identity Provider adapter, the mail
//! notifier, and the services into an axum application.

mod config;
mod error;
mod logging;
mod routes;
mod state;

use std::sync::Arc;

use config::Config;
use state::AppState;
use tokio::signal;
use tracing::info;

use aulario_academics::AcademicsService;
use aulario_identity::HttpIdentityProvider;
use aulario_store::MemoryStore;
use aulario_sync::{HttpNotifier, UserSyncService};

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values).
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting aulario API"
    );

    let provider = match HttpIdentityProvider::new(
        &config.identity_api_url,
        &config.identity_secret_key,
        config.request_timeout,
    ) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            eprintln!("Failed to build identity provider client: {e}");
            std::process::exit(1);
        }
    };

    let notifier = match HttpNotifier::new(
        &config.mail_api_url,
        &config.mail_api_key,
        &config.mail_from,
        config.request_timeout,
    ) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            eprintln!("Failed to build mail client: {e}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(MemoryStore::new());

    let sync = Arc::new(UserSyncService::new(
        store.clone(),
        provider,
        notifier,
        config.login_url.clone(),
    ));
    let academics = Arc::new(AcademicsService::new(store));

    let app = routes::app(AppState::new(sync, academics, &config.webhook_secret));

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "Listening");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Resolve when ctrl-c (or SIGTERM on unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            eprintln!("Failed to install ctrl-c handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => eprintln!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
