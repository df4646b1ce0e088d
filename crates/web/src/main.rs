use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use absences_client::AbsenceApi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use absences_web::config::ServerConfig;
use absences_web::dashboard::Dashboard;
use absences_web::router::build_app_router;
use absences_web::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "absences_web=debug,absences_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        absences_url = %config.absences_url,
        conflict_url = %config.conflict_url,
        "Loaded server configuration"
    );

    // --- Upstream client ---
    let api = AbsenceApi::with_timeout(
        config.absences_url.clone(),
        config.conflict_url.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    )
    .expect("Failed to build upstream HTTP client");

    // --- Dashboard ---
    let dashboard = Arc::new(Dashboard::new(Arc::new(api)));
    let (_, initial_cycle) = dashboard.spawn_refresh().await;
    tracing::info!("Initial aggregation cycle started");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        dashboard: Arc::clone(&dashboard),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = wait_for_signal().await;
            tracing::info!(signal, "Starting graceful shutdown");
        })
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    dashboard.shutdown();
    let _ = tokio::time::timeout(Duration::from_secs(5), initial_cycle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Resolve once SIGINT or (on Unix) SIGTERM arrives, naming the signal.
async fn wait_for_signal() -> &'static str {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
