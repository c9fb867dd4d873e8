use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use karvan_api::catalog::CatalogStore;
use karvan_api::config::ServerConfig;
use karvan_api::reconcile::Reconciler;
use karvan_api::router::build_app_router;
use karvan_api::service::RegistrationService;
use karvan_api::state::AppState;
use karvan_db::journal::RegistrationJournal;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "karvan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = karvan_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    karvan_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    karvan_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Fallback journal ---
    let journal = Arc::new(
        RegistrationJournal::open(&config.data_dir)
            .await
            .expect("Failed to open registration journal"),
    );
    tracing::info!(path = %journal.path().display(), "Registration journal ready");

    // --- Catalog store ---
    let catalog = Arc::new(CatalogStore::new(&config.catalog_dir));

    // --- Registration service ---
    let registrations = Arc::new(RegistrationService::new(pool.clone(), Arc::clone(&journal)));

    // --- Reconciler ---
    let reconcile_cancel = tokio_util::sync::CancellationToken::new();
    let reconciler = Reconciler::new(
        pool.clone(),
        Arc::clone(&journal),
        Duration::from_secs(config.reconcile_interval_secs),
    );
    let reconcile_cancel_clone = reconcile_cancel.clone();
    let reconcile_handle = tokio::spawn(async move {
        reconciler.run(reconcile_cancel_clone).await;
    });
    tracing::info!("Reconciler started");

    // --- App state & router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog,
        registrations,
    };
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
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    reconcile_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), reconcile_handle).await;
    tracing::info!("Reconciler stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
