use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webtoapp_analysis::{OfflineAnalyzer, OpenAiAnalyzer, OpenAiConfig, SiteAnalyzer};
use webtoapp_api::auth::verification::VerificationCodes;
use webtoapp_api::config::ServerConfig;
use webtoapp_api::router::build_app_router;
use webtoapp_api::state::AppState;
use webtoapp_events::{EmailConfig, EmailDelivery, EventBus, EventPersistence, LogNotifier, Notifier};
use webtoapp_pipeline::{JobRunner, PgAppStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "webtoapp_api=debug,webtoapp_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = webtoapp_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    webtoapp_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    webtoapp_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let persistence_handle = tokio::spawn(EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));
    tracing::info!("Event bus and persistence started");

    // --- Collaborators ---
    let analyzer: Arc<dyn SiteAnalyzer> = match OpenAiConfig::from_env() {
        Some(openai) => {
            tracing::info!(model = %openai.model, "Using OpenAI site analyzer");
            Arc::new(OpenAiAnalyzer::new(openai).expect("Failed to build OpenAI client"))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, analysis will return fallback reports");
            Arc::new(OfflineAnalyzer)
        }
    };

    let notifier: Arc<dyn Notifier> = match EmailConfig::from_env() {
        Some(email) => {
            tracing::info!(smtp_host = %email.smtp_host, "Using SMTP email delivery");
            Arc::new(EmailDelivery::new(email))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let runner = JobRunner::new(
        Arc::new(PgAppStore::new(pool.clone())),
        Arc::clone(&analyzer),
        Arc::clone(&event_bus),
        config.generation,
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        runner,
        analyzer,
        notifier,
        verification_codes: Arc::new(VerificationCodes::new()),
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

    // In-flight generation runs hold their own bus handles; persistence stops
    // once the last sender is dropped or the timeout elapses.
    drop(event_bus);
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        persistence_handle,
    )
    .await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
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
