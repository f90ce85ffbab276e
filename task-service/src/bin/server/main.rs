use std::sync::Arc;

use auth::Authenticator;
use task_service::config::Config;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::service::AuthService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::repositories::InMemoryTaskRepository;
use task_service::outbound::repositories::InMemoryUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "task-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        run_mode = %config.run_mode,
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_ttl_seconds = config.jwt.ttl_seconds,
        issuer = %config.jwt.issuer,
        hash_cost = config.password.hash_cost,
        "Configuration loaded"
    );
    if config.jwt.secret == task_service::config::DEFAULT_JWT_SECRET {
        tracing::warn!("Using the built-in development JWT secret");
    }

    let authenticator = Arc::new(Authenticator::new(config.auth_settings())?);
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let task_repository = Arc::new(InMemoryTaskRepository::new());

    let auth_service = Arc::new(AuthService::new(user_repository, authenticator));
    let task_service = Arc::new(TaskService::new(task_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, task_service, config.request_timeout());

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
