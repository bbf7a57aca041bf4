use std::sync::Arc;

use auth::Authenticator;
use order_service::config::Config;
use order_service::domain::order::service::OrderService;
use order_service::domain::user::models::RegisterCommand;
use order_service::domain::user::models::Role;
use order_service::domain::user::models::Username;
use order_service::domain::user::ports::SystemClock;
use order_service::domain::user::service::AuthService;
use order_service::inbound::http::router::create_router;
use order_service::inbound::http::router::HttpSettings;
use order_service::outbound::repositories::PostgresOrderRepository;
use order_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "order-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        host = %config.server.host,
        http_port = config.server.http_port,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_hours = config.jwt.refresh_ttl_hours,
        html_index = %config.html.index,
        request_timeout_secs = config.server.request_timeout_secs,
        body_limit_bytes = config.server.body_limit_bytes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // Refuses empty or identical secrets and out-of-range lifetimes
    let authenticator = Authenticator::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
        config.jwt.lifetimes()?,
    )?;

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let order_repository = Arc::new(PostgresOrderRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::new(SystemClock),
        authenticator,
    ));
    let order_service = Arc::new(OrderService::new(order_repository));

    if let Some(bootstrap) = config.bootstrap {
        let command = RegisterCommand::new(
            Role::Director,
            Username::new(bootstrap.director_username)?,
            bootstrap.director_password,
        );
        match auth_service.ensure_account(command).await? {
            Some(user_id) => tracing::info!(user_id = %user_id, "Bootstrap director created"),
            None => tracing::info!("Bootstrap director already present"),
        }
    }

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let settings = HttpSettings {
        index_file: config.html.index.into(),
        request_timeout: config.server.request_timeout(),
        body_limit: config.server.body_limit_bytes,
    };
    let http_application = create_router(auth_service, order_service, settings);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
