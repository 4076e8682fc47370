use std::sync::Arc;

use anyhow::Context;
use board_service::config::Config;
use board_service::config::TokenStrategyKind;
use board_service::domain::token::OpaqueTokenAuthenticator;
use board_service::domain::token::SignedTokenAuthenticator;
use board_service::domain::user::service::AuthService;
use board_service::inbound::http::router::create_router;
use board_service::outbound::store::PostgresUserStore;
use board_service::user::ports::TokenAuthenticator;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "board_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "board-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_strategy = ?config.token.strategy,
        token_validity_hours = config.token.validity_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_store = Arc::new(PostgresUserStore::new(pg_pool));

    // A bad token configuration must surface here, before the listener binds
    let token_authenticator: Arc<dyn TokenAuthenticator> = match config.token.strategy {
        TokenStrategyKind::Signed => {
            let secret = config
                .token
                .secret
                .as_deref()
                .context("token.secret must be set for the signed token strategy")?;
            let validity = Duration::hours(config.token.validity_hours);

            Arc::new(
                SignedTokenAuthenticator::new(user_store.clone(), secret.as_bytes(), validity)
                    .context("signed token strategy rejected the configured secret")?,
            )
        }
        TokenStrategyKind::Opaque => Arc::new(OpaqueTokenAuthenticator::new(user_store.clone())),
    };

    let auth_service = Arc::new(AuthService::new(user_store, token_authenticator.clone()));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, token_authenticator);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
