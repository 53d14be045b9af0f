use std::str::FromStr;
use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::SystemClock;
use secrecy::ExposeSecret;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use todo_service::config::Config;
use todo_service::domain::authentication::service::AuthService;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::inbound::http::router::AppState;
use todo_service::outbound::repositories;
use todo_service::outbound::repositories::SqliteTodoRepository;
use todo_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        jwt_algorithm = ?config.jwt.algorithm,
        token_ttl_minutes = config.jwt.expiration_minutes,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    repositories::migrate(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let jwt_handler = JwtHandler::with_algorithm(
        config.jwt.secret.expose_secret().as_bytes(),
        config.jwt.algorithm,
    )?;
    let authenticator = Arc::new(Authenticator::with_handler(
        jwt_handler,
        Arc::new(SystemClock),
    ));

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let todo_repository = Arc::new(SqliteTodoRepository::new(pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(Arc::clone(&user_repository))),
        todo_service: Arc::new(TodoService::new(todo_repository)),
        auth_service: Arc::new(AuthService::new(
            user_repository,
            authenticator,
            chrono::Duration::minutes(config.jwt.expiration_minutes),
        )),
        cookie_secure: config.cookie.secure,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited");

    Ok(())
}
