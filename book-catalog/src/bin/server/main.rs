use std::sync::Arc;

use book_catalog::config::Config;
use book_catalog::domain::book::service::BookService;
use book_catalog::inbound::http::router::create_router;
use book_catalog::inbound::http::router::AppState;
use book_catalog::outbound::repositories::InMemoryBookRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "book-catalog",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let repository = if config.catalog.seed {
        InMemoryBookRepository::seeded()?
    } else {
        InMemoryBookRepository::new()
    };
    tracing::info!(seeded = config.catalog.seed, "Catalog ready");

    let state = AppState {
        book_service: Arc::new(BookService::new(Arc::new(repository))),
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
