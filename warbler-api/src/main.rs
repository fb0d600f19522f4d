//! # Warbler API Server
//!
//! A multi-user short-post service: account registration, session
//! lifecycle (login, token refresh, revocation), post CRUD, a billing
//! partner webhook, and operator metrics.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p warbler-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warbler_api::{app, config::Config};
use warbler_shared::db::{migrations, pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warbler_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Warbler API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let state = app::AppState::new(db, config);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on http://{}", bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
