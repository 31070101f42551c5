use sql_connection::connect_postgres_db;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_dao::UserDao;
use user_http::UserServices;

mod app;
mod config;
mod features;

use app::AppState;
use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!("Initializing connection pool...");
    let db = connect_postgres_db(&config.database).await?;
    info!("PostgreSQL connection pool initialized");

    let state = AppState::new(UserServices::new(UserDao::new(db)));
    let app = app::router(state, &config.filepath_root);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        "Chirpy server starting on {} (serving {} under /app)",
        listener.local_addr()?,
        config.filepath_root.display()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
