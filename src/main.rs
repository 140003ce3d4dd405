use std::sync::Arc;

use anyhow::Context;
use avisgate::router::init_router;
use avisgate::state::AppState;
use avisgate::store::{InMemoryPrincipalStore, PgPrincipalStore, PrincipalStore};
use avisgate_config::{CorsConfig, JwtConfig, ServerConfig};
use avisgate_core::BcryptHasher;
use avisgate_observability::init_tracing;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let jwt_config = JwtConfig::from_env().context("Refusing to start")?;
    let server_config = ServerConfig::from_env();

    let principals: Arc<dyn PrincipalStore> = match &server_config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("Failed to connect to database")?;
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            info!("Using PostgreSQL principal store");
            Arc::new(PgPrincipalStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, principals are kept in memory and lost on restart");
            Arc::new(InMemoryPrincipalStore::new())
        }
    };

    let state = AppState::new(
        &jwt_config,
        CorsConfig::from_env(),
        principals,
        Arc::new(BcryptHasher::default()),
    )?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_addr))?;
    info!(addr = %server_config.bind_addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
