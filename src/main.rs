use anyhow::Result;
use std::time::Duration;

use roomcraft_backend::{app, auth, config, db, logging, services::RedisCache};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting RoomCraft backend"
    );

    let pool = db::create_pool(&settings).await?;
    if settings.run_migrations {
        db::run_migrations(&pool).await?;
    }

    let cache = RedisCache::new(&settings.redis_url, settings.redis_cache_ttl_seconds).await?;
    tracing::info!("Redis cache initialized");

    // Shared by the JWKS fetcher; per-request timeouts are set at call sites
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .build()?;

    let jwks_cache = auth::JwksCache::new(
        http_client,
        settings.supabase_jwt_jwks_url.clone(),
        settings.supabase_jwt_issuer.clone(),
        settings.supabase_jwt_audience.clone(),
        settings.jwks_cache_ttl_seconds,
    );

    if let Err(e) = jwks_cache.warm_cache().await {
        tracing::warn!(error = %e, "Failed to warm JWKS cache - will fetch on first request");
    }

    let state = app::AppState::new(pool, settings.clone(), jwks_cache, cache);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
