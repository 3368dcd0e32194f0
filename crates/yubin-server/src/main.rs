mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use yubin_db::{ConnectRetry, PgAccessLogStore, PoolConfig};
use yubin_geoapi::{GeoApiClient, GeoApiClientConfig};
use yubin_resolver::Resolver;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = yubin_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting yubin-server");

    let pool = yubin_db::connect_pool_with_retry(
        &config.database_url,
        PoolConfig::from_app_config(&config),
        ConnectRetry::from_app_config(&config),
    )
    .await?;
    yubin_db::run_migrations(&pool).await?;

    let geo = GeoApiClient::new(GeoApiClientConfig::from_app_config(&config))?;

    let app = build_app(AppState {
        geo: Arc::new(geo),
        access_logs: Arc::new(PgAccessLogStore::new(pool)),
        resolver: Resolver::default(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
