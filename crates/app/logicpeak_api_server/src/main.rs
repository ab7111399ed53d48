//! Logic Peak API server binary.
//!
//! Reads configuration from flags or the environment (a `.env` file is
//! honoured), builds the document store and serves the HTTP API until
//! Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use logicpeak_api::AppState;
use logicpeak_api::config::ApiConfig;
use logicpeak_core::store::postgres::PoolSettings;
use logicpeak_core::store::{DocumentStore, PgDocumentStore};
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "logicpeak_api_server", about = "Logic Peak API server")]
struct Args {
    /// Interface to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// PostgreSQL connection URL. Without it the API runs with no store and
    /// data endpoints fail.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database name, overriding the one in the connection URL.
    #[arg(long, env = "DATABASE_NAME")]
    database_name: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Seconds to wait for a pooled connection before an operation fails.
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    acquire_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,logicpeak_api=debug,logicpeak_core=debug",
                )
            }),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig::new(
        &args.host,
        args.port,
        args.database_url.as_deref(),
        args.database_name.as_deref(),
    );

    info!(
        bind_addr = %config.bind_addr,
        database_url_set = config.database_url_set,
        database_name_set = config.database_name_set,
        "starting logicpeak_api_server"
    );

    let pg_store = match args.database_url.as_deref().filter(|_| config.database_url_set) {
        Some(url) => {
            let settings = PoolSettings {
                max_connections: args.max_connections,
                acquire_timeout: Duration::from_secs(args.acquire_timeout_secs),
            };
            let store = Arc::new(PgDocumentStore::connect_lazy(
                url,
                args.database_name.as_deref(),
                &settings,
            )?);
            info!(
                database = store.database_name().unwrap_or("unknown"),
                max_connections = settings.max_connections,
                "configured document store"
            );

            // The database may come up after us; data endpoints report the failure.
            info!("running database migrations");
            if let Err(e) = store.migrate().await {
                warn!(error = %e, "database migrations failed");
            }
            Some(store)
        }
        None => {
            warn!("DATABASE_URL not set, running without a document store");
            None
        }
    };

    let state = AppState {
        store: pg_store
            .clone()
            .map(|store| store as Arc<dyn DocumentStore>),
        config: config.clone(),
    };

    let app = logicpeak_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(store) = pg_store {
        store.close().await;
    }

    result?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
