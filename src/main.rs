use axum::extract::FromRef;
use config::{Environment, File};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_sessions::MemoryStore;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{Layer, layer::SubscriberExt};

use crate::db::{MemStore, bill::BillStore, fixtures};

mod db;
mod web;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub address: std::net::SocketAddr,
    pub domain: String,
    pub cookie_secure: bool,
    pub log_level: String,
    /// Seed the store with demo bills for `seed_email`
    pub seed_fixtures: bool,
    #[serde(default = "default_seed_email")]
    pub seed_email: String,
}

fn default_seed_email() -> String {
    "employee@test.tld".to_string()
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(File::with_name(&format!(
                "{}/config/config.toml",
                env!("CARGO_MANIFEST_DIR")
            )))
            .add_source(Environment::with_prefix("BILLED").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Clone, FromRef)]
pub struct Ctx {
    pub bill_store: Arc<dyn BillStore>,
    pub config: Config,
    pub session_store: MemoryStore,
}

impl Ctx {
    pub async fn new(cfg: &Config) -> Result<Self, anyhow::Error> {
        let store = MemStore::new();
        if cfg.seed_fixtures {
            store.init(fixtures::seed(&cfg.seed_email)).await?;
        }
        Ok(Self::with_store(Arc::new(store), cfg))
    }

    pub fn with_store(bill_store: Arc<dyn BillStore>, cfg: &Config) -> Self {
        Self {
            bill_store,
            config: cfg.to_owned(),
            session_store: MemoryStore::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cfg = Config::new()?;

    tracing_log::LogTracer::init()?;
    let level_filter = LevelFilter::from_str(&cfg.log_level)?;
    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level_filter);
    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(stdout_log))?;

    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .inspect_err(|e| error!("Failed to bind to listen address {}: {e}", cfg.address))?;
    let ctx = Ctx::new(&cfg).await?;
    info!(
        "Billed running at http://{} with log-level={}",
        cfg.address, cfg.log_level
    );
    axum::serve(
        listener,
        web::router(ctx, &cfg).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_handler())
    .await?;

    Ok(())
}

async fn shutdown_handler() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("to install ctrl_c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
