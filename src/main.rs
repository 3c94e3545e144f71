//! HTTP server for the payroll engine.
//!
//! Environment:
//! - `KR_PAYROLL_CONFIG`: configuration directory (default `./config/kr`)
//! - `KR_PAYROLL_DB`: SQLite record database (default `payroll.db`)
//! - `KR_PAYROLL_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info,kr_payroll=debug`)

use std::env;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use kr_payroll::api::{AppState, create_router};
use kr_payroll::config::ConfigLoader;
use kr_payroll::store::SqliteRecordStore;

const DEFAULT_LOG_DIRECTIVES: &str = "info,kr_payroll=debug";
const DEFAULT_CONFIG_DIR: &str = "./config/kr";
const DEFAULT_DB_PATH: &str = "payroll.db";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config_dir = env::var("KR_PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let db_path = env::var("KR_PAYROLL_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.into());
    let addr = env::var("KR_PAYROLL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        locale = %config.locale().name,
        holidays = config.calendar().len(),
        "Configuration loaded"
    );

    let store = SqliteRecordStore::open(&db_path)?;
    let router = create_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
