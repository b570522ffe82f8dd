mod api;
mod config;
mod db;
mod error;
mod reset;
mod results;
mod types;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::db::Store;
use crate::error::Result;
use crate::reset::MidnightReset;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Database setup ---
    let store = Store::connect(&cfg.database_url).await?;
    info!("Database ready");

    // --- First-run data ---
    store.seed_defaults().await;

    // --- Midnight IST reset ---
    if cfg.reset_enabled {
        let job = MidnightReset::new(store.clone());
        tokio::spawn(async move { job.run().await });
    } else {
        warn!("RESET_ENABLED is off; markets will not be cleared at midnight IST");
    }

    // --- HTTP API server ---
    let app = router(ApiState { store });
    let bind_addr = format!("0.0.0.0:{}", cfg.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
