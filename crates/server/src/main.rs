use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tally_import::ProcessConfig;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = PathBuf::from(std::env::var("TALLY_DATA_DIR").unwrap_or_else(|_| "data".into()));
    let upload_dir = data_dir.join("uploads");
    let processed_dir = data_dir.join("processed");
    std::fs::create_dir_all(&upload_dir).context("creating upload directory")?;
    std::fs::create_dir_all(&processed_dir).context("creating processed directory")?;

    let config = match std::env::var("TALLY_CONFIG") {
        Ok(path) => {
            let content =
                std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            ProcessConfig::from_toml(&content).with_context(|| format!("parsing {path}"))?
        }
        Err(_) => ProcessConfig::default(),
    };

    let state = Arc::new(AppState {
        upload_dir,
        processed_dir,
        config,
    });

    let addr = std::env::var("TALLY_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, routes::router(state)).await?;
    Ok(())
}
