//! REST API server demo
//!
//! Loads a profile file and serves the control endpoints:
//!
//! ```text
//! cargo run --example serve -- figma.json
//! ```
//!
//! After starting, you can:
//! - List profiles via GET http://localhost:6790/api/v1/configs
//! - Count assets via POST http://localhost:6790/api/v1/info/0
//! - Import via POST http://localhost:6790/api/v1/import/0
//! - Poll progress via GET http://localhost:6790/api/v1/progress/0
//! - Stream events via GET http://localhost:6790/api/v1/events

use figma_assets_sync::api::start_api_server;
use figma_assets_sync::{AssetSync, Config};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("figma.json"));
    let config = Config::from_file(&path)?;

    for profile in &config.profiles {
        tracing::info!(
            title = profile.title.as_deref().unwrap_or("(untitled)"),
            file_id = %profile.file_id,
            page = %profile.page_title,
            "Loaded profile"
        );
    }

    let sync = Arc::new(AssetSync::new(config.clone()).await?);
    let config = Arc::new(config);

    println!("Swagger UI: http://{}/swagger-ui", config.server.api.bind_address);
    println!("Events stream: curl -N http://{}/api/v1/events", config.server.api.bind_address);

    start_api_server(sync, config).await?;
    Ok(())
}
