//! # figma-assets-sync
//!
//! Synchronizes assets exported from a Figma design file into a local asset store.
//!
//! A [`Config`] holds an ordered list of export profiles. For a chosen profile the
//! pipeline fetches the document, walks to the configured page (and optional
//! frame), builds a deduplicated list of assets, resolves export URLs in metadata
//! batches, downloads content in bounded concurrent sub-batches and writes each
//! asset to the store, skipping or overwriting existing ones.
//!
//! ## Quick Start
//!
//! ```no_run
//! use figma_assets_sync::{AssetSync, Config};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file(Path::new("figma.json"))?;
//!     let sync = AssetSync::new(config).await?;
//!
//!     // Subscribe to events
//!     let mut events = sync.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     println!("{}", sync.info(0).await?.message());
//!     println!("{}", sync.import(0).await?.message());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Document navigation and asset list construction
pub mod extract;
/// Figma REST API access
pub mod figma;
/// Embedder-supplied list transform and before-upload hooks
pub mod hooks;
/// Asset name normalization
pub mod naming;
/// Run progress reporting
pub mod progress;
/// Destination asset store
pub mod store;
/// Synchronization pipeline
pub mod sync;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, ExportFormat, ProfileConfig};
pub use db::Database;
pub use error::{ApiError, DatabaseError, Error, ErrorDetail, Result, StoreError, ToHttpStatus};
pub use figma::{DesignApi, FigmaClient};
pub use hooks::{AssetListTransform, BeforeUpload};
pub use progress::{MemoryProgressStore, ProgressStore, RunKey};
pub use store::{AssetStore, LocalAssetStore};
pub use sync::AssetSync;
pub use types::{
    AssetDescriptor, DocumentNode, Event, ImportSummary, InfoSummary, ProfileSummary,
    ProgressMessage, SyncAction,
};
