//! Destination asset store
//!
//! The pipeline only needs four capabilities from the store: look a path up,
//! create an asset, overwrite an asset's content, and report whether a container
//! exists. [`AssetStore`] captures exactly that; [`LocalAssetStore`] is the bundled
//! implementation (files on disk plus SQLite records).

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::AssetRecord;
use crate::error::Result;

mod local;

pub use local::LocalAssetStore;

/// A stored asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Store-assigned identifier
    pub id: i64,
    /// Container handle
    pub container: String,
    /// Container-relative path, including the extension
    pub path: String,
    /// Display title
    pub title: String,
    /// When the asset was created
    pub created_at: DateTime<Utc>,
}

impl From<AssetRecord> for Asset {
    fn from(row: AssetRecord) -> Self {
        Asset {
            id: row.id,
            container: row.container,
            path: row.path,
            title: row.title,
            created_at: Utc
                .timestamp_opt(row.created_at, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Derived metadata of an asset's current content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetMetadata {
    /// Content size in bytes
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// MIME type derived from the extension
    pub mime_type: String,
    /// Last content write
    pub updated_at: DateTime<Utc>,
}

impl AssetMetadata {
    /// Compute metadata for freshly written content
    pub fn compute(path: &str, content: &[u8]) -> Self {
        Self {
            size_bytes: content.len() as u64,
            sha256: sha256_hex(content),
            mime_type: mime_type_for_path(path).to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl From<&AssetRecord> for AssetMetadata {
    fn from(row: &AssetRecord) -> Self {
        AssetMetadata {
            size_bytes: row.size_bytes.max(0) as u64,
            sha256: row.sha256.clone(),
            mime_type: row.mime_type.clone(),
            updated_at: Utc
                .timestamp_opt(row.updated_at, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Capability interface of the destination asset store
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Whether the container handle is known to the store
    async fn has_container(&self, container: &str) -> Result<bool>;

    /// Look up the asset stored at `path` inside `container`
    async fn find(&self, container: &str, path: &str) -> Result<Option<Asset>>;

    /// Whether an asset exists at `path` inside `container`
    async fn exists(&self, container: &str, path: &str) -> Result<bool> {
        Ok(self.find(container, path).await?.is_some())
    }

    /// Create a new asset from uploaded content
    async fn create(
        &self,
        container: &str,
        path: &str,
        title: &str,
        content: &[u8],
    ) -> Result<Asset>;

    /// Replace an existing asset's content in place
    ///
    /// Cached metadata for the asset is invalidated and regenerated.
    async fn overwrite(&self, asset: &Asset, content: &[u8]) -> Result<()>;
}

/// MIME type for a destination path, keyed on its extension
pub fn mime_type_for_path(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn sha256_hex(content: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
