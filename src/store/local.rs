//! Filesystem + SQLite implementation of [`AssetStore`].

use async_trait::async_trait;
use moka::future::Cache;
use std::path::{Component, Path, PathBuf};

use super::{Asset, AssetMetadata, AssetStore};
use crate::config::StoreConfig;
use crate::db::{AssetContentUpdate, Database, NewAsset};
use crate::error::{DatabaseError, Error, Result, StoreError};

type CacheKey = (String, String);

/// Most metadata entries kept in memory
const METADATA_CACHE_CAPACITY: u64 = 10_000;

/// Local asset store
///
/// Content lives at `<root>/<container>/<path>`; one SQLite row per asset records
/// its title and content metadata. Metadata reads go through an in-memory cache
/// that is invalidated and regenerated whenever content is overwritten.
pub struct LocalAssetStore {
    root: PathBuf,
    containers: Vec<String>,
    db: Database,
    metadata_cache: Cache<CacheKey, AssetMetadata>,
}

impl LocalAssetStore {
    /// Open the store, creating container directories and the database as needed
    pub async fn new(config: &StoreConfig) -> Result<Self> {
        for container in &config.containers {
            tokio::fs::create_dir_all(config.root.join(container)).await?;
        }
        let db = Database::new(&config.database_path).await?;

        tracing::debug!(
            root = %config.root.display(),
            containers = ?config.containers,
            "Opened local asset store"
        );

        Ok(Self {
            root: config.root.clone(),
            containers: config.containers.clone(),
            db,
            metadata_cache: Cache::new(METADATA_CACHE_CAPACITY),
        })
    }

    /// Metadata of the asset at `path`, served from cache when possible
    pub async fn metadata(&self, container: &str, path: &str) -> Result<Option<AssetMetadata>> {
        let key = (container.to_string(), path.to_string());
        if let Some(meta) = self.metadata_cache.get(&key).await {
            return Ok(Some(meta));
        }

        let Some(record) = self.db.find_asset(container, path).await? else {
            return Ok(None);
        };
        let meta = AssetMetadata::from(&record);
        self.metadata_cache.insert(key, meta.clone()).await;
        Ok(Some(meta))
    }

    /// Read an asset's stored content
    pub async fn read(&self, asset: &Asset) -> Result<Vec<u8>> {
        let file = self.resolve(&asset.container, &asset.path)?;
        Ok(tokio::fs::read(file).await?)
    }

    /// All assets of a container, ordered by path
    pub async fn list(&self, container: &str) -> Result<Vec<Asset>> {
        Ok(self
            .db
            .list_assets(container)
            .await?
            .into_iter()
            .map(Asset::from)
            .collect())
    }

    /// Close the underlying database
    pub async fn close(self) {
        self.db.close().await;
    }

    /// Absolute file location of a container-relative path
    ///
    /// Paths are `/`-separated segments. Absolute paths and empty, `.` or `..`
    /// segments are rejected, so every accepted path names a distinct file.
    fn resolve(&self, container: &str, path: &str) -> Result<PathBuf> {
        let invalid = |reason: &str| StoreError::InvalidPath {
            path: PathBuf::from(path),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("empty path").into());
        }
        if path.starts_with('/') {
            return Err(invalid("path must be relative to the container").into());
        }
        if let Some(segment) = path
            .split('/')
            .find(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return Err(invalid(&format!("invalid path segment {:?}", segment)).into());
        }

        let relative = Path::new(path);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(invalid("path must stay inside the container").into());
        }

        Ok(self.root.join(container).join(relative))
    }

    async fn write_file(file: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(file, content).await?;
        Ok(())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn has_container(&self, container: &str) -> Result<bool> {
        Ok(self.containers.iter().any(|c| c == container))
    }

    async fn find(&self, container: &str, path: &str) -> Result<Option<Asset>> {
        Ok(self.db.find_asset(container, path).await?.map(Asset::from))
    }

    async fn exists(&self, container: &str, path: &str) -> Result<bool> {
        self.db.asset_exists(container, path).await
    }

    async fn create(
        &self,
        container: &str,
        path: &str,
        title: &str,
        content: &[u8],
    ) -> Result<Asset> {
        if !self.has_container(container).await? {
            return Err(Error::ContainerNotFound(container.to_string()));
        }
        let file = self.resolve(container, path)?;
        let meta = AssetMetadata::compute(path, content);

        let id = self
            .db
            .insert_asset(&NewAsset {
                container: container.to_string(),
                path: path.to_string(),
                title: title.to_string(),
                size_bytes: meta.size_bytes as i64,
                sha256: meta.sha256.clone(),
                mime_type: meta.mime_type.clone(),
            })
            .await
            .map_err(|e| match e {
                Error::Database(DatabaseError::ConstraintViolation(_)) => {
                    StoreError::AlreadyExists {
                        container: container.to_string(),
                        path: path.to_string(),
                    }
                    .into()
                }
                other => other,
            })?;

        if let Err(e) = Self::write_file(&file, content).await {
            if let Err(cleanup) = self.db.delete_asset(id).await {
                tracing::warn!(id, error = %cleanup, "Failed to remove orphaned asset record");
            }
            return Err(e);
        }

        let created_at = meta.updated_at;
        self.metadata_cache
            .insert((container.to_string(), path.to_string()), meta)
            .await;

        tracing::debug!(container, path, id, "Created asset");

        Ok(Asset {
            id,
            container: container.to_string(),
            path: path.to_string(),
            title: title.to_string(),
            created_at,
        })
    }

    async fn overwrite(&self, asset: &Asset, content: &[u8]) -> Result<()> {
        let file = self.resolve(&asset.container, &asset.path)?;
        let key = (asset.container.clone(), asset.path.clone());

        self.metadata_cache.invalidate(&key).await;

        Self::write_file(&file, content).await?;

        let meta = AssetMetadata::compute(&asset.path, content);
        let updated = self
            .db
            .update_asset_content(
                asset.id,
                &AssetContentUpdate {
                    size_bytes: meta.size_bytes as i64,
                    sha256: meta.sha256.clone(),
                    mime_type: meta.mime_type.clone(),
                },
            )
            .await?;
        if !updated {
            return Err(StoreError::Missing {
                container: asset.container.clone(),
                path: asset.path.clone(),
            }
            .into());
        }

        self.metadata_cache.insert(key, meta).await;

        tracing::debug!(container = %asset.container, path = %asset.path, "Overwrote asset content");
        Ok(())
    }
}
