//! Persistence of downloaded assets into the destination store.

use super::SyncContext;
use crate::error::{Error, Result};
use crate::types::{AssetDescriptor, Event};

/// Creates or overwrites store assets and keeps the run's counters
///
/// Owned by the coordinating task of a run; counters and the progress message are
/// only ever written from here.
pub(super) struct Synchronizer<'a> {
    ctx: &'a SyncContext,
    total: usize,
    imported: usize,
    reimported: usize,
}

impl<'a> Synchronizer<'a> {
    /// `total` is the number of assets entering synchronization
    pub(super) fn new(ctx: &'a SyncContext, total: usize) -> Self {
        Self {
            ctx,
            total,
            imported: 0,
            reimported: 0,
        }
    }

    /// Persist one downloaded asset
    ///
    /// Failures are logged with the asset's name and leave the counters untouched.
    pub(super) async fn persist(&mut self, asset: &AssetDescriptor, content: Vec<u8>) {
        match self.write(asset, content).await {
            Ok(Written::Created) => self.imported += 1,
            Ok(Written::Overwritten) => self.reimported += 1,
            Err(e) => {
                tracing::error!(
                    profile = self.ctx.index,
                    asset = %asset.name,
                    error = %e,
                    "Failed to persist asset"
                );
                return;
            }
        }

        let message = format!("Imported {}/{}", self.imported + self.reimported, self.total);
        self.ctx.progress.update(&self.ctx.key, message).await;
    }

    /// Final `(imported, reimported)` counts
    pub(super) fn finish(self) -> (usize, usize) {
        (self.imported, self.reimported)
    }

    async fn write(&self, asset: &AssetDescriptor, content: Vec<u8>) -> Result<Written> {
        let ctx = self.ctx;
        let path = asset.destination_path(ctx.profile.format.as_str());

        // Staged on disk so the before-upload hook can process the file
        let staged = self.stage(&content).await?;
        let upload = match &ctx.profile.before_upload {
            Some(hook) => {
                let hook = hook.clone();
                let staged_path = staged.path().to_path_buf();
                let processed = tokio::task::spawn_blocking(move || hook.apply(&staged_path))
                    .await
                    .map_err(|e| Error::Other(format!("before-upload hook panicked: {}", e)))??;
                let read = tokio::fs::read(&processed).await;
                if processed.as_path() != staged.path() {
                    if let Err(e) = tokio::fs::remove_file(&processed).await {
                        tracing::debug!(
                            path = %processed.display(),
                            error = %e,
                            "Failed to remove processed file"
                        );
                    }
                }
                read?
            }
            None => content,
        };

        let written = match ctx.store.find(&ctx.container, &path).await? {
            Some(existing) => {
                ctx.store.overwrite(&existing, &upload).await?;
                tracing::debug!(asset = %asset.name, path = %path, "Reuploaded asset");
                ctx.emit_event(Event::AssetReuploaded {
                    container: ctx.container.clone(),
                    path,
                });
                Written::Overwritten
            }
            None => {
                ctx.store
                    .create(&ctx.container, &path, &asset.name, &upload)
                    .await?;
                tracing::debug!(asset = %asset.name, path = %path, "Created asset");
                ctx.emit_event(Event::AssetCreated {
                    container: ctx.container.clone(),
                    path,
                });
                Written::Created
            }
        };

        drop(staged);
        Ok(written)
    }

    /// Write content to a temporary file in the configured temp directory
    async fn stage(&self, content: &[u8]) -> Result<tempfile::NamedTempFile> {
        let suffix = format!(".{}", self.ctx.profile.format.as_str());
        let mut builder = tempfile::Builder::new();
        builder.prefix("figma-asset-").suffix(&suffix);

        let staged = match &self.ctx.temp_dir {
            Some(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };
        tokio::fs::write(staged.path(), content).await?;
        Ok(staged)
    }
}

enum Written {
    Created,
    Overwritten,
}
