//! Pipeline entry points
//!
//! [`AssetSync`] ties the pipeline together for the three actions:
//!
//! - **info** navigates the document and builds the asset list, then reports how
//!   many assets exist remotely and how many are already stored
//! - **import** synchronizes only assets whose destination path is free
//! - **reimport** synchronizes every asset, overwriting existing ones
//!
//! Runs are keyed by a [`RunKey`] whose progress slot is cleared when the run ends,
//! whether it succeeded or not.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::{Config, ProfileConfig};
use crate::error::{Error, Result};
use crate::extract::resolve_assets;
use crate::figma::{DesignApi, FigmaClient};
use crate::progress::{MemoryProgressStore, ProgressReporter, ProgressStore, RunKey};
use crate::store::{AssetStore, LocalAssetStore};
use crate::types::{
    AssetDescriptor, Event, ImportSummary, InfoSummary, ProfileSummary, ProgressMessage,
    SyncAction,
};

pub mod batching;
mod synchronizer;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use synchronizer::Synchronizer;

/// Buffer size of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Everything a single run needs, shared by the batching and persistence phases
pub(crate) struct SyncContext {
    pub(crate) index: usize,
    pub(crate) profile: ProfileConfig,
    pub(crate) container: String,
    pub(crate) key: RunKey,
    pub(crate) temp_dir: Option<PathBuf>,
    pub(crate) design: Arc<dyn DesignApi>,
    pub(crate) store: Arc<dyn AssetStore>,
    pub(crate) progress: ProgressReporter,
    pub(crate) event_tx: broadcast::Sender<Event>,
}

impl SyncContext {
    pub(crate) fn emit_event(&self, event: Event) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }
}

/// Figma asset synchronizer
///
/// Cheap to clone; clones share the API client, store, progress store and event
/// channel.
#[derive(Clone)]
pub struct AssetSync {
    config: Arc<Config>,
    design: Arc<dyn DesignApi>,
    store: Arc<dyn AssetStore>,
    progress: ProgressReporter,
    event_tx: broadcast::Sender<Event>,
}

impl AssetSync {
    /// Create a synchronizer with the bundled Figma client, local store and
    /// in-memory progress store
    ///
    /// # Example
    ///
    /// ```no_run
    /// use figma_assets_sync::{AssetSync, Config};
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::from_file(Path::new("figma.json"))?;
    /// let sync = AssetSync::new(config).await?;
    ///
    /// let info = sync.info(0).await?;
    /// println!("{}", info.message());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: Config) -> Result<Self> {
        let design = Arc::new(FigmaClient::new(&config.figma)?);
        let store = Arc::new(LocalAssetStore::new(&config.store).await?);
        let progress = Arc::new(MemoryProgressStore::new(config.progress.ttl));
        Ok(Self::with_components(config, design, store, progress))
    }

    /// Create a synchronizer from explicit components
    ///
    /// `progress_store` decides how long progress records live; `config.progress.ttl`
    /// only configures the store built by [`AssetSync::new`].
    pub fn with_components(
        config: Config,
        design: Arc<dyn DesignApi>,
        store: Arc<dyn AssetStore>,
        progress_store: Arc<dyn ProgressStore>,
    ) -> Self {
        let progress = ProgressReporter::new(progress_store);
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            config: Arc::new(config),
            design,
            store,
            progress,
            event_tx,
        }
    }

    /// Current configuration
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Subscribe to synchronization events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Listing of every configured profile
    pub fn profiles(&self) -> Vec<ProfileSummary> {
        self.config
            .profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| ProfileSummary::from_profile(index, profile))
            .collect()
    }

    /// Count available and already-stored assets without touching the store
    pub async fn info(&self, index: usize) -> Result<InfoSummary> {
        let profile = self.config.profile(index)?;
        let container = self.resolve_container(profile).await?;

        let assets = self.fetch_assets(index, profile).await?;
        let available = assets.len();
        let remaining = self.filter_existing(profile, &container, assets).await?;

        let summary = InfoSummary {
            available,
            skipped: available - remaining.len(),
        };
        tracing::info!(profile = index, available, skipped = summary.skipped, "Info complete");
        Ok(summary)
    }

    /// Import assets that are not stored yet, keyed by the profile's content
    pub async fn import(&self, index: usize) -> Result<ImportSummary> {
        let key = self.run_key(index)?;
        self.import_with_key(index, key).await
    }

    /// Import assets that are not stored yet, reporting progress under `key`
    pub async fn import_with_key(&self, index: usize, key: RunKey) -> Result<ImportSummary> {
        self.run(index, key, SyncAction::Import).await
    }

    /// Import every asset, overwriting existing ones, keyed by the profile's content
    pub async fn reimport(&self, index: usize) -> Result<ImportSummary> {
        let key = self.run_key(index)?;
        self.reimport_with_key(index, key).await
    }

    /// Import every asset, overwriting existing ones, reporting progress under `key`
    pub async fn reimport_with_key(&self, index: usize, key: RunKey) -> Result<ImportSummary> {
        self.run(index, key, SyncAction::Reimport).await
    }

    /// Default run key of a profile
    pub fn run_key(&self, index: usize) -> Result<RunKey> {
        RunKey::for_profile(self.config.profile(index)?)
    }

    /// Latest progress message of a profile's default run key
    pub async fn progress(&self, index: usize) -> Result<ProgressMessage> {
        let key = self.run_key(index)?;
        Ok(self.progress_for_key(&key).await)
    }

    /// Latest progress message under `key`
    pub async fn progress_for_key(&self, key: &RunKey) -> ProgressMessage {
        ProgressMessage {
            message: Some(self.progress.read(key).await),
        }
    }

    async fn run(&self, index: usize, key: RunKey, action: SyncAction) -> Result<ImportSummary> {
        self.emit_event(Event::RunStarted {
            profile: index,
            action,
        });
        tracing::info!(profile = index, %action, key = %key, "Run started");

        let result = self.run_pipeline(index, &key, action).await;

        self.progress.clear(&key).await;

        let message = match &result {
            Ok(summary) => {
                tracing::info!(
                    profile = index,
                    %action,
                    imported = summary.imported,
                    reimported = summary.reimported,
                    skipped = ?summary.skipped,
                    "Run finished"
                );
                summary.message()
            }
            Err(e) => {
                tracing::error!(profile = index, %action, error = %e, "Run failed");
                e.to_string()
            }
        };
        self.emit_event(Event::RunFinished {
            profile: index,
            action,
            message,
        });

        result
    }

    async fn run_pipeline(
        &self,
        index: usize,
        key: &RunKey,
        action: SyncAction,
    ) -> Result<ImportSummary> {
        let profile = self.config.profile(index)?;
        let container = self.resolve_container(profile).await?;

        let assets = self.fetch_assets(index, profile).await?;

        let (assets, skipped) = if action == SyncAction::Reimport {
            (assets, None)
        } else {
            let available = assets.len();
            let remaining = self.filter_existing(profile, &container, assets).await?;
            let skipped = available - remaining.len();
            (remaining, Some(skipped))
        };

        let ctx = SyncContext {
            index,
            profile: profile.clone(),
            container,
            key: key.clone(),
            temp_dir: self.config.store.temp_dir.clone(),
            design: Arc::clone(&self.design),
            store: Arc::clone(&self.store),
            progress: self.progress.clone(),
            event_tx: self.event_tx.clone(),
        };

        let mut synchronizer = Synchronizer::new(&ctx, assets.len());
        batching::run_batches(&ctx, assets, &mut synchronizer).await;
        let (imported, reimported) = synchronizer.finish();

        Ok(ImportSummary {
            imported,
            reimported,
            skipped,
        })
    }

    /// Destination container of a profile, checked against the store
    async fn resolve_container(&self, profile: &ProfileConfig) -> Result<String> {
        let container = profile.container()?;
        if !self.store.has_container(container).await? {
            return Err(Error::ContainerNotFound(container.to_string()));
        }
        Ok(container.to_string())
    }

    /// Fetch the document and build the profile's asset list
    async fn fetch_assets(
        &self,
        index: usize,
        profile: &ProfileConfig,
    ) -> Result<Vec<AssetDescriptor>> {
        let document = self.design.fetch_document(profile).await?;
        let assets = resolve_assets(&document, profile)?;
        tracing::debug!(profile = index, assets = assets.len(), "Resolved asset list");
        Ok(assets)
    }

    /// Drop assets whose destination path already exists
    async fn filter_existing(
        &self,
        profile: &ProfileConfig,
        container: &str,
        assets: Vec<AssetDescriptor>,
    ) -> Result<Vec<AssetDescriptor>> {
        let extension = profile.format.as_str();
        let mut remaining = Vec::with_capacity(assets.len());
        for asset in assets {
            if !self
                .store
                .exists(container, &asset.destination_path(extension))
                .await?
            {
                remaining.push(asset);
            }
        }
        Ok(remaining)
    }
}

impl std::fmt::Debug for AssetSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetSync")
            .field("profiles", &self.config.profiles.len())
            .finish_non_exhaustive()
    }
}
