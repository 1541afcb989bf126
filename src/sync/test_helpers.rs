//! Shared test helpers: an in-memory design API and AssetSync instances over a
//! temporary local store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::{TempDir, tempdir};

use crate::config::{Config, ProfileConfig, StoreConfig};
use crate::error::{Error, Result};
use crate::figma::DesignApi;
use crate::progress::{MemoryProgressStore, ProgressStore};
use crate::store::LocalAssetStore;
use crate::sync::AssetSync;
use crate::types::DocumentNode;

/// In-memory [`DesignApi`]
///
/// Image URLs are `mem://<id>`; downloading one returns `<svg id="<id>"/>`.
pub(crate) struct FakeDesign {
    pub(crate) document: DocumentNode,
    /// Metadata requests containing any of these ids fail
    pub(crate) failing_ids: HashSet<String>,
    /// Ids the images endpoint returns no URL for
    pub(crate) missing_urls: HashSet<String>,
    /// Ids whose download fails
    pub(crate) failing_downloads: HashSet<String>,
    /// Ids whose download returns an empty body
    pub(crate) empty_downloads: HashSet<String>,
    pub(crate) document_calls: AtomicUsize,
    pub(crate) metadata_calls: AtomicUsize,
    pub(crate) download_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
    pub(crate) requested_batches: Mutex<Vec<Vec<String>>>,
}

impl FakeDesign {
    pub(crate) fn new(document: DocumentNode) -> Self {
        Self {
            document,
            failing_ids: HashSet::new(),
            missing_urls: HashSet::new(),
            failing_downloads: HashSet::new(),
            empty_downloads: HashSet::new(),
            document_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requested_batches: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DesignApi for FakeDesign {
    async fn fetch_document(&self, _profile: &ProfileConfig) -> Result<DocumentNode> {
        self.document_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.document.clone())
    }

    async fn fetch_image_urls(
        &self,
        _profile: &ProfileConfig,
        ids: &[&str],
    ) -> Result<HashMap<String, String>> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_batches
            .lock()
            .unwrap()
            .push(ids.iter().map(|id| id.to_string()).collect());

        if ids.iter().any(|id| self.failing_ids.contains(*id)) {
            return Err(Error::FigmaApi {
                status: 500,
                body: "render failed".into(),
            });
        }

        Ok(ids
            .iter()
            .filter(|id| !self.missing_urls.contains(**id))
            .map(|id| (id.to_string(), format!("mem://{}", id)))
            .collect())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let id = url.trim_start_matches("mem://");
        if self.failing_downloads.contains(id) {
            return Err(Error::Download {
                url: url.to_string(),
                status: 404,
            });
        }
        if self.empty_downloads.contains(id) {
            return Ok(Vec::new());
        }
        Ok(format!("<svg id=\"{}\"/>", id).into_bytes())
    }
}

/// Document with one page `Icons` holding the given nodes
pub(crate) fn icons_document(nodes: Vec<DocumentNode>) -> DocumentNode {
    DocumentNode::with_children(
        "0:0",
        "Document",
        vec![DocumentNode::with_children("0:1", "Icons", nodes)],
    )
}

/// `count` leaf nodes named `icon-<n>` with ids `1:<n>`
pub(crate) fn numbered_icons(count: usize) -> Vec<DocumentNode> {
    (0..count)
        .map(|n| DocumentNode::leaf(format!("1:{}", n), format!("icon-{}", n)))
        .collect()
}

/// Profile targeting page `Icons` in the `assets` container
pub(crate) fn icons_profile() -> ProfileConfig {
    ProfileConfig {
        title: Some("Icons".into()),
        token: Some("fig_test".into()),
        file_id: "FILE123".into(),
        page_title: "Icons".into(),
        assets_container: Some("assets".into()),
        ..Default::default()
    }
}

/// Config with the given profiles over a store rooted in `dir`
pub(crate) fn test_config(dir: &TempDir, profiles: Vec<ProfileConfig>) -> Config {
    Config {
        profiles,
        store: StoreConfig {
            root: dir.path().join("assets"),
            database_path: dir.path().join("assets.db"),
            containers: vec!["assets".into()],
            temp_dir: Some(dir.path().join("tmp")),
        },
        ..Default::default()
    }
}

/// AssetSync over `design` and a fresh local store
///
/// Returns the tempdir as well, which must be kept alive.
pub(crate) async fn create_test_sync(
    design: Arc<FakeDesign>,
    profiles: Vec<ProfileConfig>,
) -> (AssetSync, Arc<LocalAssetStore>, TempDir) {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, profiles);
    let store = Arc::new(LocalAssetStore::new(&config.store).await.unwrap());
    let progress: Arc<dyn ProgressStore> = Arc::new(MemoryProgressStore::default());

    let sync = AssetSync::with_components(config, design, store.clone(), progress);
    (sync, store, dir)
}

/// [`ProgressStore`] that records every write
#[derive(Default)]
pub(crate) struct RecordingProgressStore {
    inner: MemoryProgressStore,
    pub(crate) writes: Mutex<Vec<(String, String)>>,
    pub(crate) removals: Mutex<Vec<String>>,
}

#[async_trait]
impl ProgressStore for RecordingProgressStore {
    async fn put(&self, key: &str, message: String) {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), message.clone()));
        self.inner.put(key, message).await;
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await
    }

    async fn remove(&self, key: &str) {
        self.removals.lock().unwrap().push(key.to_string());
        self.inner.remove(key).await;
    }
}
