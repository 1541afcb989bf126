//! Progress reporting for in-flight runs
//!
//! Progress is advisory: each run owns a single slot in a key-value store, holding
//! only the latest message. The slot expires after a TTL and is cleared when the run
//! ends, at which point readers see [`DEFAULT_PROGRESS_MESSAGE`] again.

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ProfileConfig;
use crate::error::Result;

/// Prefix of content-derived run keys
pub const PROGRESS_KEY_PREFIX: &str = "figma_progress_";

/// Message reported when no progress record exists
pub const DEFAULT_PROGRESS_MESSAGE: &str = "Processing...";

/// Default lifetime of a progress record
pub const DEFAULT_PROGRESS_TTL: Duration = Duration::from_secs(600);

/// Longest accepted lifetime of a progress record
pub const MAX_PROGRESS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Opaque identifier of a run's progress slot
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RunKey(String);

impl RunKey {
    /// Use a caller-supplied key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive the key from a profile's serialized content
    ///
    /// Byte-identical profiles share a key; hooks are not part of the content.
    pub fn for_profile(profile: &ProfileConfig) -> Result<Self> {
        let content = serde_json::to_vec(profile)?;
        Ok(Self(format!(
            "{}{:x}",
            PROGRESS_KEY_PREFIX,
            md5::compute(content)
        )))
    }

    /// Key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value store backing the progress reporter
///
/// Records expire after a lifetime chosen by the store.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Store `message` under `key`, replacing any previous value
    async fn put(&self, key: &str, message: String);

    /// Current value under `key`, if present and not expired
    async fn get(&self, key: &str) -> Option<String>;

    /// Delete the value under `key`
    async fn remove(&self, key: &str);
}

/// Process-local [`ProgressStore`] backed by a moka cache
#[derive(Clone)]
pub struct MemoryProgressStore {
    entries: Cache<String, String>,
}

impl MemoryProgressStore {
    /// Create an empty store whose records live for `ttl`
    ///
    /// `ttl` is capped at [`MAX_PROGRESS_TTL`].
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .time_to_live(ttl.min(MAX_PROGRESS_TTL))
                .build(),
        }
    }
}

impl Default for MemoryProgressStore {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_TTL)
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn put(&self, key: &str, message: String) {
        self.entries.insert(key.to_string(), message).await;
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).await
    }

    async fn remove(&self, key: &str) {
        self.entries.invalidate(key).await;
    }
}

impl std::fmt::Debug for MemoryProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryProgressStore")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

/// Writes and reads run progress messages
#[derive(Clone)]
pub struct ProgressReporter {
    store: Arc<dyn ProgressStore>,
}

impl ProgressReporter {
    /// Create a reporter over `store`
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Replace the run's progress message
    pub async fn update(&self, key: &RunKey, message: impl Into<String>) {
        self.store.put(key.as_str(), message.into()).await;
    }

    /// Drop the run's progress record
    pub async fn clear(&self, key: &RunKey) {
        self.store.remove(key.as_str()).await;
    }

    /// Latest message, or [`DEFAULT_PROGRESS_MESSAGE`] when none is stored
    pub async fn read(&self, key: &RunKey) -> String {
        self.store
            .get(key.as_str())
            .await
            .unwrap_or_else(|| DEFAULT_PROGRESS_MESSAGE.to_string())
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter").finish_non_exhaustive()
    }
}
