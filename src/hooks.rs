//! Injected capabilities that let embedders customize a profile's run
//!
//! - [`AssetListTransform`] rewrites the resolved asset list before anything is fetched
//! - [`BeforeUpload`] processes each downloaded file before it reaches the store
//!
//! Both are plain traits with blanket implementations for closures, so a profile can
//! be configured with `ProfileConfig::with_list_transform(|assets| ...)`.

use crate::error::{Result, StoreError};
use crate::types::AssetDescriptor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rewrites the asset list produced by the list builder
///
/// The returned list is used verbatim; no deduplication or validation is re-applied.
pub trait AssetListTransform: Send + Sync {
    /// Transform the full asset list
    fn transform(&self, assets: Vec<AssetDescriptor>) -> Vec<AssetDescriptor>;
}

impl<F> AssetListTransform for F
where
    F: Fn(Vec<AssetDescriptor>) -> Vec<AssetDescriptor> + Send + Sync,
{
    fn transform(&self, assets: Vec<AssetDescriptor>) -> Vec<AssetDescriptor> {
        self(assets)
    }
}

/// Processes a downloaded asset file before upload
///
/// Receives the path of a temporary file holding the downloaded content and returns
/// the path of the file to upload (which may be the same path, rewritten in place).
pub trait BeforeUpload: Send + Sync {
    /// Process the file at `path`
    fn process(&self, path: &Path) -> std::result::Result<PathBuf, String>;
}

impl<F> BeforeUpload for F
where
    F: Fn(&Path) -> std::result::Result<PathBuf, String> + Send + Sync,
{
    fn process(&self, path: &Path) -> std::result::Result<PathBuf, String> {
        self(path)
    }
}

/// Shared handle to an [`AssetListTransform`]
#[derive(Clone)]
pub struct ListTransformHook(Arc<dyn AssetListTransform>);

impl ListTransformHook {
    /// Wrap a transform
    pub fn new(transform: impl AssetListTransform + 'static) -> Self {
        Self(Arc::new(transform))
    }

    /// Apply the transform
    pub fn apply(&self, assets: Vec<AssetDescriptor>) -> Vec<AssetDescriptor> {
        self.0.transform(assets)
    }
}

impl std::fmt::Debug for ListTransformHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ListTransformHook(..)")
    }
}

/// Shared handle to a [`BeforeUpload`] processor
#[derive(Clone)]
pub struct BeforeUploadHook(Arc<dyn BeforeUpload>);

impl BeforeUploadHook {
    /// Wrap a processor
    pub fn new(processor: impl BeforeUpload + 'static) -> Self {
        Self(Arc::new(processor))
    }

    /// Run the processor, mapping its failure into a store error
    pub fn apply(&self, path: &Path) -> Result<PathBuf> {
        self.0.process(path).map_err(|reason| {
            StoreError::HookFailed {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }
}

impl std::fmt::Debug for BeforeUploadHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BeforeUploadHook(..)")
    }
}
