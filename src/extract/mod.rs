//! Resolution of the exportable asset list from a Figma document tree.
//!
//! - [`navigator`] - locate the configured page/frame and yield its nodes
//! - [`assets`] - flatten, deduplicate, rename, and transform the nodes into descriptors

pub mod assets;
pub mod navigator;

pub use assets::{build_asset_list, dedupe_by_name, flatten_nodes};
pub use navigator::navigate;

use crate::config::ProfileConfig;
use crate::error::Result;
use crate::types::{AssetDescriptor, DocumentNode};

/// Run the navigator and the list builder for one profile
pub fn resolve_assets(root: &DocumentNode, profile: &ProfileConfig) -> Result<Vec<AssetDescriptor>> {
    let nodes = navigate(root, profile)?;
    Ok(build_asset_list(nodes, profile))
}
