//! Asset list construction: flattening, deduplication, renaming, transformation.

use std::collections::HashSet;

use crate::config::ProfileConfig;
use crate::naming::{normalize_child_name, optimize_variant_name};
use crate::types::{AssetDescriptor, DocumentNode};

/// Turn navigated nodes into the final asset list of a profile
///
/// Steps, in order:
/// 1. flatten (expanding variant children when `export_children` is set)
/// 2. drop later descriptors whose name was already seen
/// 3. optimize variant names when `optimize_variant_names` is set
/// 4. hand the list to the profile's list transform, if any, and use its result as-is
///
/// Optimization runs after deduplication, so two names that only collide once
/// optimized both survive and resolve to the same destination path.
pub fn build_asset_list(nodes: &[DocumentNode], profile: &ProfileConfig) -> Vec<AssetDescriptor> {
    let mut assets = dedupe_by_name(flatten_nodes(nodes, profile.export_children));

    if profile.optimize_variant_names {
        for asset in &mut assets {
            asset.name = optimize_variant_name(&asset.name);
        }
    }

    match &profile.list_transform {
        Some(hook) => hook.apply(assets),
        None => assets,
    }
}

/// Emit one descriptor per node, or one per child for nodes with children
///
/// Child descriptors are named `<parent name>/<normalized child name>`.
pub fn flatten_nodes(nodes: &[DocumentNode], export_children: bool) -> Vec<AssetDescriptor> {
    nodes
        .iter()
        .flat_map(|node| {
            let children = node.children();
            if !export_children || children.is_empty() {
                vec![AssetDescriptor::new(&node.id, &node.name)]
            } else {
                children
                    .iter()
                    .map(|child| {
                        AssetDescriptor::new(
                            &child.id,
                            format!("{}/{}", node.name, normalize_child_name(&child.name)),
                        )
                    })
                    .collect()
            }
        })
        .collect()
}

/// Keep the first descriptor of each distinct name, preserving order
pub fn dedupe_by_name(assets: Vec<AssetDescriptor>) -> Vec<AssetDescriptor> {
    let mut seen = HashSet::with_capacity(assets.len());
    assets
        .into_iter()
        .filter(|asset| seen.insert(asset.name.clone()))
        .collect()
}
