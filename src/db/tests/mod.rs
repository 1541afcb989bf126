mod close;

use crate::db::NewAsset;

fn new_asset(container: &str, path: &str) -> NewAsset {
    NewAsset {
        container: container.to_string(),
        path: path.to_string(),
        title: path.rsplit_once('.').map_or(path, |(stem, _)| stem).to_string(),
        size_bytes: 6,
        sha256: "0".repeat(64),
        mime_type: "image/svg+xml".to_string(),
    }
}
