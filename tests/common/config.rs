//! Config and synchronizer helpers backed by a temporary store

use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use figma_assets_sync::config::{FigmaApiConfig, StoreConfig};
use figma_assets_sync::{AssetSync, Config, ProfileConfig};

use super::fixtures::{TEST_FILE_ID, TEST_TOKEN};

/// Container every fixture config declares
pub const TEST_CONTAINER: &str = "assets";

/// Profile exporting page `Icons` of the fixture file
pub fn icons_profile() -> ProfileConfig {
    ProfileConfig {
        title: Some("Icons".to_string()),
        token: Some(TEST_TOKEN.to_string()),
        file_id: TEST_FILE_ID.to_string(),
        page_title: "Icons".to_string(),
        assets_container: Some(TEST_CONTAINER.to_string()),
        ..Default::default()
    }
}

/// Config pointing at `base_url` with a store rooted in `dir`
pub fn test_config(dir: &TempDir, base_url: String, profiles: Vec<ProfileConfig>) -> Config {
    Config {
        profiles,
        figma: FigmaApiConfig {
            base_url,
            timeout: Duration::from_secs(5),
        },
        store: StoreConfig {
            root: dir.path().join("store"),
            database_path: dir.path().join("store.db"),
            containers: vec![TEST_CONTAINER.to_string()],
            temp_dir: Some(dir.path().join("tmp")),
        },
        ..Default::default()
    }
}

/// AssetSync over the bundled Figma client and local store
pub async fn create_sync(
    base_url: String,
    profiles: Vec<ProfileConfig>,
) -> Result<(AssetSync, TempDir), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = test_config(&dir, base_url, profiles);
    let sync = AssetSync::new(config).await?;
    Ok((sync, dir))
}

/// On-disk location of a stored asset
pub fn stored_path(dir: &TempDir, path: &str) -> PathBuf {
    dir.path().join("store").join(TEST_CONTAINER).join(path)
}
