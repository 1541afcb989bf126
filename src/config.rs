//! Configuration types for figma-assets-sync
//!
//! A [`Config`] holds an ordered list of export profiles plus the settings shared by
//! every run (Figma API endpoint, destination store, progress expiry, REST API).
//! Each profile is defaulted independently: missing fields take the values below,
//! and [`Config::normalize`] fills the ones that depend on the environment.

use crate::error::{Error, Result};
use crate::hooks::{AssetListTransform, BeforeUpload, BeforeUploadHook, ListTransformHook};
use crate::progress::MAX_PROGRESS_TTL;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Environment variable consulted when a profile has no token
pub const TOKEN_ENV_VAR: &str = "FIGMA_TOKEN";

/// Export format requested from the images endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Scalable vector graphics (default)
    #[default]
    Svg,
    /// Portable network graphics
    Png,
    /// JPEG
    Jpg,
    /// Portable document format
    Pdf,
}

impl ExportFormat {
    /// Value of the `format` query parameter and the file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type recorded with stored assets
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named export profile
///
/// Immutable for the duration of a run. Its serialized form (hooks excluded) is the
/// identity used for progress keying.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Human-readable label shown in listings
    #[serde(default)]
    pub title: Option<String>,

    /// Figma personal access token (falls back to `FIGMA_TOKEN`)
    #[serde(default)]
    pub token: Option<String>,

    /// Figma file key
    #[serde(default)]
    pub file_id: String,

    /// Name of the page holding the assets
    #[serde(default)]
    pub page_title: String,

    /// Name of the frame inside the page (optional)
    #[serde(default)]
    pub frame_title: Option<String>,

    /// Destination container handle (default: first store container)
    #[serde(default)]
    pub assets_container: Option<String>,

    /// Export format (default: svg)
    #[serde(default)]
    pub format: ExportFormat,

    /// Render scale for raster formats (default: 1)
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Export the variant children of components instead of the components (default: true)
    #[serde(default = "default_true")]
    pub export_children: bool,

    /// Reduce `key=value` variant names to their values (default: true)
    #[serde(default = "default_true")]
    pub optimize_variant_names: bool,

    /// Node ids per images-endpoint request (default: 100)
    #[serde(default = "default_figma_batch_size")]
    pub figma_batch_size: usize,

    /// Simultaneous asset downloads (default: 15)
    #[serde(default = "default_download_batch_size")]
    pub download_batch_size: usize,

    /// Rewrites the resolved asset list
    #[serde(skip)]
    pub list_transform: Option<ListTransformHook>,

    /// Processes downloaded files before upload
    #[serde(skip)]
    pub before_upload: Option<BeforeUploadHook>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            title: None,
            token: None,
            file_id: String::new(),
            page_title: String::new(),
            frame_title: None,
            assets_container: None,
            format: ExportFormat::default(),
            scale: default_scale(),
            export_children: true,
            optimize_variant_names: true,
            figma_batch_size: default_figma_batch_size(),
            download_batch_size: default_download_batch_size(),
            list_transform: None,
            before_upload: None,
        }
    }
}

impl ProfileConfig {
    /// Attach a list transform
    pub fn with_list_transform(mut self, transform: impl AssetListTransform + 'static) -> Self {
        self.list_transform = Some(ListTransformHook::new(transform));
        self
    }

    /// Attach a before-upload processor
    pub fn with_before_upload(mut self, processor: impl BeforeUpload + 'static) -> Self {
        self.before_upload = Some(BeforeUploadHook::new(processor));
        self
    }

    /// Frame title, treating an empty string as unset
    pub fn frame(&self) -> Option<&str> {
        self.frame_title.as_deref().filter(|f| !f.is_empty())
    }

    /// Destination container, or an error when none is configured
    pub fn container(&self) -> Result<&str> {
        self.assets_container
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::config("no assets container configured", "assets_container"))
    }

    fn validate(&self, index: usize) -> Result<()> {
        let key = |field: &str| format!("profiles[{}].{}", index, field);

        if self.file_id.trim().is_empty() {
            return Err(Error::config("file_id is required", key("file_id")));
        }
        if self.page_title.is_empty() {
            return Err(Error::config("page_title is required", key("page_title")));
        }
        if self.figma_batch_size == 0 {
            return Err(Error::config(
                "figma_batch_size must be greater than zero",
                key("figma_batch_size"),
            ));
        }
        if self.download_batch_size == 0 {
            return Err(Error::config(
                "download_batch_size must be greater than zero",
                key("download_batch_size"),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::config("scale must be positive", key("scale")));
        }
        if self.figma_batch_size > MAX_FIGMA_BATCH_SIZE {
            tracing::warn!(
                profile = index,
                figma_batch_size = self.figma_batch_size,
                "figma_batch_size exceeds the {} ids Figma accepts per request",
                MAX_FIGMA_BATCH_SIZE
            );
        }
        Ok(())
    }
}

/// Largest id batch the images endpoint is documented to accept
pub const MAX_FIGMA_BATCH_SIZE: usize = 100;

/// Figma REST API settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FigmaApiConfig {
    /// API base URL (default: "https://api.figma.com/v1")
    #[serde(default = "default_figma_base_url")]
    pub base_url: String,

    /// Per-request timeout (default: 60 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for FigmaApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_figma_base_url(),
            timeout: default_request_timeout(),
        }
    }
}

/// Local destination store settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one sub-directory per container (default: "./assets")
    #[serde(default = "default_store_root")]
    pub root: PathBuf,

    /// SQLite database of asset records (default: "./assets/assets.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Container handles (default: ["assets"])
    #[serde(default = "default_containers")]
    pub containers: Vec<String>,

    /// Directory for temporary upload files (None = system temp dir)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
            database_path: default_database_path(),
            containers: default_containers(),
            temp_dir: None,
        }
    }
}

/// Progress reporting settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Lifetime of a progress record (default: 600 seconds)
    #[serde(default = "default_progress_ttl", with = "duration_serde")]
    pub ttl: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            ttl: default_progress_ttl(),
        }
    }
}

/// API and external server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:6790)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Export profiles, addressed by index
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,

    /// Figma REST API settings
    #[serde(default)]
    pub figma: FigmaApiConfig,

    /// Destination store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Progress reporting settings
    #[serde(default)]
    pub progress: ProgressConfig,

    /// REST API settings
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load, normalize, and validate a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Fill environment-dependent profile defaults
    ///
    /// - `assets_container` defaults to the first configured store container
    /// - `token` defaults to the `FIGMA_TOKEN` environment variable
    pub fn normalize(&mut self) {
        let default_container = self.store.containers.first().cloned();
        let env_token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());

        for profile in &mut self.profiles {
            if profile.assets_container.as_deref().is_none_or(str::is_empty) {
                profile.assets_container = default_container.clone();
            }
            if profile.token.as_deref().is_none_or(str::is_empty) {
                profile.token = env_token.clone();
            }
        }
    }

    /// Validate every profile
    pub fn validate(&self) -> Result<()> {
        if self.store.containers.iter().any(|c| c.trim().is_empty()) {
            return Err(Error::config(
                "container handles must not be empty",
                "store.containers",
            ));
        }
        if self.progress.ttl.is_zero() || self.progress.ttl > MAX_PROGRESS_TTL {
            return Err(Error::config(
                format!(
                    "ttl must be between 1 second and {} seconds",
                    MAX_PROGRESS_TTL.as_secs()
                ),
                "progress.ttl",
            ));
        }
        for (index, profile) in self.profiles.iter().enumerate() {
            profile.validate(index)?;
        }
        Ok(())
    }

    /// Profile at `index`
    pub fn profile(&self, index: usize) -> Result<&ProfileConfig> {
        self.profiles
            .get(index)
            .ok_or(Error::ProfileNotFound(index))
    }
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f64 {
    1.0
}

fn default_figma_batch_size() -> usize {
    100
}

fn default_download_batch_size() -> usize {
    15
}

fn default_figma_base_url() -> String {
    "https://api.figma.com/v1".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_store_root() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./assets/assets.db")
}

fn default_containers() -> Vec<String> {
    vec!["assets".to_string()]
}

fn default_progress_ttl() -> Duration {
    crate::progress::DEFAULT_PROGRESS_TTL
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6790))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
