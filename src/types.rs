//! Core types for figma-assets-sync

use crate::config::{ExportFormat, ProfileConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// A node of the Figma document tree
///
/// Only the fields the pipeline reads are modelled; everything else in the
/// API payload is ignored on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Remote node identifier (e.g. "12:345")
    pub id: String,
    /// Layer name as shown in the design tool
    pub name: String,
    /// Child layers, in document order (absent on leaf nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocumentNode>>,
}

impl DocumentNode {
    /// Create a leaf node
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: None,
        }
    }

    /// Create a node with children
    pub fn with_children(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<DocumentNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Some(children),
        }
    }

    /// Child nodes, or an empty slice when the node has none
    pub fn children(&self) -> &[DocumentNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// First child whose name matches exactly (case-sensitive)
    pub fn child_named(&self, name: &str) -> Option<&DocumentNode> {
        self.children().iter().find(|child| child.name == name)
    }
}

/// Response of `GET /files/{file_id}`
#[derive(Clone, Debug, Deserialize)]
pub struct FileResponse {
    /// Root of the document tree
    pub document: DocumentNode,
}

/// Response of `GET /images/{file_id}`
///
/// Figma reports render failures inline: `err` is non-null and individual
/// entries of `images` may be `null`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ImagesResponse {
    /// Error message, if the render request failed
    #[serde(default)]
    pub err: Option<String>,
    /// Node id to rendered image URL
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// An exportable asset resolved from the document tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetDescriptor {
    /// Remote node identifier
    pub id: String,
    /// Destination-relative name, without extension
    pub name: String,
    /// Download URL, attached after the metadata batch resolved it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AssetDescriptor {
    /// Create a descriptor without a URL
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
        }
    }

    /// Destination path inside the container for the given file extension
    pub fn destination_path(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }
}

/// The three write actions of the trigger surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    /// Count available assets without touching the store
    Info,
    /// Import assets that do not exist yet
    Import,
    /// Import every asset, overwriting existing ones
    Reimport,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SyncAction::Info => "info",
            SyncAction::Import => "import",
            SyncAction::Reimport => "reimport",
        };
        f.write_str(s)
    }
}

/// Listing entry of a configured profile
///
/// The token itself is never exposed, only whether one is configured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileSummary {
    /// Position of the profile, used by every action
    pub index: usize,
    /// Human-readable label
    pub title: Option<String>,
    /// Figma file key
    pub file_id: String,
    /// Destination container handle
    pub assets_container: Option<String>,
    /// Page holding the assets
    pub page_title: String,
    /// Frame inside the page
    pub frame_title: Option<String>,
    /// Export format
    pub format: ExportFormat,
    /// Render scale
    pub scale: f64,
    /// Whether a token is configured
    pub has_token: bool,
    /// Required settings that are missing
    pub missing: Vec<String>,
}

impl ProfileSummary {
    /// Summarize the profile at `index`
    pub fn from_profile(index: usize, profile: &ProfileConfig) -> Self {
        let has_token = profile.token.as_deref().is_some_and(|t| !t.is_empty());
        let missing = [
            ("token", !has_token),
            ("file_id", profile.file_id.trim().is_empty()),
            ("page_title", profile.page_title.is_empty()),
            ("assets_container", profile.container().is_err()),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(field, _)| field.to_string())
        .collect();

        Self {
            index,
            title: profile.title.clone(),
            file_id: profile.file_id.clone(),
            assets_container: profile.assets_container.clone(),
            page_title: profile.page_title.clone(),
            frame_title: profile.frame().map(str::to_string),
            format: profile.format,
            scale: profile.scale,
            has_token,
            missing,
        }
    }
}

/// Result of the info action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InfoSummary {
    /// Assets resolved from the design file (after deduplication)
    pub available: usize,
    /// Assets whose destination path already exists in the store
    pub skipped: usize,
}

impl InfoSummary {
    /// Human-readable summary
    pub fn message(&self) -> String {
        format!(
            "There are {} assets available in Figma. ({} already exist in the store.)",
            self.available, self.skipped
        )
    }
}

/// Result of the import and reimport actions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    /// Assets created in the store
    pub imported: usize,
    /// Existing assets whose content was overwritten
    pub reimported: usize,
    /// Assets filtered out because their path already existed (import only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
}

impl ImportSummary {
    /// Human-readable summary
    pub fn message(&self) -> String {
        match self.skipped {
            Some(skipped) => format!(
                "Imported {}, reimported {}, skipped {}.",
                self.imported, self.reimported, skipped
            ),
            None => format!(
                "Imported {}, reimported {}.",
                self.imported, self.reimported
            ),
        }
    }
}

/// Payload of the progress endpoint
///
/// A missing `message` tells the poller there is nothing to observe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProgressMessage {
    /// Latest progress message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Events emitted while synchronizing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A run was triggered for a profile
    RunStarted {
        /// Profile index
        profile: usize,
        /// Triggered action
        action: SyncAction,
    },
    /// A new asset was created in the store
    AssetCreated {
        /// Container handle
        container: String,
        /// Container-relative path
        path: String,
    },
    /// An existing asset's content was replaced
    AssetReuploaded {
        /// Container handle
        container: String,
        /// Container-relative path
        path: String,
    },
    /// A run finished (successfully or not)
    RunFinished {
        /// Profile index
        profile: usize,
        /// Triggered action
        action: SyncAction,
        /// Summary or error message
        message: String,
    },
}
