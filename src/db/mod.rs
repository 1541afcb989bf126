//! Database layer for figma-assets-sync
//!
//! Handles SQLite persistence of the asset records kept by the local store.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`assets`] — Asset record CRUD

use sqlx::{FromRow, sqlite::SqlitePool};

mod assets;
mod migrations;

/// New asset record to be inserted into the database
#[derive(Debug, Clone)]
pub struct NewAsset {
    /// Container handle
    pub container: String,
    /// Container-relative path, including the extension
    pub path: String,
    /// Display title (the asset name without extension)
    pub title: String,
    /// Content size in bytes
    pub size_bytes: i64,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// MIME type of the content
    pub mime_type: String,
}

/// Replacement metadata written when an asset's content is overwritten
#[derive(Debug, Clone)]
pub struct AssetContentUpdate {
    /// Content size in bytes
    pub size_bytes: i64,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// MIME type of the content
    pub mime_type: String,
}

/// Asset record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AssetRecord {
    /// Unique database ID
    pub id: i64,
    /// Container handle
    pub container: String,
    /// Container-relative path, including the extension
    pub path: String,
    /// Display title
    pub title: String,
    /// Content size in bytes
    pub size_bytes: i64,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// MIME type of the content
    pub mime_type: String,
    /// Unix timestamp when the asset was created
    pub created_at: i64,
    /// Unix timestamp of the last content write
    pub updated_at: i64,
}

/// Database handle for figma-assets-sync
pub struct Database {
    pool: SqlitePool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
