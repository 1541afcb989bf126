//! Remote design-file API
//!
//! The pipeline talks to Figma through the [`DesignApi`] trait so tests and
//! embedders can substitute their own transport. [`FigmaClient`] is the reqwest
//! implementation against the Figma REST API.

mod client;

pub use client::{FIGMA_TOKEN_HEADER, FigmaClient};

use async_trait::async_trait;
use std::collections::HashMap;

use crate::config::ProfileConfig;
use crate::error::Result;
use crate::types::DocumentNode;

/// Capability interface for the remote design-file API
#[async_trait]
pub trait DesignApi: Send + Sync {
    /// Fetch the document tree of the profile's file (`GET /files/{file_id}`)
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FigmaApi`] with the response body when the API
    /// answers with a non-success status.
    async fn fetch_document(&self, profile: &ProfileConfig) -> Result<DocumentNode>;

    /// Resolve node ids to rendered image URLs (`GET /images/{file_id}`)
    ///
    /// Ids the API could not render are absent from the returned map.
    async fn fetch_image_urls(
        &self,
        profile: &ProfileConfig,
        ids: &[&str],
    ) -> Result<HashMap<String, String>>;

    /// Download the binary content behind a rendered image URL
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Download`] when the CDN answers with a non-success status.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}
