//! reqwest-backed Figma REST API client.

use async_trait::async_trait;
use std::collections::HashMap;

use super::DesignApi;
use crate::config::{FigmaApiConfig, ProfileConfig};
use crate::error::{Error, Result};
use crate::types::{DocumentNode, FileResponse, ImagesResponse};

/// Header carrying the personal access token
pub const FIGMA_TOKEN_HEADER: &str = "X-Figma-Token";

/// Figma REST API client
///
/// Holds one pooled `reqwest::Client`, so clones share connections.
#[derive(Clone, Debug)]
pub struct FigmaClient {
    http: reqwest::Client,
    base_url: String,
}

impl FigmaClient {
    /// Build a client from the API settings
    pub fn new(config: &FigmaApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET an API endpoint with the profile's token
    async fn get_api(
        &self,
        url: url::Url,
        profile: &ProfileConfig,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(url)
            .header(FIGMA_TOKEN_HEADER, profile.token.as_deref().unwrap_or_default())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::FigmaApi {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid Figma base URL: {}", e), "figma.base_url"))?;
        url.path_segments_mut()
            .map_err(|_| Error::config("Figma base URL cannot be a base", "figma.base_url"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Render a scale the way the API expects it (`1`, `2`, `0.5`)
fn format_scale(scale: f64) -> String {
    if scale.fract() == 0.0 {
        format!("{}", scale as i64)
    } else {
        scale.to_string()
    }
}

#[async_trait]
impl DesignApi for FigmaClient {
    async fn fetch_document(&self, profile: &ProfileConfig) -> Result<DocumentNode> {
        let url = self.endpoint(&["files", &profile.file_id])?;
        tracing::debug!(file_id = %profile.file_id, "Fetching Figma document");

        let file: FileResponse = self.get_api(url, profile).await?.json().await?;
        Ok(file.document)
    }

    async fn fetch_image_urls(
        &self,
        profile: &ProfileConfig,
        ids: &[&str],
    ) -> Result<HashMap<String, String>> {
        let mut url = self.endpoint(&["images", &profile.file_id])?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("format", profile.format.as_str())
            .append_pair("scale", &format_scale(profile.scale));

        let response = self.get_api(url, profile).await?;
        let status = response.status().as_u16();
        let images: ImagesResponse = response.json().await?;

        if let Some(err) = images.err {
            return Err(Error::FigmaApi { status, body: err });
        }

        Ok(images
            .images
            .into_iter()
            .filter_map(|(id, url)| url.filter(|u| !u.is_empty()).map(|u| (id, u)))
            .collect())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
