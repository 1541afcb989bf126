//! wiremock stand-in for the Figma REST API

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{TEST_FILE_ID, TEST_TOKEN, icon_id, icons_file, svg_for};

/// Mock Figma API serving one file of icons
pub struct FigmaMock {
    /// Underlying mock server
    pub server: MockServer,
}

impl FigmaMock {
    /// Start a mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure the client with
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Download URL of the n-th icon
    pub fn render_url(&self, n: usize) -> String {
        format!("{}/render/icon-{}.svg", self.server.uri(), n)
    }

    /// Serve the file endpoint with the given icon names
    pub async fn mount_file(&self, names: &[&str]) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/files/{}", TEST_FILE_ID)))
            .and(header("X-Figma-Token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(icons_file(names)))
            .mount(&self.server)
            .await;
    }

    /// Answer the images endpoint for exactly this batch of icon indexes
    ///
    /// The mock must be hit `expected` times.
    pub async fn mount_images_batch(&self, indexes: &[usize], expected: u64) {
        let ids: Vec<String> = indexes.iter().map(|n| icon_id(*n)).collect();
        let images: serde_json::Map<String, serde_json::Value> = indexes
            .iter()
            .map(|n| (icon_id(*n), json!(self.render_url(*n))))
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/v1/images/{}", TEST_FILE_ID)))
            .and(query_param("ids", ids.join(",")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "err": null, "images": images })),
            )
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Fail the images endpoint for this batch of icon indexes
    pub async fn mount_failing_images_batch(&self, indexes: &[usize], expected: u64) {
        let ids: Vec<String> = indexes.iter().map(|n| icon_id(*n)).collect();

        Mock::given(method("GET"))
            .and(path(format!("/v1/images/{}", TEST_FILE_ID)))
            .and(query_param("ids", ids.join(",")))
            .respond_with(ResponseTemplate::new(500).set_body_string("render timeout"))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Serve the rendered content of the n-th icon
    pub async fn mount_render(&self, n: usize, expected: u64) {
        self.mount_render_body(n, svg_for(n), expected).await;
    }

    /// Serve `body` as the rendered content of the n-th icon
    pub async fn mount_render_body(&self, n: usize, body: String, expected: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/render/icon-{}.svg", n)))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected)
            .mount(&self.server)
            .await;
    }
}
