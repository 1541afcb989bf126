//! OpenAPI documentation and schema generation

use utoipa::OpenApi;

/// OpenAPI documentation for the figma-assets-sync REST API
///
/// Served at `/api/v1/openapi.json` and, when enabled, browsable at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "figma-assets-sync REST API",
        version = "0.1.0",
        description = "Trigger Figma asset synchronization runs and poll their progress",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:6790", description = "Local development server")
    ),
    paths(
        // Sync
        crate::api::routes::list_configs,
        crate::api::routes::info,
        crate::api::routes::import,
        crate::api::routes::reimport,
        crate::api::routes::progress,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(
        schemas(
            crate::types::ProfileSummary,
            crate::types::InfoSummary,
            crate::types::ImportSummary,
            crate::types::ProgressMessage,
            crate::types::SyncAction,
            crate::types::Event,
            crate::config::ExportFormat,
            crate::api::routes::InfoResponse,
            crate::api::routes::ImportResponse,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "sync", description = "Profiles, synchronization runs and progress"),
        (name = "system", description = "Health, events and API documentation"),
    )
)]
pub struct ApiDoc;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/configs",
            "/api/v1/info/{index}",
            "/api/v1/import/{index}",
            "/api/v1/reimport/{index}",
            "/api/v1/progress/{index}",
            "/api/v1/health",
            "/api/v1/openapi.json",
            "/api/v1/events",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn document_carries_error_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("ApiError"));
        assert!(components.schemas.contains_key("ProfileSummary"));
    }
}
