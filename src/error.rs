//! Error types for figma-assets-sync
//!
//! This module provides the error taxonomy of the synchronization pipeline:
//! - Configuration errors (missing container, page, or frame) that abort a run
//! - Remote API errors from the Figma REST API
//! - Store and database errors raised by the destination asset store
//! - HTTP status code mapping and structured error bodies for the REST surface
//!
//! Per-asset download and persistence failures are not represented here: they are
//! logged and dropped by the pipeline rather than returned.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for figma-assets-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for figma-assets-sync
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "figma_batch_size")
        key: Option<String>,
    },

    /// No profile exists at the requested index
    #[error("configuration {0} not found")]
    ProfileNotFound(usize),

    /// The configured destination container does not exist in the store
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The configured page is not a child of the document root
    #[error("cannot find page \"{0}\"")]
    PageNotFound(String),

    /// The configured frame is not a child of the selected page
    #[error("cannot find frame \"{0}\"")]
    FrameNotFound(String),

    /// The Figma API answered with a non-success status
    #[error("Figma API error ({status}): {body}")]
    FigmaApi {
        /// HTTP status returned by the API
        status: u16,
        /// Raw response body, surfaced to the user as-is
        body: String,
    },

    /// An asset download from the rendering CDN answered with a non-success status
    #[error("download of {url} failed with status {status}")]
    Download {
        /// URL that was requested
        url: String,
        /// HTTP status returned by the CDN
        status: u16,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Destination store error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Constraint violation (e.g., duplicate container/path)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Destination asset store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// An asset already exists at the path a create targeted
    #[error("asset already exists at {container}::{path}")]
    AlreadyExists {
        /// Container handle
        container: String,
        /// Container-relative path
        path: String,
    },

    /// The asset record is gone (deleted between lookup and write)
    #[error("asset missing at {container}::{path}")]
    Missing {
        /// Container handle
        container: String,
        /// Container-relative path
        path: String,
    },

    /// The destination path is not a plain container-relative path
    #[error("invalid asset path {path}: {reason}")]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// A before-upload hook failed
    #[error("before-upload hook failed for {path}: {reason}")]
    HookFailed {
        /// Temporary file handed to the hook
        path: PathBuf,
        /// Failure reported by the hook
        reason: String,
    },
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "page_not_found",
///     "message": "cannot find page \"Icons\"",
///     "details": { "page": "Icons" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "figma_api_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create a "not found" error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("not_found", format!("{} not found", resource.into()))
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - invalid configuration
            Error::Config { .. } => 400,

            // 404 Not Found - configuration points at something that does not exist
            Error::ProfileNotFound(_) => 404,
            Error::ContainerNotFound(_) => 404,
            Error::PageNotFound(_) => 404,
            Error::FrameNotFound(_) => 404,

            // 502 Bad Gateway - remote design API failures
            Error::FigmaApi { .. } => 502,
            Error::Download { .. } => 502,
            Error::Network(_) => 502,

            // 409 Conflict - store already holds the asset
            Error::Store(StoreError::AlreadyExists { .. }) => 409,

            // 500 Internal Server Error - server-side issues
            Error::Store(_) => 500,
            Error::Database(_) => 500,
            Error::Sqlx(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::ProfileNotFound(_) => "profile_not_found",
            Error::ContainerNotFound(_) => "container_not_found",
            Error::PageNotFound(_) => "page_not_found",
            Error::FrameNotFound(_) => "frame_not_found",
            Error::FigmaApi { .. } => "figma_api_error",
            Error::Download { .. } => "download_failed",
            Error::Network(_) => "network_error",
            Error::Store(e) => match e {
                StoreError::AlreadyExists { .. } => "asset_exists",
                StoreError::Missing { .. } => "asset_missing",
                StoreError::InvalidPath { .. } => "invalid_path",
                StoreError::HookFailed { .. } => "hook_failed",
            },
            Error::Database(_) => "database_error",
            Error::Sqlx(_) => "database_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({ "key": key })),
            Error::ProfileNotFound(index) => Some(serde_json::json!({ "index": index })),
            Error::ContainerNotFound(container) => {
                Some(serde_json::json!({ "container": container }))
            }
            Error::PageNotFound(page) => Some(serde_json::json!({ "page": page })),
            Error::FrameNotFound(frame) => Some(serde_json::json!({ "frame": frame })),
            Error::FigmaApi { status, .. } => Some(serde_json::json!({ "status": status })),
            Error::Download { url, status } => Some(serde_json::json!({
                "url": url,
                "status": status,
            })),
            Error::Store(StoreError::AlreadyExists { container, path })
            | Error::Store(StoreError::Missing { container, path }) => Some(serde_json::json!({
                "container": container,
                "path": path,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
