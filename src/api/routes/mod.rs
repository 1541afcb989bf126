//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`sync`] — Profile listing, the three run actions, progress polling
//! - [`system`] — Health, events, OpenAPI

use crate::types::{ImportSummary, InfoSummary};
use serde::{Deserialize, Serialize};

mod sync;
mod system;

pub use sync::*;
pub use system::*;

// ============================================================================
// Response Types (shared across handlers)
// ============================================================================

/// Response for POST /info/:index
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct InfoResponse {
    /// Human-readable summary shown to the operator
    pub text: String,
    /// Counts behind the summary
    #[serde(flatten)]
    pub summary: InfoSummary,
}

impl From<InfoSummary> for InfoResponse {
    fn from(summary: InfoSummary) -> Self {
        Self {
            text: summary.message(),
            summary,
        }
    }
}

/// Response for POST /import/:index and POST /reimport/:index
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ImportResponse {
    /// Human-readable summary shown to the operator
    pub text: String,
    /// Counts behind the summary
    #[serde(flatten)]
    pub summary: ImportSummary,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            text: summary.message(),
            summary,
        }
    }
}
