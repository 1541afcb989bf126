//! Tree navigation from the document root to the exportable nodes.

use crate::config::ProfileConfig;
use crate::error::{Error, Result};
use crate::types::DocumentNode;

/// Locate the exportable nodes of a profile
///
/// Finds the first child of `root` named `page_title`, then, when a frame is
/// configured, the first child of that page named `frame_title`. Returns the
/// children of the innermost match. Names match exactly and case-sensitively;
/// duplicates resolve to the first occurrence in document order.
pub fn navigate<'a>(root: &'a DocumentNode, profile: &ProfileConfig) -> Result<&'a [DocumentNode]> {
    let page = root
        .child_named(&profile.page_title)
        .ok_or_else(|| Error::PageNotFound(profile.page_title.clone()))?;

    match profile.frame() {
        Some(frame_title) => {
            let frame = page
                .child_named(frame_title)
                .ok_or_else(|| Error::FrameNotFound(frame_title.to_string()))?;
            Ok(frame.children())
        }
        None => Ok(page.children()),
    }
}
