//! Markdown link validation
//!
//! Extracts `[text](target)` links from a markdown file and reports local
//! targets that do not exist. External URLs and in-page anchors are out of
//! scope; a `#fragment` suffix on a local target is stripped before the
//! existence check.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// One link whose local target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub text: String,
    pub target: String,
}

/// Check every local link in one markdown file.
///
/// Targets are resolved relative to the file's own directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn check_file(path: &Path) -> Result<Vec<BrokenLink>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut broken = Vec::new();
    for capture in LINK_PATTERN.captures_iter(&content) {
        let text = &capture[1];
        let target = &capture[2];

        if target.starts_with("http://") || target.starts_with("https://") {
            continue;
        }
        if target.starts_with('#') {
            continue;
        }

        let local = target.split('#').next().unwrap_or(target);
        if !base.join(local).exists() {
            broken.push(BrokenLink {
                text: text.to_string(),
                target: target.to_string(),
            });
        }
    }

    if !broken.is_empty() {
        tracing::debug!(path = %path.display(), count = broken.len(), "broken links found");
    }
    Ok(broken)
}
