//! Slug normalisation for heading anchors and link targets.
//!
//! The pipeline is:
//! 1. Replace every run of whitespace or `.` with a single `-`
//! 2. Strip characters outside `[a-zA-Z0-9_-]`
//! 3. Collapse runs of dashes into one
//! 4. Strip trailing dashes
//! 5. Lowercase
//!
//! Leading dashes are kept. Non-ASCII letters are stripped, so a heading made
//! only of such characters normalises to an empty string; use [`require_id`]
//! where an empty anchor is not acceptable.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s.]+").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());
static TRAILING_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+$").unwrap());

/// Error returned when text normalises to nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    /// The input contained no characters that survive normalisation.
    #[error("text {0:?} normalizes to an empty identifier")]
    EmptyNormalizedId(String),
}

/// Convert text to a URL-safe identifier.
///
/// # Examples
///
/// ```
/// use sdoc_markdown::normalize;
///
/// assert_eq!(normalize("Hello World"), "hello-world");
/// assert_eq!(normalize("A.B C"), "a-b-c");
/// assert_eq!(normalize("---"), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let dashed = SEPARATORS.replace_all(text, "-");
    let kept = DISALLOWED.replace_all(&dashed, "");
    let collapsed = DASH_RUNS.replace_all(&kept, "-");
    TRAILING_DASHES
        .replace(&collapsed, "")
        .to_ascii_lowercase()
}

/// Normalise text, rejecting an empty result.
///
/// # Errors
///
/// Returns [`SlugError::EmptyNormalizedId`] if nothing survives normalisation.
pub fn require_id(text: &str) -> Result<String, SlugError> {
    let id = normalize(text);
    if id.is_empty() {
        return Err(SlugError::EmptyNormalizedId(text.to_owned()));
    }
    Ok(id)
}
