//! Shared error type for content sources.

use thiserror::Error;

/// Errors a source operation can report to the host.
///
/// Malformed listing entries and missing optional pages are not errors; they are
/// filtered out by the operation that meets them.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The comic page has no primary image, so no page list can be built.
    #[error("Could not parse comic page: no image matches '{selector}'.")]
    MissingComicImage { selector: String },

    /// The host called a hook this source does not provide.
    #[error("Not supported by this source: {operation}")]
    Unsupported { operation: &'static str },

    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },
}
