//! Error types for the pitchlens library.
//!
//! One enum covers the whole pipeline, with variants grouped by stage:
//! input, extraction, segmentation, provider, and I/O. The grouping mirrors
//! the propagation policy — extraction and segmentation failures are
//! terminal for a request (the input itself needs user action), while
//! provider failures are the only ones a caller may sensibly retry at the
//! pipeline boundary. The pipeline itself never retries.
//!
//! [`AnalysisError::SchemaViolation`] keeps the provider's raw reply so a
//! caller can log it for diagnosis; user-facing layers should surface only
//! the message, not the raw text.

use crate::document::MediaKind;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pitchlens library.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{}'\nCheck the path exists and is readable.", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'\nTry: chmod +r {:?}", path.display(), path)]
    PermissionDenied { path: PathBuf },

    /// The file extension (or declared kind) is not one of the five
    /// supported media kinds. Rejected before any decode is attempted.
    #[error("Unsupported file type: '{kind}'\nSupported kinds: pdf, docx, txt, md, html")]
    UnsupportedFormat { kind: String },

    /// The input document contained no text at all.
    #[error("Document is empty — nothing to analyze")]
    EmptyDocument,

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The decoder for the declared media kind rejected the bytes.
    #[error("Failed to extract text from {kind} document: {detail}")]
    ExtractionFailed { kind: MediaKind, detail: String },

    // ── Segmentation errors ───────────────────────────────────────────────
    /// The segmenter found no recognizable section headers.
    #[error(
        "No sections found in the document.\n\
         The section detector looks for Markdown headings, ALL-CAPS lines,\n\
         underline rules, and Title Case lines. Add headers such as\n\
         'Problem', 'Solution', 'Team' to the deck and retry."
    )]
    NoSectionsFound,

    // ── Provider errors ───────────────────────────────────────────────────
    /// The provider's reply content was not the JSON shape we asked for.
    ///
    /// `raw` retains the original reply text for diagnostics.
    #[error("Analysis reply did not match the expected schema: {detail}")]
    SchemaViolation { detail: String, raw: String },

    /// The provider call exceeded the configured deadline.
    #[error("Analysis request timed out after {secs}s\nIncrease --timeout or retry.")]
    ApiTimeout { secs: u64 },

    /// The provider returned an error (HTTP failure or error body).
    #[error("Provider error: {message}")]
    Provider { message: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or environment validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
