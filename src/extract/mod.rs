//! Format extraction: decode a raw document into plain text lines.
//!
//! Each submodule handles exactly one family of formats. Keeping decoders
//! separate makes each independently testable and lets us swap a decoding
//! backend without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! RawDocument ──▶ txt/md   UTF-8 decode, verbatim
//!             ──▶ html     body text via scraper (script/style excluded)
//!             ──▶ docx     paragraph walk via docx-rs
//!             ──▶ pdf      positioned runs via pdfium, line-break heuristic
//! ```
//!
//! All decoders are pure transforms of the document bytes; only the PDF
//! path is async (CPU-bound pdfium work runs under `spawn_blocking`).
//! A failure on any PDF page fails the whole extraction — partial-page
//! recovery is deliberately not attempted, so the caller never sees a
//! silently truncated deck.

pub mod docx;
pub mod html;
pub mod pdf;
pub mod text;

use crate::document::{ExtractedText, MediaKind, RawDocument};
use crate::error::AnalysisError;
use tracing::debug;

/// Extract plain text from a raw document according to its media kind.
///
/// The media kind was validated at [`RawDocument`] construction, so every
/// branch here has a decoder; unsupported kinds never reach this function.
pub async fn extract(doc: &RawDocument) -> Result<ExtractedText, AnalysisError> {
    let extracted = match doc.kind {
        MediaKind::Txt | MediaKind::Md => text::extract(doc)?,
        MediaKind::Html => html::extract(doc)?,
        MediaKind::Docx => docx::extract(doc)?,
        MediaKind::Pdf => pdf::extract(doc).await?,
    };

    debug!(
        "Extracted {} chars from '{}' ({})",
        extracted.as_str().len(),
        doc.filename,
        doc.kind
    );

    Ok(extracted)
}
