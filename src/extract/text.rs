//! Plain-text and Markdown extraction.
//!
//! Both kinds are already line-oriented text, so extraction is a UTF-8
//! decode and nothing more. Markdown markup is kept verbatim — the
//! segmenter reads `#` headings directly, and stripping any other markup
//! here would lose information the evaluation prompt can use.

use crate::document::{ExtractedText, RawDocument};
use crate::error::AnalysisError;

pub fn extract(doc: &RawDocument) -> Result<ExtractedText, AnalysisError> {
    let text =
        String::from_utf8(doc.bytes.clone()).map_err(|e| AnalysisError::ExtractionFailed {
            kind: doc.kind,
            detail: format!("not valid UTF-8: {e}"),
        })?;
    Ok(ExtractedText::new(text))
}
