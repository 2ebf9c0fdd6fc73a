//! PDF extraction.
//!
//! PDFs carry positioned text runs, not lines, so extraction has two
//! halves: pdfium gives us each page's runs with their bounding boxes,
//! and [`lines_from_runs`] reassembles lines from run positions. Two runs
//! whose vertical positions differ by more than [`LINE_BREAK_THRESHOLD`]
//! page units belong to different lines; runs on the same line are joined
//! with a single space. Pages are joined with a blank line so a heading at
//! the top of a page never glues onto the previous page's last line.
//!
//! pdfium is a native library and its calls are CPU-bound, so the decode
//! runs under `spawn_blocking` to keep the async runtime responsive.

use crate::document::{ExtractedText, MediaKind, RawDocument};
use crate::error::AnalysisError;
use pdfium_render::prelude::*;
use tracing::debug;

/// Vertical distance (page units) above which two runs are separate lines.
///
/// Page units are PDF points (1/72 inch); intra-line baseline wobble from
/// kerning and superscripts stays well under 5 points at deck font sizes.
pub(crate) const LINE_BREAK_THRESHOLD: f32 = 5.0;

/// One positioned text run: the text and its vertical page position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextRun {
    pub text: String,
    pub top: f32,
}

pub async fn extract(doc: &RawDocument) -> Result<ExtractedText, AnalysisError> {
    if !doc.bytes.starts_with(b"%PDF") {
        return Err(AnalysisError::ExtractionFailed {
            kind: MediaKind::Pdf,
            detail: "missing %PDF header (not a PDF file)".into(),
        });
    }

    let bytes = doc.bytes.clone();
    tokio::task::spawn_blocking(move || extract_blocking(&bytes))
        .await
        .map_err(|e| AnalysisError::Internal(format!("PDF extraction task failed: {e}")))?
}

fn extract_blocking(bytes: &[u8]) -> Result<ExtractedText, AnalysisError> {
    let pdfium = Pdfium::default();
    let document =
        pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| AnalysisError::ExtractionFailed {
                kind: MediaKind::Pdf,
                detail: format!("{e:?}"),
            })?;

    let page_count = document.pages().len();
    debug!("PDF opened: {page_count} page(s)");

    let mut pages_text = Vec::with_capacity(page_count as usize);
    for (index, page) in document.pages().iter().enumerate() {
        let text_page = page.text().map_err(|e| AnalysisError::ExtractionFailed {
            kind: MediaKind::Pdf,
            detail: format!("page {}: {e:?}", index + 1),
        })?;

        let runs: Vec<TextRun> = text_page
            .segments()
            .iter()
            .map(|segment| TextRun {
                text: segment.text(),
                top: segment.bounds().top().value,
            })
            .collect();

        pages_text.push(lines_from_runs(&runs));
    }

    Ok(ExtractedText::new(pages_text.join("\n\n")))
}

/// Reassemble lines from positioned runs, in reading order.
///
/// Runs arrive in the document's text order; only the vertical delta to the
/// previous run decides whether a run starts a new line. Empty runs are
/// skipped without affecting line state.
pub(crate) fn lines_from_runs(runs: &[TextRun]) -> String {
    let mut out = String::new();
    let mut last_top: Option<f32> = None;

    for run in runs {
        let piece = run.text.trim();
        if piece.is_empty() {
            continue;
        }
        match last_top {
            None => {}
            Some(prev) if (run.top - prev).abs() > LINE_BREAK_THRESHOLD => out.push('\n'),
            Some(_) => out.push(' '),
        }
        out.push_str(piece);
        last_top = Some(run.top);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, top: f32) -> TextRun {
        TextRun {
            text: text.to_string(),
            top,
        }
    }

    #[test]
    fn runs_on_same_line_join_with_space() {
        let runs = vec![run("We", 700.0), run("solve", 700.4), run("X.", 699.8)];
        assert_eq!(lines_from_runs(&runs), "We solve X.");
    }

    #[test]
    fn large_vertical_delta_breaks_line() {
        let runs = vec![run("PROBLEM", 720.0), run("We solve X.", 700.0)];
        assert_eq!(lines_from_runs(&runs), "PROBLEM\nWe solve X.");
    }

    #[test]
    fn threshold_is_exclusive() {
        // Exactly 5.0 apart is still the same line; just over is not.
        let same = vec![run("a", 700.0), run("b", 695.0)];
        assert_eq!(lines_from_runs(&same), "a b");
        let split = vec![run("a", 700.0), run("b", 694.9)];
        assert_eq!(lines_from_runs(&split), "a\nb");
    }

    #[test]
    fn empty_runs_are_skipped() {
        let runs = vec![run("a", 700.0), run("   ", 650.0), run("b", 699.0)];
        assert_eq!(lines_from_runs(&runs), "a b");
    }

    #[test]
    fn no_runs_gives_empty_text() {
        assert_eq!(lines_from_runs(&[]), "");
    }

    #[tokio::test]
    async fn rejects_bytes_without_pdf_magic() {
        let doc = RawDocument::from_bytes(b"plain text".to_vec(), "deck.pdf").unwrap();
        let err = extract(&doc).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ExtractionFailed {
                kind: MediaKind::Pdf,
                ..
            }
        ));
    }
}
