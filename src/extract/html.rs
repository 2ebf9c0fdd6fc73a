//! HTML extraction.
//!
//! Parses the document with `scraper` and walks the `<body>` subtree,
//! collecting text nodes. `<script>` and `<style>` subtrees are skipped —
//! their text is code, not deck content. A newline is appended after each
//! block-level element so headings and paragraphs land on their own lines,
//! which is what the segmenter's line heuristics need.

use crate::document::{ExtractedText, RawDocument};
use crate::error::AnalysisError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

pub fn extract(doc: &RawDocument) -> Result<ExtractedText, AnalysisError> {
    let raw = std::str::from_utf8(&doc.bytes).map_err(|e| AnalysisError::ExtractionFailed {
        kind: doc.kind,
        detail: format!("not valid UTF-8: {e}"),
    })?;

    // html5ever is error-tolerant; even fragment input yields a synthetic
    // <html><body> tree, so the body selector always finds something.
    let dom = Html::parse_document(raw);
    let mut out = String::new();
    if let Some(body) = dom.select(&BODY).next() {
        collect_text(body, &mut out);
    }

    Ok(ExtractedText::new(tidy_lines(&out)))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if name == "script" || name == "style" {
                continue;
            }
            collect_text(child_el, out);
            if is_block(name) {
                out.push('\n');
            }
        }
    }
}

/// Elements that should break the text onto a new line.
fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "br"
            | "tr"
            | "table"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "blockquote"
            | "pre"
    )
}

/// Trim per-line whitespace left over from HTML source indentation and
/// collapse runs of blank lines to one.
fn tidy_lines(raw: &str) -> String {
    let mut out = String::new();
    let mut prev_blank = true;
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !prev_blank {
                out.push('\n');
            }
            prev_blank = true;
        } else {
            out.push_str(line);
            out.push('\n');
            prev_blank = false;
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> RawDocument {
        RawDocument::from_bytes(html.as_bytes().to_vec(), "deck.html").unwrap()
    }

    #[test]
    fn extracts_body_text_with_line_breaks() {
        let text = extract(&doc(
            "<html><body><h1>Problem</h1><p>We solve X.</p></body></html>",
        ))
        .unwrap();
        assert_eq!(text.as_str(), "Problem\nWe solve X.");
    }

    #[test]
    fn skips_script_and_style() {
        let text = extract(&doc(
            "<body><h1>TEAM</h1><script>var x = 1;</script>\
             <style>h1 { color: red }</style><p>Two founders.</p></body>",
        ))
        .unwrap();
        assert!(!text.as_str().contains("var x"));
        assert!(!text.as_str().contains("color"));
        assert!(text.as_str().contains("TEAM"));
        assert!(text.as_str().contains("Two founders."));
    }

    #[test]
    fn tolerates_fragment_input() {
        let text = extract(&doc("<h2>Traction</h2><p>100 users</p>")).unwrap();
        assert_eq!(text.as_str(), "Traction\n100 users");
    }

    #[test]
    fn collapses_source_indentation() {
        let text = extract(&doc(
            "<body>\n  <h1>Problem</h1>\n  \n  <p>body text</p>\n</body>",
        ))
        .unwrap();
        assert_eq!(text.as_str(), "Problem\n\nbody text");
    }
}
