//! Section segmentation: recover named sections from unstructured text.
//!
//! ## Why a heuristic?
//!
//! Pitch decks exported to text carry no reliable markup. A PDF export has
//! no heading tags at all; a Word export may or may not use styles; plain
//! text has nothing. What survives every export path is *layout*: authors
//! write section titles as short standalone lines — Markdown headings,
//! ALL-CAPS lines, underline rules, or Title Case lines. The segmenter
//! keys off exactly those four patterns and nothing else.
//!
//! ## Shape of the algorithm
//!
//! Classification is a pure function ([`classify_line`]) returning a tagged
//! [`LineClass`], kept separate from the single-pass accumulation state in
//! [`segment`]. That split makes the header predicates testable without
//! running the whole pass, and keeps the pass itself a small state machine:
//! `current section × buffer`.
//!
//! ## Documented failure modes
//!
//! The heuristic is deterministic, not perfect. Known behaviours, kept
//! deliberately for compatibility:
//!
//! - Body text before the first recognized header is dropped.
//! - A short Title Case sentence fragment ("Our Team") is indistinguishable
//!   from a header and will open a section.
//! - A repeated header key resets the earlier section's buffer
//!   (last-write-wins), keeping its original position.

use crate::document::ExtractedText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ── Line classification ──────────────────────────────────────────────────

/// Markdown-style heading: 1–6 `#` then whitespace.
static RE_MD_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s").unwrap());

/// Entirely uppercase letters and spaces, at least 3 characters.
static RE_ALL_CAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z ]{3,}$").unwrap());

/// Horizontal rule: 3+ `-`/`=` characters (underline-style headings).
static RE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-=]{3,}\s*$").unwrap());

/// Title-case-like: uppercase first letter, then only letters/whitespace.
static RE_TITLE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z\s]+$").unwrap());

/// Runs of whitespace, collapsed into the key separator.
static RE_WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Classification of one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// The line is a section header; the payload is the normalized key.
    Header(String),
    /// The line is body content (or blank, or an unusable header).
    Body,
}

/// Classify a trimmed line as a section header or body content.
///
/// The four header predicates are OR'd; a line matching any of them is a
/// header candidate. The candidate's key is derived by stripping leading
/// `#`/`-`/`=` markup, trimming, lower-casing, and collapsing whitespace
/// runs to `_`. A candidate whose key comes out empty (e.g. a bare `---`
/// rule) is demoted to [`LineClass::Body`]: it neither opens a section nor
/// disturbs the one already open.
pub fn classify_line(trimmed: &str) -> LineClass {
    if trimmed.is_empty() {
        return LineClass::Body;
    }

    let is_header = RE_MD_HEADING.is_match(trimmed)
        || RE_ALL_CAPS.is_match(trimmed)
        || RE_RULE.is_match(trimmed)
        || RE_TITLE_CASE.is_match(trimmed);

    if !is_header {
        return LineClass::Body;
    }

    let key = section_key(trimmed);
    if key.is_empty() {
        LineClass::Body
    } else {
        LineClass::Header(key)
    }
}

/// Derive the normalized section key from a header line.
fn section_key(header: &str) -> String {
    let stripped = header.trim_start_matches(['#', '-', '=']).trim();
    RE_WS_RUN
        .replace_all(&stripped.to_lowercase(), "_")
        .into_owned()
}

// ── Ordered section map ──────────────────────────────────────────────────

/// Insertion-ordered mapping of section key → section body.
///
/// Re-opening an existing key clears its buffer in place (last-write-wins)
/// without moving the entry, so iteration order is always first-seen
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or re-open) a section, resetting its buffer to empty.
    fn open(&mut self, key: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1.clear();
        } else {
            self.entries.push((key.to_string(), String::new()));
        }
    }

    /// Append a body line (plus newline) to an open section's buffer.
    fn append(&mut self, key: &str, line: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1.push_str(line);
            entry.1.push('\n');
        }
    }

    /// Trim every buffer and drop sections that end up empty.
    fn prune(&mut self) {
        for entry in &mut self.entries {
            entry.1 = entry.1.trim().to_string();
        }
        self.entries.retain(|(_, body)| !body.is_empty());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body.as_str())
    }

    /// Iterate `(key, body)` pairs in first-seen document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ── Segmentation pass ────────────────────────────────────────────────────

/// Segment extracted text into an ordered section map.
///
/// Single deterministic pass, no external state:
///
/// 1. Blank lines never open or close a section; when a section is open
///    they are appended (untrimmed) to its buffer as paragraph spacing.
/// 2. Header lines open a section keyed by [`classify_line`]'s normalized
///    key, resetting any earlier section with the same key.
/// 3. Body lines accumulate under the open section; body lines before the
///    first header are dropped.
/// 4. A post-pass trims each buffer and prunes empty sections.
///
/// A document with zero recognized headers yields an empty map — not an
/// error. The caller decides whether that is fatal
/// ([`crate::error::AnalysisError::NoSectionsFound`]).
pub fn segment(text: &ExtractedText) -> SectionMap {
    let mut map = SectionMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        match classify_line(line.trim()) {
            LineClass::Header(key) => {
                map.open(&key);
                current = Some(key);
            }
            LineClass::Body => {
                if let Some(ref key) = current {
                    map.append(key, line);
                }
            }
        }
    }

    map.prune();
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ExtractedText {
        ExtractedText::new(s.to_string())
    }

    // ── classify_line ────────────────────────────────────────────────────

    #[test]
    fn classifies_markdown_headings() {
        assert_eq!(
            classify_line("# Problem"),
            LineClass::Header("problem".into())
        );
        assert_eq!(
            classify_line("### Go To Market"),
            LineClass::Header("go_to_market".into())
        );
        // 7 hashes is not a Markdown heading
        assert_eq!(classify_line("####### Deep"), LineClass::Body);
    }

    #[test]
    fn classifies_all_caps_headers() {
        assert_eq!(
            classify_line("TRACTION"),
            LineClass::Header("traction".into())
        );
        assert_eq!(
            classify_line("MARKET SIZE"),
            LineClass::Header("market_size".into())
        );
        // Too short
        assert_eq!(classify_line("OK"), LineClass::Body);
        // Mixed case with digits is not all-caps
        assert_eq!(classify_line("Q3 REVENUE"), LineClass::Body);
    }

    #[test]
    fn classifies_title_case_headers() {
        assert_eq!(
            classify_line("Business Model"),
            LineClass::Header("business_model".into())
        );
        // Punctuation disqualifies title-case
        assert_eq!(classify_line("We solve X."), LineClass::Body);
        assert_eq!(classify_line("Revenue: $1M"), LineClass::Body);
    }

    #[test]
    fn rule_only_lines_are_body() {
        // Matches the rule pattern but normalizes to an empty key.
        assert_eq!(classify_line("---"), LineClass::Body);
        assert_eq!(classify_line("====="), LineClass::Body);
        assert_eq!(classify_line("--- "), LineClass::Body);
    }

    #[test]
    fn blank_lines_are_body() {
        assert_eq!(classify_line(""), LineClass::Body);
    }

    #[test]
    fn key_normalization() {
        assert_eq!(section_key("##  The   Team"), "the_team");
        assert_eq!(section_key("MARKET SIZE"), "market_size");
        assert_eq!(section_key("---"), "");
    }

    // ── segment ──────────────────────────────────────────────────────────

    #[test]
    fn markdown_deck_splits_into_sections() {
        let map = segment(&text("# Problem\nWe solve X.\n\n# Solution\nWe do Y.\n"));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["problem", "solution"]);
        assert_eq!(map.get("problem"), Some("We solve X."));
        assert_eq!(map.get("solution"), Some("We do Y."));
    }

    #[test]
    fn all_caps_deck_splits_without_markup() {
        let map = segment(&text("PROBLEM\nText A\nSOLUTION\nText B"));
        assert_eq!(map.get("problem"), Some("Text A"));
        assert_eq!(map.get("solution"), Some("Text B"));
    }

    #[test]
    fn no_headers_yields_empty_map() {
        let map = segment(&text("just some prose\nmore prose\n"));
        assert!(map.is_empty());
    }

    #[test]
    fn preamble_before_first_header_is_dropped() {
        let map = segment(&text("intro prose\n# Problem\nbody\n"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("problem"), Some("body"));
    }

    #[test]
    fn rule_line_does_not_clear_open_section() {
        let map = segment(&text("# Problem\nbefore\n---\nafter\n"));
        // The bare rule is body content inside the open section.
        assert_eq!(map.get("problem"), Some("before\n---\nafter"));
    }

    #[test]
    fn duplicate_header_overwrites_in_place() {
        let map = segment(&text(
            "# Team\nold team text\n# Traction\nnumbers\n# Team\nnew team text\n",
        ));
        let keys: Vec<&str> = map.keys().collect();
        // First-seen order is kept even though the buffer was rewritten.
        assert_eq!(keys, vec!["team", "traction"]);
        assert_eq!(map.get("team"), Some("new team text"));
        assert_eq!(map.get("traction"), Some("numbers"));
    }

    #[test]
    fn blank_lines_preserved_inside_section() {
        let map = segment(&text("# Problem\npara one\n\npara two\n"));
        assert_eq!(map.get("problem"), Some("para one\n\npara two"));
    }

    #[test]
    fn header_with_no_body_is_pruned() {
        let map = segment(&text("# Problem\n# Solution\ncontent\n"));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["solution"]);
    }

    #[test]
    fn section_map_serializes_in_order() {
        let map = segment(&text("# B Section\nb\n# A Section\na\n"));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"b_section":"b","a_section":"a"}"#);
    }
}
