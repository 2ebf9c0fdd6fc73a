//! Provider reply parsing and normalization.
//!
//! The provider is asked for one JSON shape (the rich evaluation object),
//! but replies observed in the wild come in two: the rich shape and a
//! legacy `{rating, feedback}` shape from older prompt revisions. Both are
//! accepted; the legacy shape is normalized into [`AnalysisResult`] so
//! callers see exactly one type.
//!
//! Models also like to wrap JSON in Markdown code fences despite being told
//! not to, so fences are stripped before parsing. Anything that still fails
//! to parse is a [`AnalysisError::SchemaViolation`] carrying the raw reply
//! for diagnosis.
//!
//! [`AnalysisResult`] serializes back to the rich shape, so
//! `parse_reply(serialize(r)) == r` holds for any result.

use crate::error::AnalysisError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::error;

// ── Result types ─────────────────────────────────────────────────────────

/// Qualitative risk level used in the risk assessment map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// Per-section score with its weight in the overall rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub score: f64,
    pub weight: f64,
}

/// Narrative feedback: strengths, weaknesses, and per-section notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedFeedback {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub critical_weaknesses: Vec<String>,
    #[serde(default)]
    pub section_feedback: BTreeMap<String, String>,
}

/// The normalized evaluation of one pitch deck.
///
/// Every field except `overall_rating` is optional on the wire and
/// defaults to empty; `overall_rating` is the one datum both reply shapes
/// are guaranteed to carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_rating: f64,
    #[serde(default)]
    pub stage_assessment: String,
    #[serde(default)]
    pub investment_readiness: String,
    #[serde(default)]
    pub section_ratings: BTreeMap<String, SectionScore>,
    #[serde(default)]
    pub detailed_feedback: DetailedFeedback,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub comparable_companies: Vec<String>,
    #[serde(default)]
    pub risk_assessment: BTreeMap<String, RiskLevel>,
}

// ── Wire shapes ──────────────────────────────────────────────────────────

/// The two accepted reply shapes.
///
/// Untagged matching is unambiguous here: the rich shape requires
/// `overall_rating`, the legacy shape requires `rating`, and no reply can
/// carry neither and still mean anything.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReply {
    Rich(AnalysisResult),
    Legacy {
        rating: f64,
        #[serde(default)]
        feedback: BTreeMap<String, String>,
    },
}

fn normalize(reply: RawReply) -> AnalysisResult {
    match reply {
        RawReply::Rich(result) => result,
        RawReply::Legacy { rating, feedback } => AnalysisResult {
            overall_rating: rating,
            detailed_feedback: DetailedFeedback {
                section_feedback: feedback,
                ..DetailedFeedback::default()
            },
            ..AnalysisResult::default()
        },
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────

/// Outer Markdown code fences, optionally tagged `json`.
static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json)?\s*\n(.*?)\n?```\s*$").unwrap());

/// Strip one layer of outer code fences, if present.
fn strip_json_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    match RE_OUTER_FENCES.captures(trimmed) {
        Some(caps) => caps.get(1).map_or(trimmed, |m| m.as_str()),
        None => trimmed,
    }
}

/// Parse a raw provider reply into an [`AnalysisResult`].
///
/// Accepts the rich shape and the legacy `{rating, feedback}` shape, with
/// or without outer code fences. On failure both the validation error and
/// the raw reply are logged at error level, and the raw reply is retained
/// in the returned error for diagnosis.
pub fn parse_reply(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let cleaned = strip_json_fences(raw);
    match serde_json::from_str::<RawReply>(cleaned) {
        Ok(reply) => Ok(normalize(reply)),
        Err(e) => {
            error!("Provider reply failed schema validation: {e}");
            error!("Raw reply was: {raw}");
            Err(AnalysisError::SchemaViolation {
                detail: e.to_string(),
                raw: raw.to_string(),
            })
        }
    }
}
