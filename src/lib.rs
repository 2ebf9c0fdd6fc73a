//! # pitchlens
//!
//! Evaluate startup pitch decks with an LLM, starting from the raw document.
//!
//! ## Why this crate?
//!
//! Pitch decks arrive in whatever format the founder exported last — PDF,
//! DOCX, Markdown, HTML, plain text — and almost never carry reliable
//! structural markup. This crate flattens any of those formats into
//! line-oriented text, recovers named sections with a deterministic layout
//! heuristic (no format-specific markup required), and delegates the actual
//! qualitative judgement to an external LLM behind a fixed request/response
//! contract.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document (pdf|docx|txt|md|html)
//!  │
//!  ├─ 1. Extract   format-specific decode into plain text lines
//!  ├─ 2. Segment   heuristic header detection → ordered section map
//!  ├─ 3. Prompt    render sections into the fixed evaluation template
//!  ├─ 4. Provider  one HTTP chat-completion call (bearer auth, deadline)
//!  └─ 5. Parse     validate + normalise the reply into AnalysisResult
//! ```
//!
//! The provider is treated as an opaque oracle: this crate owns everything
//! up to the prompt string and everything after the raw reply string, and
//! nothing in between.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pitchlens::{analyze, AnalysisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from PITCHLENS_API_KEY (or GROQ_API_KEY)
//!     let config = AnalysisConfig::from_env()?;
//!     let result = analyze("deck.pdf", &config).await?;
//!     println!("overall: {}/10", result.overall_rating);
//!     for (section, score) in &result.section_ratings {
//!         println!("  {section}: {} (weight {}%)", score.score, score.weight);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pitchlens` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pitchlens = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod segment;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{
    analyze, analyze_bytes, analyze_text, analyze_to_file, sections, sections_from_bytes,
};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use document::{ExtractedText, MediaKind, RawDocument};
pub use error::AnalysisError;
pub use response::{AnalysisResult, DetailedFeedback, RiskLevel, SectionScore};
pub use segment::{classify_line, segment, LineClass, SectionMap};
