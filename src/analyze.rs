//! Pipeline orchestration: the public entry points.
//!
//! Every entry point runs the same spine:
//!
//! ```text
//! RawDocument ─▶ extract ─▶ segment ─▶ build_prompt ─▶ provider ─▶ parse
//! ```
//!
//! The variants differ only in where the document comes from ([`analyze`]
//! reads a path, [`analyze_bytes`] takes an upload, [`analyze_text`] skips
//! extraction entirely) and in where they stop ([`sections`] and
//! [`sections_from_bytes`] stop after segmentation, need no credential,
//! and never touch the network).
//!
//! The pipeline fails fast: an empty document or a deck with no
//! recognizable headers is rejected before the provider is ever called, so
//! no tokens are spent on input that cannot produce a useful evaluation.

use crate::config::AnalysisConfig;
use crate::document::{ExtractedText, RawDocument};
use crate::error::AnalysisError;
use crate::prompt::build_prompt;
use crate::provider::ProviderClient;
use crate::response::{parse_reply, AnalysisResult};
use crate::segment::{segment, SectionMap};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Analyze a pitch deck file.
///
/// Reads the file, detects the media kind from its extension, and runs the
/// full pipeline against the configured provider.
pub async fn analyze(
    path: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let doc = RawDocument::from_path(path.as_ref())?;
    analyze_document(doc, config).await
}

/// Analyze a pitch deck held in memory.
///
/// The media kind is detected from `filename`'s extension, exactly as for
/// [`analyze`].
pub async fn analyze_bytes(
    bytes: Vec<u8>,
    filename: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let doc = RawDocument::from_bytes(bytes, filename)?;
    analyze_document(doc, config).await
}

/// Analyze already-extracted plain text, skipping format extraction.
pub async fn analyze_text(
    text: impl Into<String>,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    analyze_extracted(ExtractedText::new(text.into()), config).await
}

/// Analyze a pitch deck file and write the result to `output_path` as
/// pretty-printed JSON.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn analyze_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let result = analyze(input_path, config).await?;
    let path = output_path.as_ref();

    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| AnalysisError::Internal(format!("serializing result: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AnalysisError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json)
        .await
        .map_err(|e| AnalysisError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| AnalysisError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(result)
}

/// Extract and segment a deck file without calling the provider.
///
/// Useful for previewing what the evaluation would see. Returns the map
/// as-is: an empty map means no headers were recognized, and it is the
/// caller's call whether that is fatal.
pub async fn sections(path: impl AsRef<Path>) -> Result<SectionMap, AnalysisError> {
    let doc = RawDocument::from_path(path.as_ref())?;
    let text = crate::extract::extract(&doc).await?;
    Ok(segment(&text))
}

/// In-memory variant of [`sections`].
pub async fn sections_from_bytes(
    bytes: Vec<u8>,
    filename: &str,
) -> Result<SectionMap, AnalysisError> {
    let doc = RawDocument::from_bytes(bytes, filename)?;
    let text = crate::extract::extract(&doc).await?;
    Ok(segment(&text))
}

// ── Shared spine ─────────────────────────────────────────────────────────

async fn analyze_document(
    doc: RawDocument,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    info!(
        "Analyzing '{}' ({} bytes, kind={})",
        doc.filename,
        doc.bytes.len(),
        doc.kind
    );
    let text = crate::extract::extract(&doc).await?;
    analyze_extracted(text, config).await
}

async fn analyze_extracted(
    text: ExtractedText,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let started = Instant::now();

    if text.is_empty() {
        return Err(AnalysisError::EmptyDocument);
    }

    let sections = segment(&text);
    if sections.is_empty() {
        return Err(AnalysisError::NoSectionsFound);
    }
    debug!(
        "Segmented into {} section(s): {}",
        sections.len(),
        sections.keys().collect::<Vec<_>>().join(", ")
    );

    let prompt = build_prompt(&sections, config.prompt_override.as_deref());
    let client = ProviderClient::new(config)?;
    let raw = client.evaluate(&prompt).await?;
    let result = parse_reply(&raw)?;

    info!(
        "Analysis complete in {:.1}s: overall rating {:.1}",
        started.elapsed().as_secs_f64(),
        result.overall_rating
    );
    Ok(result)
}
