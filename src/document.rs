//! Document inputs and the extracted-text intermediate.
//!
//! [`RawDocument`] is the immutable entry value of the pipeline: the bytes
//! as uploaded, the declared media kind, and the original filename. It is
//! consumed by extraction and discarded once [`ExtractedText`] exists —
//! nothing downstream ever looks at the bytes again.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The five supported input media kinds, identified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Pdf,
    Docx,
    Txt,
    Md,
    Html,
}

impl MediaKind {
    /// Determine the media kind from a file extension (case-insensitive).
    ///
    /// Returns `UnsupportedFormat` for anything outside the supported set,
    /// so no decoder ever sees bytes of an unknown kind.
    pub fn from_extension(ext: &str) -> Result<Self, AnalysisError> {
        match ext.to_lowercase().as_str() {
            "pdf" => Ok(MediaKind::Pdf),
            "docx" => Ok(MediaKind::Docx),
            "txt" => Ok(MediaKind::Txt),
            "md" | "markdown" => Ok(MediaKind::Md),
            "html" | "htm" => Ok(MediaKind::Html),
            other => Err(AnalysisError::UnsupportedFormat {
                kind: other.to_string(),
            }),
        }
    }

    /// Determine the media kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| AnalysisError::UnsupportedFormat {
                kind: format!("(no extension: '{}')", path.display()),
            })?;
        Self::from_extension(ext)
    }

    /// Canonical lower-case name, matching the wire/kind vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "pdf",
            MediaKind::Docx => "docx",
            MediaKind::Txt => "txt",
            MediaKind::Md => "md",
            MediaKind::Html => "html",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input document: raw bytes plus the declared media kind.
///
/// Owned exclusively by the extraction call; the bytes are never shared or
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub kind: MediaKind,
    pub filename: String,
}

impl RawDocument {
    /// Build a document from in-memory bytes, detecting the kind from the
    /// filename extension.
    pub fn from_bytes(bytes: Vec<u8>, filename: &str) -> Result<Self, AnalysisError> {
        let kind = MediaKind::from_path(Path::new(filename))?;
        Ok(Self {
            bytes,
            kind,
            filename: filename.to_string(),
        })
    }

    /// Read a document from disk, detecting the kind from the extension.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let kind = MediaKind::from_path(path)?;

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalysisError::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => AnalysisError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => AnalysisError::Internal(format!("reading '{}': {e}", path.display())),
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            bytes,
            kind,
            filename,
        })
    }
}

/// Plain line-oriented text produced by extraction.
///
/// Blank lines are preserved as extraction artifacts; the segmenter decides
/// what they mean. Derived deterministically from one [`RawDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the text line by line, in document order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
