//! Raw-text extraction per document format.
//!
//! Dispatch is by file-name suffix only; bytes are never sniffed. The set of
//! extractors is closed: every [`DocumentFormat`] variant maps to exactly one
//! extractor, and anything unrecognised falls through to a strict UTF-8 decode.
//!
//! | suffix  | extractor                                   |
//! |---------|---------------------------------------------|
//! | `.txt`  | lossy UTF-8 decode                          |
//! | `.docx` | `word/document.xml` text runs              |
//! | `.pdf`  | text-showing operators, page by page       |
//! | other   | strict UTF-8 decode, else `Unsupported`    |

mod docx;
mod pdf;
mod text;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ImprintError;

/// Text recovered from a document before normalization.
pub type RawText = String;

/// Why extraction did not produce text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No extractor for the format, and the bytes are not plain UTF-8.
    #[error("unsupported format: {0}")]
    Unsupported(String),

    /// The bytes are malformed for the claimed format.
    #[error("failed to decode {format}: {reason}")]
    Decode {
        format: DocumentFormat,
        reason: String,
    },
}

impl From<ExtractError> for ImprintError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Unsupported(msg) => ImprintError::Unsupported(msg),
            e @ ExtractError::Decode { .. } => ImprintError::Decode(e.to_string()),
        }
    }
}

/// Document formats with a dedicated extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Docx,
    Pdf,
    /// Anything else; handled by a best-effort UTF-8 decode.
    Other,
}

impl DocumentFormat {
    /// Pick the format from a declared file name (case-insensitive suffix).
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        if lower.ends_with(".txt") {
            Self::Text
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else if lower.ends_with(".pdf") {
            Self::Pdf
        } else {
            Self::Other
        }
    }

    /// Canonical suffix, without the dot.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Text => Some("txt"),
            Self::Docx => Some("docx"),
            Self::Pdf => Some("pdf"),
            Self::Other => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Docx => write!(f, "DOCX"),
            Self::Pdf => write!(f, "PDF"),
            Self::Other => write!(f, "unknown"),
        }
    }
}

/// Extract raw text from `bytes`, dispatching on `declared_name`'s suffix.
///
/// Empty output is a valid result (for instance a scanned PDF); callers must
/// treat it as "no content signal", not as a failure.
pub fn extract(bytes: &[u8], declared_name: &str) -> Result<RawText, ExtractError> {
    let format = DocumentFormat::from_name(declared_name);
    debug!(name = declared_name, %format, bytes = bytes.len(), "Extracting text");

    let text = match format {
        DocumentFormat::Text => text::extract_lossy(bytes),
        DocumentFormat::Docx => docx::extract(bytes)?,
        DocumentFormat::Pdf => pdf::extract(bytes)?,
        DocumentFormat::Other => text::extract_strict(bytes).ok_or_else(|| {
            ExtractError::Unsupported(format!("{declared_name}: no extractor and not valid UTF-8"))
        })?,
    };

    debug!(%format, chars = text.chars().count(), "Extracted text");
    Ok(text)
}
