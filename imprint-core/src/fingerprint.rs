//! Fingerprint orchestration.
//!
//! Every input gets a [`StrictHash`]. When content fingerprinting is requested
//! the bytes also go through extraction, normalization and a [`ContentHash`].
//! The two pipelines are independent: a failure on the content side is
//! reported in the result (with a machine-readable [`FailureReason`]) and never
//! affects the strict hash.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::FingerprintConfig;
use crate::digest::{content_hash, strict_hash, ContentHash, Digest256, StrictHash};
use crate::error::{ImprintError, Result};
use crate::extract::{extract, DocumentFormat, ExtractError};
use crate::normalize::{normalize, NormalizedText};

/// File bytes plus the declared name used for format dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintInput {
    bytes: Vec<u8>,
    name: String,
}

impl FingerprintInput {
    pub fn new(bytes: impl Into<Vec<u8>>, name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            name: name.into(),
        }
    }

    /// Read a file, using its file name as the declared name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { bytes, name })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes. Informational only.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_name(&self.name)
    }
}

/// Which pipelines to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintMode {
    /// Strict hash only.
    StrictOnly,
    /// Strict hash plus content hash when text can be extracted.
    #[default]
    WithContent,
}

/// Which of the two hashes a caller has selected (for registration or lookup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMode {
    #[default]
    Strict,
    Content,
}

impl fmt::Display for HashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Why a result carries no content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No extractor for the format and the bytes are not plain text.
    Unsupported,
    /// The bytes are malformed for the declared format.
    DecodeError,
    /// Content fingerprinting was not requested.
    Disabled,
    /// The input exceeds the configured content extraction limit.
    TooLarge,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "unsupported format"),
            Self::DecodeError => write!(f, "decode error"),
            Self::Disabled => write!(f, "content mode disabled"),
            Self::TooLarge => write!(f, "input too large for content extraction"),
        }
    }
}

impl From<&ExtractError> for FailureReason {
    fn from(err: &ExtractError) -> Self {
        match err {
            ExtractError::Unsupported(_) => Self::Unsupported,
            ExtractError::Decode { .. } => Self::DecodeError,
        }
    }
}

/// Outcome of fingerprinting one input. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintResult {
    pub strict_hash: StrictHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<ContentHash>,
    pub content_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
    /// Human-readable detail for `failure_reason`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
    /// Extraction succeeded but produced no text; `content_hash` is the hash
    /// of the empty string.
    #[serde(default)]
    pub empty_content: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<NormalizedText>,
}

impl FingerprintResult {
    fn strict_only(strict_hash: StrictHash, reason: FailureReason, detail: Option<String>) -> Self {
        Self {
            strict_hash,
            content_hash: None,
            content_available: false,
            failure_reason: Some(reason),
            failure_detail: detail,
            empty_content: false,
            normalized_text: None,
        }
    }

    /// The hash for `mode`, hex-rendered, if available.
    pub fn selected(&self, mode: HashMode) -> Option<String> {
        match mode {
            HashMode::Strict => Some(self.strict_hash.to_hex()),
            HashMode::Content => self.content_hash.map(|h| h.to_hex()),
        }
    }

    /// Which of this result's hashes equals `hash_hex`, strict first.
    ///
    /// Unparseable input matches nothing.
    pub fn matches(&self, hash_hex: &str) -> Option<HashMode> {
        let expected = Digest256::from_hex(hash_hex).ok()?;
        if self.strict_hash.digest() == &expected {
            Some(HashMode::Strict)
        } else if self.content_hash.as_ref().map(ContentHash::digest) == Some(&expected) {
            Some(HashMode::Content)
        } else {
            None
        }
    }

    /// The content hash, treating every unavailable or empty state as an error.
    pub fn require_content(&self) -> Result<&ContentHash> {
        if self.empty_content {
            return Err(ImprintError::EmptyContent);
        }
        match (&self.content_hash, self.failure_reason) {
            (Some(hash), _) => Ok(hash),
            (None, Some(FailureReason::DecodeError)) => Err(ImprintError::Decode(
                self.failure_detail.clone().unwrap_or_default(),
            )),
            (None, reason) => Err(ImprintError::Unsupported(
                self.failure_detail
                    .clone()
                    .or_else(|| reason.map(|r| r.to_string()))
                    .unwrap_or_default(),
            )),
        }
    }
}

/// Runs the strict and content pipelines with a fixed configuration.
///
/// Holds no state beyond its configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    config: FingerprintConfig,
}

impl Fingerprinter {
    pub fn new(config: FingerprintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Fingerprint one input. Never fails: content-side problems are reported
    /// in the result.
    pub fn fingerprint(&self, input: &FingerprintInput, mode: FingerprintMode) -> FingerprintResult {
        let strict = strict_hash(input.bytes());
        debug!(name = input.name(), bytes = input.size(), strict = %strict, "Computed strict hash");

        if mode == FingerprintMode::StrictOnly {
            return FingerprintResult::strict_only(strict, FailureReason::Disabled, None);
        }

        if !self.config.allows_content(input.size()) {
            warn!(
                name = input.name(),
                bytes = input.size(),
                limit = ?self.config.max_content_bytes,
                "Skipping content extraction for oversized input"
            );
            return FingerprintResult::strict_only(
                strict,
                FailureReason::TooLarge,
                Some(format!("{} bytes exceeds content extraction limit", input.size())),
            );
        }

        let raw = match extract(input.bytes(), input.name()) {
            Ok(raw) => raw,
            Err(e) => {
                info!(name = input.name(), error = %e, "Content mode unavailable");
                return FingerprintResult::strict_only(
                    strict,
                    FailureReason::from(&e),
                    Some(e.to_string()),
                );
            }
        };

        let normalized = normalize(&raw);
        let content = content_hash(&normalized);
        let empty_content = normalized.is_empty();
        if empty_content {
            warn!(name = input.name(), "Extraction produced no text; content hash covers the empty string");
        }
        debug!(name = input.name(), content = %content, chars = normalized.len(), "Computed content hash");

        FingerprintResult {
            strict_hash: strict,
            content_hash: Some(content),
            content_available: true,
            failure_reason: None,
            failure_detail: None,
            empty_content,
            normalized_text: self.config.keep_normalized_text.then_some(normalized),
        }
    }

    /// Fingerprint independent inputs; results are in input order.
    ///
    /// With the `parallel` feature the inputs are processed on the rayon pool.
    pub fn fingerprint_batch(
        &self,
        inputs: &[FingerprintInput],
        mode: FingerprintMode,
    ) -> Vec<FingerprintResult> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            inputs
                .par_iter()
                .map(|input| self.fingerprint(input, mode))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            inputs
                .iter()
                .map(|input| self.fingerprint(input, mode))
                .collect()
        }
    }
}

/// Fingerprint with the default configuration.
pub fn fingerprint(input: &FingerprintInput, mode: FingerprintMode) -> FingerprintResult {
    Fingerprinter::default().fingerprint(input, mode)
}
