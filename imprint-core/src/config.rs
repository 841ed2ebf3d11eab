//! Fingerprinting configuration.
//!
//! Handles loading options from environment variables with sensible defaults.

use crate::perceptual::DEFAULT_SIMILARITY_THRESHOLD;

/// Default cap on input size for content extraction (64 MiB).
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 64 * 1024 * 1024;

/// Options for [`Fingerprinter`](crate::Fingerprinter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    /// Inputs larger than this skip content extraction (strict hash is
    /// always computed). `None` disables the limit.
    pub max_content_bytes: Option<usize>,
    /// Return the normalized text alongside the content hash (default: true)
    pub keep_normalized_text: bool,
    /// Maximum Hamming distance for two images to count as similar (default: 10)
    pub similarity_threshold: u32,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: Some(DEFAULT_MAX_CONTENT_BYTES),
            keep_normalized_text: true,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl FingerprintConfig {
    /// Load configuration from environment variables.
    ///
    /// - `IMPRINT_MAX_CONTENT_BYTES`: byte limit, `0` for unlimited
    /// - `IMPRINT_SIMILARITY_THRESHOLD`: bits, clamped to 64
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_content_bytes = match lookup("IMPRINT_MAX_CONTENT_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            Some(0) => None,
            Some(limit) => Some(limit),
            None => defaults.max_content_bytes,
        };

        let similarity_threshold = lookup("IMPRINT_SIMILARITY_THRESHOLD")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map(|t| t.min(64))
            .unwrap_or(defaults.similarity_threshold);

        Self {
            max_content_bytes,
            similarity_threshold,
            ..defaults
        }
    }

    /// Set the content extraction size limit.
    pub fn with_max_content_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_content_bytes = limit;
        self
    }

    /// Set whether normalized text is returned.
    pub fn with_normalized_text(mut self, keep: bool) -> Self {
        self.keep_normalized_text = keep;
        self
    }

    /// Set the similarity threshold, clamped to 64 bits.
    pub fn with_similarity_threshold(mut self, threshold: u32) -> Self {
        self.similarity_threshold = threshold.min(64);
        self
    }

    /// Whether an input of `size` bytes may go through content extraction.
    pub fn allows_content(&self, size: usize) -> bool {
        self.max_content_bytes.map_or(true, |limit| size <= limit)
    }
}
