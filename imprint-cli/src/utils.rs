//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use imprint_core::FingerprintInput;
use tracing::info;

/// Read a file into a fingerprint input named after the file.
pub fn read_input(path: &Path) -> Result<FingerprintInput> {
    let input = FingerprintInput::from_path(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!(path = %path.display(), bytes = input.size(), "Read file");
    Ok(input)
}

/// First `len` hex digits of a `0x`-prefixed hash, for compact display.
///
/// Input that is not sliceable at that width is returned whole.
pub fn short_hash(hex: &str, len: usize) -> &str {
    let hex = hex.trim();
    let end = (2 + len).min(hex.len());
    hex.get(..end).unwrap_or(hex)
}
