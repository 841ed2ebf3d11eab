//! Perceptual hash command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use imprint_core::PerceptualHasher;
use serde_json::json;
use tracing::info;

use crate::utils::read_input;
use crate::OutputFormat;

/// Execute the phash command.
pub fn execute(images: Vec<PathBuf>, format: OutputFormat, quiet: bool) -> Result<()> {
    let hasher = PerceptualHasher::new();
    let mut entries = Vec::with_capacity(images.len());

    for path in &images {
        let input = read_input(path)?;
        let hash = hasher
            .hash_bytes(input.bytes())
            .with_context(|| format!("Failed to hash image: {}", path.display()))?;
        info!(path = %path.display(), %hash, "Computed perceptual hash");
        entries.push((path.display().to_string(), hash));
    }

    match format {
        OutputFormat::Json => {
            let values: Vec<_> = entries
                .iter()
                .map(|(file, hash)| json!({ "file": file, "perceptualHash": hash }))
                .collect();
            let out = match values.as_slice() {
                [single] => serde_json::to_string_pretty(single),
                many => serde_json::to_string_pretty(many),
            }
            .context("Failed to serialize perceptual hash")?;
            println!("{out}");
        }
        OutputFormat::Text => {
            for (file, hash) in &entries {
                if quiet {
                    println!("{hash}  {file}");
                } else {
                    println!("{}  {}", hash.to_string().cyan(), file);
                }
            }
        }
    }

    Ok(())
}
