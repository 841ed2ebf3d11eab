//! Compare command implementation.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use imprint_core::{hamming_distance, FingerprintConfig, PerceptualHash, PerceptualHasher};
use tracing::{debug, info};

use crate::utils::read_input;

/// Resolve an argument to a perceptual hash: an existing file is decoded as an
/// image, anything else must be a hex hash.
fn resolve(arg: &str) -> Result<PerceptualHash> {
    let path = Path::new(arg);
    if path.is_file() {
        let input = read_input(path)?;
        let hash = PerceptualHasher::new()
            .hash_bytes(input.bytes())
            .with_context(|| format!("Failed to hash image: {}", path.display()))?;
        debug!(path = %path.display(), %hash, "Hashed image");
        Ok(hash)
    } else {
        PerceptualHash::from_hex(arg)
            .with_context(|| format!("Invalid perceptual hash (and no such file): {arg}"))
    }
}

/// Execute the compare command.
pub fn execute(a: String, b: String, threshold: Option<u32>, quiet: bool) -> Result<()> {
    let threshold = threshold.unwrap_or_else(|| FingerprintConfig::from_env().similarity_threshold);

    let hash_a = resolve(&a)?;
    let hash_b = resolve(&b)?;
    let distance = hamming_distance(&hash_a, &hash_b);
    let similar = distance.is_within(threshold);

    info!(
        a = %hash_a,
        b = %hash_b,
        distance = distance.value(),
        threshold,
        similar,
        "Compared perceptual hashes"
    );

    if quiet {
        println!("{}", distance.value());
    } else {
        println!();
        println!("   {} {}  {}", "A:".dimmed(), hash_a, a);
        println!("   {} {}  {}", "B:".dimmed(), hash_b, b);
        println!(
            "   {} {} ({:.1}% similar, threshold {})",
            "Distance:".dimmed(),
            distance,
            distance.similarity() * 100.0,
            threshold
        );
        if similar {
            println!("   {} {}", "Result:".dimmed(), "SIMILAR".green().bold());
        } else {
            println!("   {} {}", "Result:".dimmed(), "DIFFERENT".red().bold());
        }
    }

    if !similar {
        bail!(
            "Images are not similar (distance {} > threshold {})",
            distance.value(),
            threshold
        );
    }
    Ok(())
}
