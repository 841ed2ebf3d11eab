//! Verify command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use imprint_core::{Digest256, FingerprintConfig, FingerprintMode, Fingerprinter, HashMode};
use tracing::{error, info};

use crate::utils::{read_input, short_hash};

/// Execute the verify command.
pub fn execute(file: PathBuf, expected: String, strict_only: bool, quiet: bool) -> Result<()> {
    // Reject malformed hashes up front so a typo is a usage error, not a mismatch
    Digest256::from_hex(&expected).context("Invalid expected hash")?;

    let input = read_input(&file)?;
    let mode = if strict_only {
        FingerprintMode::StrictOnly
    } else {
        FingerprintMode::WithContent
    };
    let result = Fingerprinter::new(FingerprintConfig::from_env()).fingerprint(&input, mode);

    match result.matches(&expected) {
        Some(matched) => {
            info!(path = %file.display(), mode = %matched, "Hash matches");
            if !quiet {
                println!();
                println!("{}", "╔════════════════════════════════════════╗".green());
                println!("{}", "║                MATCH                   ║".green().bold());
                println!("{}", "╚════════════════════════════════════════╝".green());
                println!();
                println!("   {} {}", "File:".dimmed(), file.display());
                let how = match matched {
                    HashMode::Strict => "strict (identical bytes)",
                    HashMode::Content => "content (same normalized text)",
                };
                println!("   {} {}", "Matched:".dimmed(), how.green());
            }
            Ok(())
        }
        None => {
            error!(
                path = %file.display(),
                expected = short_hash(&expected, 16),
                strict = short_hash(&result.strict_hash.to_hex(), 16),
                "No hash matches"
            );
            if !quiet {
                println!();
                println!("{}", "╔════════════════════════════════════════╗".red());
                println!("{}", "║               MISMATCH                 ║".red().bold());
                println!("{}", "╚════════════════════════════════════════╝".red());
                println!();
                println!("   {} {}", "Expected:".dimmed(), expected);
                println!("   {} {}", "Strict:".dimmed(), result.strict_hash);
                match &result.content_hash {
                    Some(hash) => println!("   {} {}", "Content:".dimmed(), hash),
                    None => println!(
                        "   {} {}",
                        "Content:".dimmed(),
                        result
                            .failure_reason
                            .map(|r| r.to_string())
                            .unwrap_or_default()
                            .yellow()
                    ),
                }
            }
            bail!("Verification failed: no hash of {} matches", file.display())
        }
    }
}
