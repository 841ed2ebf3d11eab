//! Hash command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use imprint_core::{FingerprintConfig, FingerprintMode, FingerprintResult, Fingerprinter};
use serde::Serialize;
use tracing::{debug, info};

use crate::utils::read_input;
use crate::OutputFormat;

/// One file's fingerprint, as printed in JSON mode.
#[derive(Serialize)]
struct HashReport {
    file: String,
    #[serde(flatten)]
    result: FingerprintResult,
}

/// Execute the hash command.
pub fn execute(
    files: Vec<PathBuf>,
    strict_only: bool,
    show_text: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = FingerprintConfig::from_env().with_normalized_text(show_text);
    debug!(?config, "Loaded fingerprint config");

    let inputs = files
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>>>()?;

    let mode = if strict_only {
        FingerprintMode::StrictOnly
    } else {
        FingerprintMode::WithContent
    };

    let results = Fingerprinter::new(config).fingerprint_batch(&inputs, mode);
    info!(files = results.len(), ?mode, "Fingerprinted files");

    let reports: Vec<HashReport> = files
        .iter()
        .zip(results)
        .map(|(path, result)| HashReport {
            file: path.display().to_string(),
            result,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Text if quiet => {
            for report in &reports {
                let content = report
                    .result
                    .content_hash
                    .map(|h| h.to_hex())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}  {}  {}", report.result.strict_hash, content, report.file);
            }
            Ok(())
        }
        OutputFormat::Text => {
            for report in &reports {
                print_report(report);
            }
            Ok(())
        }
    }
}

fn print_json(reports: &[HashReport]) -> Result<()> {
    let json = match reports {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    }
    .context("Failed to serialize fingerprint")?;
    println!("{json}");
    Ok(())
}

fn print_report(report: &HashReport) {
    let result = &report.result;

    println!();
    println!("{}", report.file.bold());
    println!("   {} {}", "Strict:".dimmed(), result.strict_hash);

    match (&result.content_hash, result.failure_reason) {
        (Some(hash), _) if result.empty_content => {
            println!(
                "   {} {} {}",
                "Content:".dimmed(),
                hash,
                "(no text extracted)".yellow()
            );
        }
        (Some(hash), _) => println!("   {} {}", "Content:".dimmed(), hash.to_string().green()),
        (None, reason) => {
            let reason = reason.map(|r| r.to_string()).unwrap_or_default();
            match &result.failure_detail {
                Some(detail) => println!(
                    "   {} {} ({})",
                    "Content:".dimmed(),
                    format!("unavailable: {reason}").yellow(),
                    detail
                ),
                None => println!(
                    "   {} {}",
                    "Content:".dimmed(),
                    format!("unavailable: {reason}").yellow()
                ),
            }
        }
    }

    if let Some(text) = &result.normalized_text {
        println!("   {} {}", "Text:".dimmed(), text);
    }
}
