//! Imprint CLI - document and image fingerprinting tool.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  64  Usage error
  65  Verification failed (hash mismatch, images not similar)
  66  Input file not found or unreadable
  74  Output error";

#[derive(Parser)]
#[command(name = "imprint")]
#[command(author, version, about = "Content fingerprinting for documents and images", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress decorated output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute strict and content hashes for documents
    Hash {
        /// Files to fingerprint
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Skip text extraction; only hash the exact bytes
        #[arg(long)]
        strict_only: bool,

        /// Include the normalized text in the output
        #[arg(long)]
        show_text: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compute 64-bit perceptual hashes for images
    Phash {
        /// Images to hash (PNG, JPEG, GIF, WebP, BMP)
        #[arg(value_name = "IMAGE", required = true)]
        images: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compare two images or perceptual hashes by Hamming distance
    Compare {
        /// Image path or 0x-prefixed 16-digit perceptual hash
        #[arg(value_name = "A")]
        a: String,

        /// Image path or 0x-prefixed 16-digit perceptual hash
        #[arg(value_name = "B")]
        b: String,

        /// Maximum distance (bits) to count as similar [env: IMPRINT_SIMILARITY_THRESHOLD]
        #[arg(short, long)]
        threshold: Option<u32>,
    },

    /// Check a file against an expected strict or content hash
    Verify {
        /// File to check
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Expected hash (0x + 64 hex digits)
        #[arg(short, long, value_name = "HASH")]
        expected: String,

        /// Only accept a strict (exact bytes) match
        #[arg(long)]
        strict_only: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Hash {
            files,
            strict_only,
            show_text,
            format,
        } => commands::hash::execute(files, strict_only, show_text, format, quiet),
        Commands::Phash { images, format } => commands::phash::execute(images, format, quiet),
        Commands::Compare { a, b, threshold } => commands::compare::execute(a, b, threshold, quiet),
        Commands::Verify {
            file,
            expected,
            strict_only,
        } => commands::verify::execute(file, expected, strict_only, quiet),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit = match run(cli) {
        Ok(()) => ExitCode::success(),
        Err(err) => ExitCode::from_anyhow(&err),
    };

    if let Some(message) = &exit.message {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
    std::process::exit(exit.code);
}
