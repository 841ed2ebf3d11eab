//! CLI integration tests for imprint-cli.
//!
//! These tests run the actual binary and check outputs and exit codes.

use assert_cmd::Command;
use image::{ImageBuffer, Rgb, RgbImage};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// SHA-256("abc")
const ABC_SHA256: &str = "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

/// Get a Command for the imprint binary.
fn imprint() -> Command {
    let mut cmd = Command::cargo_bin("imprint").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("IMPRINT_MAX_CONTENT_BYTES")
        .env_remove("IMPRINT_SIMILARITY_THRESHOLD");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn gradient(width: u32, height: u32, invert: bool) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1)) as u8;
        let v = if invert { 255 - v } else { v };
        Rgb([v, v, v])
    })
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    imprint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content fingerprinting"))
        .stdout(predicate::str::contains("hash"))
        .stdout(predicate::str::contains("phash"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_version_displays_version() {
    imprint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("imprint"));
}

#[test]
fn test_help_shows_exit_codes() {
    imprint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("65"))
        .stdout(predicate::str::contains("66"));
}

#[test]
fn test_hash_help_shows_options() {
    imprint()
        .args(["hash", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--strict-only"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--show-text"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    imprint().assert().failure().code(2);
}

// ============================================================================
// Hash Command Tests
// ============================================================================

#[test]
fn test_hash_text_file() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"abc");

    imprint()
        .arg("hash")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(ABC_SHA256))
        .stdout(predicate::str::contains("Strict:"))
        .stdout(predicate::str::contains("Content:"));
}

#[test]
fn test_hash_quiet_line_format() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "shout.txt", b"  ABC\n");

    let output = imprint()
        .args(["-q", "hash"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let fields: Vec<&str> = stdout.split_whitespace().collect();
    assert_eq!(fields.len(), 3);
    assert_ne!(fields[0], ABC_SHA256);
    assert_eq!(fields[1], ABC_SHA256);
    assert!(fields[2].ends_with("shout.txt"));
}

#[test]
fn test_hash_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"ABC");

    let output = imprint()
        .args(["hash", "--format", "json", "--show-text"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["contentHash"], ABC_SHA256);
    assert_eq!(json["contentAvailable"], true);
    assert_eq!(json["normalizedText"], "abc");
    assert!(json["file"].as_str().unwrap().ends_with("abc.txt"));
}

#[test]
fn test_hash_multiple_files_json_array() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.txt", b"Hello   World\n");
    let b = write_file(&dir, "b.md", b"HELLO WORLD");

    let output = imprint()
        .args(["hash", "-f", "json"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["contentHash"], entries[1]["contentHash"]);
    assert_ne!(entries[0]["strictHash"], entries[1]["strictHash"]);
}

#[test]
fn test_hash_json_omits_text_unless_requested() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"ABC");

    let output = imprint()
        .args(["hash", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["contentHash"], ABC_SHA256);
    assert!(json.get("normalizedText").is_none());
}

#[test]
fn test_hash_respects_max_content_bytes_env() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"abc");

    let output = imprint()
        .env("IMPRINT_MAX_CONTENT_BYTES", "1")
        .args(["hash", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strictHash"], ABC_SHA256);
    assert!(json.get("contentHash").is_none());
    assert_eq!(json["failureReason"], "too_large");
}

#[test]
fn test_hash_strict_only_reports_disabled() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"abc");

    let output = imprint()
        .args(["hash", "--strict-only", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strictHash"], ABC_SHA256);
    assert!(json.get("contentHash").is_none());
    assert_eq!(json["failureReason"], "disabled");
}

#[test]
fn test_hash_broken_docx_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "broken.docx", b"not a zip archive");

    imprint()
        .arg("hash")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable: decode error"));
}

#[test]
fn test_hash_missing_file_exit_code() {
    imprint()
        .args(["hash", "/nonexistent/file.txt"])
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));
}

// ============================================================================
// Phash and Compare Tests
// ============================================================================

#[test]
fn test_phash_png() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ramp.png");
    gradient(90, 80, false).save(&path).unwrap();

    // Left-to-right brightening: every left pixel is darker, so no bit is set
    imprint()
        .args(["-q", "phash"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("0x0000000000000000"));
}

#[test]
fn test_phash_rejects_non_image() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.png", b"plain text");

    imprint()
        .arg("phash")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to hash image"));
}

#[test]
fn test_compare_hash_strings_similar() {
    imprint()
        .args(["-q", "compare", "0x0000000000000000", "0x00000000000000ff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));
}

#[test]
fn test_compare_hash_strings_not_similar() {
    imprint()
        .args(["compare", "0x0000000000000000", "0xffffffffffffffff"])
        .assert()
        .failure()
        .code(65)
        .stderr(predicate::str::contains("not similar"));
}

#[test]
fn test_compare_threshold_override() {
    imprint()
        .args([
            "compare",
            "--threshold",
            "4",
            "0x0000000000000000",
            "0x00000000000000ff",
        ])
        .assert()
        .failure()
        .code(65);
}

#[test]
fn test_compare_threshold_from_env() {
    imprint()
        .env("IMPRINT_SIMILARITY_THRESHOLD", "3")
        .args(["compare", "0x0000000000000000", "0x00000000000000ff"])
        .assert()
        .failure()
        .code(65);

    // Flag wins over the environment
    imprint()
        .env("IMPRINT_SIMILARITY_THRESHOLD", "3")
        .args([
            "compare",
            "--threshold",
            "8",
            "0x0000000000000000",
            "0x00000000000000ff",
        ])
        .assert()
        .success();
}

#[test]
fn test_compare_malformed_hash_is_usage_error() {
    imprint()
        .args(["compare", "0x123456789abcdef", "0x0000000000000000"])
        .assert()
        .failure()
        .code(64);
}

#[test]
fn test_compare_image_files() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.bmp");
    let c = dir.path().join("c.png");
    gradient(90, 80, false).save(&a).unwrap();
    gradient(90, 80, false).save(&b).unwrap();
    gradient(90, 80, true).save(&c).unwrap();

    imprint()
        .arg("compare")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("SIMILAR"));

    imprint()
        .arg("compare")
        .arg(&a)
        .arg(&c)
        .assert()
        .failure()
        .code(65);
}

// ============================================================================
// Verify Command Tests
// ============================================================================

#[test]
fn test_verify_strict_match() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"abc");

    imprint()
        .arg("verify")
        .arg(&file)
        .args(["--expected", ABC_SHA256])
        .assert()
        .success()
        .stdout(predicate::str::contains("MATCH"))
        .stdout(predicate::str::contains("strict"));
}

#[test]
fn test_verify_content_match() {
    let dir = TempDir::new().unwrap();
    let shouted = write_file(&dir, "shout.txt", b"ABC\r\n");

    imprint()
        .arg("verify")
        .arg(&shouted)
        .args(["--expected", ABC_SHA256])
        .assert()
        .success()
        .stdout(predicate::str::contains("content"));
}

#[test]
fn test_verify_strict_only_rejects_content_match() {
    let dir = TempDir::new().unwrap();
    let shouted = write_file(&dir, "shout.txt", b"ABC\r\n");

    imprint()
        .arg("verify")
        .arg(&shouted)
        .args(["--expected", ABC_SHA256, "--strict-only"])
        .assert()
        .failure()
        .code(65)
        .stderr(predicate::str::contains("Verification failed"));
}

#[test]
fn test_verify_mismatch_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "other.txt", b"something else");

    imprint()
        .arg("verify")
        .arg(&file)
        .args(["--expected", ABC_SHA256])
        .assert()
        .failure()
        .code(65)
        .stdout(predicate::str::contains("MISMATCH"));
}

#[test]
fn test_verify_mismatch_with_padded_expected_hash() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "other.txt", b"something else");
    let padded = format!("\u{3000}{ABC_SHA256}");

    imprint()
        .arg("verify")
        .arg(&file)
        .args(["--expected", padded.as_str()])
        .assert()
        .failure()
        .code(65)
        .stdout(predicate::str::contains("MISMATCH"));
}

#[test]
fn test_verify_malformed_expected_hash() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "abc.txt", b"abc");

    imprint()
        .arg("verify")
        .arg(&file)
        .args(["--expected", "0x1234"])
        .assert()
        .failure()
        .code(64);
}
