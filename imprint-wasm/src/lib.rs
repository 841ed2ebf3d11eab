//! WebAssembly bindings for imprint fingerprinting.
//!
//! Files are fingerprinted client-side in the browser without being uploaded.
//! Every function returns a JSON string; failures are reported in an `error`
//! field rather than thrown.

use imprint_core::{
    hamming_distance_hex, FingerprintInput, FingerprintMode, FingerprintResult, Fingerprinter,
    PerceptualHasher, DEFAULT_SIMILARITY_THRESHOLD,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PerceptualResult {
    perceptual_hash: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DistanceResult {
    distance: Option<u32>,
    similarity: Option<f64>,
    similar: Option<bool>,
    error: Option<String>,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!(r#"{{"error":"Serialization error: {}"}}"#, e))
}

/// Fingerprint a file.
///
/// # Arguments
/// * `file_bytes` - The file content
/// * `file_name` - Declared name; its extension selects the text extractor
/// * `with_content` - Also compute the content hash
///
/// # Returns
/// A JSON-serialized fingerprint result (`strictHash`, `contentHash`, ...)
#[wasm_bindgen]
pub fn fingerprint_file(file_bytes: &[u8], file_name: &str, with_content: bool) -> String {
    let mode = if with_content {
        FingerprintMode::WithContent
    } else {
        FingerprintMode::StrictOnly
    };
    let input = FingerprintInput::new(file_bytes, file_name);
    let result: FingerprintResult = Fingerprinter::default().fingerprint(&input, mode);
    to_json(&result)
}

/// Compute the 64-bit perceptual hash of an encoded image.
#[wasm_bindgen]
pub fn perceptual_hash(image_bytes: &[u8]) -> String {
    let result = match PerceptualHasher::new().hash_bytes(image_bytes) {
        Ok(hash) => PerceptualResult {
            perceptual_hash: Some(hash.to_hex()),
            error: None,
        },
        Err(e) => PerceptualResult {
            perceptual_hash: None,
            error: Some(e.to_string()),
        },
    };
    to_json(&result)
}

/// Hamming distance between two hex perceptual hashes.
///
/// `threshold` defaults to the library's similarity threshold when absent.
#[wasm_bindgen]
pub fn hamming_distance(a: &str, b: &str, threshold: Option<u32>) -> String {
    let threshold = threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);
    let result = match hamming_distance_hex(a, b) {
        Ok(score) => DistanceResult {
            distance: Some(score.value()),
            similarity: Some(score.similarity()),
            similar: Some(score.is_within(threshold)),
            error: None,
        },
        Err(e) => DistanceResult {
            distance: None,
            similarity: None,
            similar: None,
            error: Some(e.to_string()),
        },
    };
    to_json(&result)
}

/// Get the library version.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
