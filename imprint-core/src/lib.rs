//! Imprint Core - content fingerprinting library
//!
//! This crate turns documents and images into stable, comparable identity
//! tokens.
//!
//! # Features
//!
//! - Strict hash: SHA-256 over the exact file bytes
//! - Content hash: SHA-256 over normalized extracted text (TXT, DOCX, PDF),
//!   stable across container formats
//! - 64-bit difference hash for images with Hamming-distance similarity
//! - Batch fingerprinting on the rayon pool (`parallel` feature)
//! - Ledger collaborator seam for register/verify flows (`ledger` feature)
//!
//! All operations are stateless: no caches, no sessions, nothing shared
//! between calls.
//!
//! # Example
//!
//! ```
//! use imprint_core::{fingerprint, FingerprintInput, FingerprintMode};
//!
//! let txt = FingerprintInput::new(b"Hello   World\n".to_vec(), "hello.txt");
//! let md = FingerprintInput::new(b"HELLO WORLD".to_vec(), "hello.md");
//!
//! let a = fingerprint(&txt, FingerprintMode::WithContent);
//! let b = fingerprint(&md, FingerprintMode::WithContent);
//!
//! // Different bytes, same wording
//! assert_ne!(a.strict_hash, b.strict_hash);
//! assert_eq!(a.content_hash, b.content_hash);
//! ```

pub mod config;
pub mod digest;
pub mod error;
pub mod extract;
pub mod fingerprint;
#[cfg(feature = "ledger")]
pub mod ledger;
pub mod normalize;
pub mod perceptual;

// Re-export main types for convenience
pub use config::FingerprintConfig;
pub use digest::{content_hash, hash_text, strict_hash, ContentHash, Digest256, StrictHash};
pub use error::{ImprintError, Result, DIGEST_SIZE, PERCEPTUAL_HASH_BITS};
pub use extract::{extract, DocumentFormat, ExtractError, RawText};
pub use fingerprint::{
    fingerprint, FailureReason, FingerprintInput, FingerprintMode, FingerprintResult,
    Fingerprinter, HashMode,
};
pub use normalize::{normalize, NormalizedText};
pub use perceptual::{
    hamming_distance, hamming_distance_hex, is_similar, perceptual_hash, PerceptualHash,
    PerceptualHasher, SimilarityScore, DEFAULT_SIMILARITY_THRESHOLD,
};

#[cfg(feature = "ledger")]
pub use ledger::{verify_with_ledger, Ledger, LedgerRecord, MemoryLedger, TransactionHandle};
