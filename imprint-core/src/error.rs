use thiserror::Error;

/// Width of a perceptual hash in bits.
pub const PERCEPTUAL_HASH_BITS: u32 = 64;

/// Width of a strict or content digest in bytes.
pub const DIGEST_SIZE: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImprintError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported format: {0}")]
    Unsupported(String),

    #[error("Extraction yielded no usable text")]
    EmptyContent,

    #[error("Invalid hash length: expected {expected_bits} bits, got {actual_bits}")]
    InvalidHashLength { expected_bits: u32, actual_bits: u32 },

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Ledger error: {0}")]
    Ledger(String),
}

pub type Result<T> = std::result::Result<T, ImprintError>;
