//! Hamming-distance comparison of perceptual hashes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PerceptualHash;
use crate::error::{Result, PERCEPTUAL_HASH_BITS};

/// Default maximum distance for two images to count as near-duplicates.
/// With a 64-bit hash, 10 bits is roughly a 15% difference.
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 10;

/// Number of differing bits between two perceptual hashes, in `0..=64`.
///
/// Lower is more similar; 0 means identical hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityScore(u32);

impl SimilarityScore {
    pub fn value(&self) -> u32 {
        self.0
    }

    /// `1.0` for identical hashes, `0.0` when every bit differs.
    pub fn similarity(&self) -> f64 {
        1.0 - f64::from(self.0) / f64::from(PERCEPTUAL_HASH_BITS)
    }

    pub fn is_within(&self, threshold: u32) -> bool {
        self.0 <= threshold
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, PERCEPTUAL_HASH_BITS)
    }
}

/// XOR the two hashes and count set bits.
pub fn hamming_distance(a: &PerceptualHash, b: &PerceptualHash) -> SimilarityScore {
    SimilarityScore((a.as_u64() ^ b.as_u64()).count_ones())
}

/// Parse two hex-rendered hashes and compare them.
///
/// Either side not being exactly 64 bits wide is an
/// [`InvalidHashLength`](crate::ImprintError::InvalidHashLength) error.
pub fn hamming_distance_hex(a: &str, b: &str) -> Result<SimilarityScore> {
    let a = PerceptualHash::from_hex(a)?;
    let b = PerceptualHash::from_hex(b)?;
    Ok(hamming_distance(&a, &b))
}

/// Whether two hashes are within `threshold` bits
/// (default [`DEFAULT_SIMILARITY_THRESHOLD`]).
pub fn is_similar(a: &PerceptualHash, b: &PerceptualHash, threshold: Option<u32>) -> bool {
    hamming_distance(a, b).is_within(threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD))
}
