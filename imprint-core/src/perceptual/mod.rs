//! Perceptual hashing for images.
//!
//! Unlike the document digests, a perceptual hash is derived from the picture
//! rather than the file: two encodings of the same pixels hash identically,
//! and visually close images land a few bits apart. It is not
//! collision-resistant and must never be used for tamper detection.
//!
//! # Components
//!
//! - [`dhash`]: 64-bit difference hash over a 9×8 luminance grid.
//! - [`similarity`]: Hamming distance and near-duplicate thresholds.

pub mod dhash;
pub mod similarity;

pub use dhash::*;
pub use similarity::*;
