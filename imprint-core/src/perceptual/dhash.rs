//! Difference hash (dHash).
//!
//! # Algorithm
//!
//! 1. Decode the image and convert to 8-bit RGB (alpha is discarded).
//! 2. Resample to exactly 9 columns × 8 rows with a bilinear filter
//!    ([`FilterType::Triangle`]). The extra column gives 8 comparisons per row.
//! 3. Luminance per cell: `round(0.299 R + 0.587 G + 0.114 B)`.
//! 4. For each row, bit = `L[x] > L[x + 1]` for `x` in `0..8`; bits are taken
//!    row-major, most significant first.
//!
//! The result is 64 bits, rendered as `0x` plus 16 lowercase hex digits.
//!
//! # Usage
//!
//! ```no_run
//! use imprint_core::perceptual::{hamming_distance, PerceptualHasher};
//!
//! let hasher = PerceptualHasher::default();
//! let a = hasher.hash_bytes(&std::fs::read("a.png").unwrap()).unwrap();
//! let b = hasher.hash_bytes(&std::fs::read("b.webp").unwrap()).unwrap();
//! let near_duplicate = hamming_distance(&a, &b).value() <= 10;
//! ```

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::digest::{strip_hex_prefix, HEX_PREFIX};
use crate::error::{ImprintError, Result, PERCEPTUAL_HASH_BITS};

/// Columns in the resampled grid.
pub const GRID_WIDTH: u32 = 9;

/// Rows in the resampled grid.
pub const GRID_HEIGHT: u32 = 8;

/// Hex digits in a rendered perceptual hash (without prefix).
pub const PERCEPTUAL_HASH_HEX_DIGITS: usize = (PERCEPTUAL_HASH_BITS / 4) as usize;

/// Resampling filter used for the 9×8 grid.
///
/// Hash values for borderline images depend on this choice, so it is fixed.
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// A 64-bit difference hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PerceptualHash(u64);

impl PerceptualHash {
    pub const fn from_u64(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// `0x` + 16 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{HEX_PREFIX}{:016x}", self.0)
    }

    /// Parse exactly 16 hex digits, with or without the `0x` prefix.
    ///
    /// Any other width is rejected with [`ImprintError::InvalidHashLength`];
    /// short values are never zero-padded.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let digits = strip_hex_prefix(hex_str.trim());
        if digits.len() != PERCEPTUAL_HASH_HEX_DIGITS {
            return Err(ImprintError::InvalidHashLength {
                expected_bits: PERCEPTUAL_HASH_BITS,
                actual_bits: (digits.len() * 4) as u32,
            });
        }
        // from_str_radix would accept a leading '+'
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ImprintError::InvalidHex(hex_str.to_string()));
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| ImprintError::InvalidHex(format!("{hex_str}: {e}")))
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PerceptualHash {
    type Err = ImprintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for PerceptualHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PerceptualHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Computes difference hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerceptualHasher;

impl PerceptualHasher {
    pub fn new() -> Self {
        Self
    }

    /// Decode `image_data` and hash it.
    ///
    /// Supports PNG, JPEG, GIF, WebP and BMP. Undecodable input is an error,
    /// never a zero hash.
    pub fn hash_bytes(&self, image_data: &[u8]) -> Result<PerceptualHash> {
        let image = image::load_from_memory(image_data)
            .map_err(|e| ImprintError::Decode(format!("Failed to decode image: {e}")))?;

        debug!(
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );

        Ok(self.hash_image(&image))
    }

    /// Hash an already decoded image.
    pub fn hash_image(&self, image: &DynamicImage) -> PerceptualHash {
        let grid = imageops::resize(&image.to_rgb8(), GRID_WIDTH, GRID_HEIGHT, RESAMPLE_FILTER);
        hash_grid(&grid)
    }

    /// Check if the provided bytes appear to be a supported image format.
    pub fn is_supported_format(data: &[u8]) -> bool {
        image::guess_format(data).is_ok()
    }
}

/// Hash raw image bytes with the default hasher.
pub fn perceptual_hash(image_data: &[u8]) -> Result<PerceptualHash> {
    PerceptualHasher::default().hash_bytes(image_data)
}

/// Luminance of one RGB pixel, rounded to the nearest integer.
pub fn luminance([r, g, b]: [u8; 3]) -> u8 {
    let l = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    l.round().min(255.0) as u8
}

/// Gradient bits of a 9×8 grid.
fn hash_grid(grid: &RgbImage) -> PerceptualHash {
    debug_assert_eq!(grid.dimensions(), (GRID_WIDTH, GRID_HEIGHT));

    let mut bits = 0u64;
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH - 1 {
            let left = luminance(grid.get_pixel(x, y).0);
            let right = luminance(grid.get_pixel(x + 1, y).0);
            bits = (bits << 1) | u64::from(left > right);
        }
    }
    PerceptualHash(bits)
}
