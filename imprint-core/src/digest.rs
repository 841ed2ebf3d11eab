//! Cryptographic fingerprints.
//!
//! Two SHA-256 digests are produced per document:
//!
//! - [`StrictHash`] over the exact file bytes. Any byte change produces a
//!   different value, which is what makes it usable for tamper detection.
//! - [`ContentHash`] over the UTF-8 bytes of the [`NormalizedText`]. Two files
//!   with the same wording collapse to one value regardless of container.
//!
//! Both render as `0x` followed by 64 lowercase hex digits so they can be handed
//! to hash-oriented external systems (bytes32 slots) without conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::{ImprintError, Result, DIGEST_SIZE};
use crate::normalize::NormalizedText;

/// Prefix used for every hex-rendered hash.
pub const HEX_PREFIX: &str = "0x";

/// Raw 256-bit digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest256([u8; DIGEST_SIZE]);

impl Digest256 {
    /// SHA-256 of `data`.
    pub fn of(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// `0x` + 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{HEX_PREFIX}{}", hex::encode(self.0))
    }

    /// Parse a 64-digit hex string, with or without the `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let digits = strip_hex_prefix(hex_str.trim());
        if digits.len() != DIGEST_SIZE * 2 {
            return Err(ImprintError::InvalidHashLength {
                expected_bits: (DIGEST_SIZE * 8) as u32,
                actual_bits: (digits.len() * 4) as u32,
            });
        }

        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ImprintError::InvalidHex(format!("{hex_str}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Digest256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Strip an optional `0x`/`0X` prefix.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

macro_rules! digest_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Digest256);

        impl $name {
            pub fn digest(&self) -> &Digest256 {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
                self.0.as_bytes()
            }

            pub fn to_hex(&self) -> String {
                self.0.to_hex()
            }

            pub fn from_hex(hex_str: &str) -> Result<Self> {
                Digest256::from_hex(hex_str).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ImprintError;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

digest_newtype!(
    /// SHA-256 over the exact input bytes.
    StrictHash
);

digest_newtype!(
    /// SHA-256 over normalized extracted text.
    ContentHash
);

/// Hash the exact bytes of a file.
pub fn strict_hash(bytes: &[u8]) -> StrictHash {
    StrictHash(Digest256::of(bytes))
}

/// Hash normalized text.
pub fn content_hash(text: &NormalizedText) -> ContentHash {
    ContentHash(Digest256::of(text.as_str().as_bytes()))
}

/// SHA-256 of an arbitrary string's UTF-8 bytes, rendered as `0x` hex.
///
/// Used to turn free-form references into a bytes32-shaped identifier. No
/// normalization is applied.
pub fn hash_text(text: &str) -> String {
    Digest256::of(text.as_bytes()).to_hex()
}
