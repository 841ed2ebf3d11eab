//! Ledger collaborator contract.
//!
//! The fingerprinting core never writes to or reads from a ledger itself; it
//! only produces the hash argument. This module defines the seam a host
//! application implements (a smart-contract registry, a database, ...) and an
//! in-memory double for tests.
//!
//! ```no_run
//! use imprint_core::ledger::{verify_with_ledger, Ledger, MemoryLedger};
//! use imprint_core::{fingerprint, FingerprintInput, FingerprintMode, HashMode};
//!
//! # async fn example() -> imprint_core::Result<()> {
//! let ledger = MemoryLedger::new("0x84e0cf4fb0884585c21536299416c2250dff452c");
//! let input = FingerprintInput::new(b"contract text".to_vec(), "contract.txt");
//! let result = fingerprint(&input, FingerprintMode::WithContent);
//!
//! let hash = result.selected(HashMode::Content).unwrap();
//! ledger.register(&hash, "ipfs://bafy...").await?;
//!
//! let verification = verify_with_ledger(&ledger, &result, HashMode::Content).await?;
//! assert!(verification.record.exists);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digest::{hash_text, Digest256};
use crate::error::{ImprintError, Result};
use crate::fingerprint::{FingerprintResult, HashMode};

/// Handle returned by a registration (e.g. a transaction hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle(pub String);

/// What a ledger knows about a hash.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub exists: bool,
    /// Registrant address
    pub owner: String,
    /// Registration time (Unix seconds)
    pub timestamp: i64,
    /// Off-ledger reference supplied at registration (CID, URL, ...)
    pub reference: String,
}

/// External ledger.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Register `hash` with an off-ledger reference.
    async fn register(&self, hash: &str, reference: &str) -> Result<TransactionHandle>;

    /// Look up a hash. Unknown hashes return a record with `exists == false`.
    async fn lookup(&self, hash: &str) -> Result<LedgerRecord>;
}

/// Result of checking a fingerprint against a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub mode: HashMode,
    pub hash: String,
    pub record: LedgerRecord,
}

/// Look up the hash selected by `mode`.
///
/// Fails with [`ImprintError::Unsupported`] when content mode is selected but
/// the result has no content hash.
pub async fn verify_with_ledger<L: Ledger + ?Sized>(
    ledger: &L,
    result: &FingerprintResult,
    mode: HashMode,
) -> Result<Verification> {
    let hash = result.selected(mode).ok_or_else(|| {
        ImprintError::Unsupported(format!(
            "no {mode} hash available ({})",
            result
                .failure_reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unknown reason".into())
        ))
    })?;

    let record = ledger.lookup(&hash).await?;
    debug!(%mode, hash = %hash, exists = record.exists, "Ledger lookup");
    Ok(Verification { mode, hash, record })
}

/// In-memory ledger for tests and examples.
/// WARNING: not persistent; contents are lost on drop.
pub struct MemoryLedger {
    owner: String,
    records: DashMap<Digest256, LedgerRecord>,
}

impl MemoryLedger {
    /// Create an empty ledger whose registrations are owned by `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            records: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn key(hash: &str) -> Result<Digest256> {
        Digest256::from_hex(hash).map_err(|e| ImprintError::Ledger(e.to_string()))
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn register(&self, hash: &str, reference: &str) -> Result<TransactionHandle> {
        let key = Self::key(hash)?;
        let timestamp = Utc::now().timestamp();

        // Check and insert under one shard lock
        match self.records.entry(key) {
            Entry::Occupied(_) => {
                return Err(ImprintError::Ledger(format!("{hash} is already registered")));
            }
            Entry::Vacant(slot) => {
                slot.insert(LedgerRecord {
                    exists: true,
                    owner: self.owner.clone(),
                    timestamp,
                    reference: reference.to_string(),
                });
            }
        }

        let tx = hash_text(&format!("{}:{reference}:{timestamp}", key.to_hex()));
        Ok(TransactionHandle(tx))
    }

    async fn lookup(&self, hash: &str) -> Result<LedgerRecord> {
        let key = Self::key(hash)?;
        Ok(self
            .records
            .get(&key)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }
}
