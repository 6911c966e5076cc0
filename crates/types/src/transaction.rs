use alloy_primitives::B256;

use crate::TxData;

/// A transaction admitted to the pool.
///
/// Invariant: `hash` is the keccak of the canonical re-encoding of the raw
/// transaction bytes this record was decoded from (enforced by `tx-codec`
/// at admission, spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: B256,
    pub data: TxData,
    pub reserve: u128,
    /// Monotonic wall-clock seconds at admission.
    pub submitted: f64,
    pub sold: bool,
    /// Set by cleanup when a receipt is observed; the record is removed
    /// from the pool immediately after, so this rarely outlives a single
    /// cleanup pass.
    pub executed: bool,
}

impl Transaction {
    pub fn new(hash: B256, data: TxData, reserve: u128, submitted: f64) -> Self {
        Self { hash, data, reserve, submitted, sold: false, executed: false }
    }
}
