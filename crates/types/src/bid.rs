use alloy_primitives::B256;

use crate::Pubkey;

/// A sealed bid submitted against a single transaction's auction.
/// Immutable once created (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub builder_pubkey: Pubkey,
    pub tx_hash: B256,
    pub value: u128,
    pub submitted: f64,
}
