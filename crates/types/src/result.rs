use alloy_primitives::B256;

use crate::Pubkey;

/// The outcome of settling one transaction's auction (spec.md §4.2).
/// Named `AuctionOutcome` rather than `Result` to avoid shadowing
/// `std::result::Result` at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionOutcome {
    pub winner_pubkey: Pubkey,
    pub tx_hash: B256,
    pub payment: u128,
}
