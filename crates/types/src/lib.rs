//! Shared data model for the private order-flow auction.
//!
//! This crate has no business logic of its own: it is the `Builder` /
//! `Transaction` / `Bid` / `AuctionOutcome` record shapes and the
//! [`AuctionError`] currency that `tx-codec`, `auction-core`,
//! `auction-pool`, `auction-chain` and `auction-rpc` all share.

mod bid;
mod builder;
mod error;
mod pubkey;
mod result;
mod transaction;
mod tx;

pub use bid::Bid;
pub use builder::Builder;
pub use error::{AuctionError, AuctionResult, ChainClientError};
pub use pubkey::Pubkey;
pub use result::AuctionOutcome;
pub use transaction::Transaction;
pub use tx::TxData;

/// Beacon-chain genesis used to derive the current slot (spec.md §6).
pub const GENESIS_TIME: u64 = 1_606_824_023;
/// Seconds per slot.
pub const SLOT_SECONDS: u64 = 12;
/// Delay within a slot before the settlement loop acts on it, to let bids
/// accumulate.
pub const SETTLEMENT_DELAY_SECONDS: u64 = 10;
/// A transaction must have dwelled in the pool at least this long before an
/// auction for it can settle.
pub const MIN_TIME_IN_TX_POOL_SECONDS: f64 = 1.0;
/// A transaction older than this many slots is force-flushed to the public
/// mempool by the cleanup loop.
pub const MAX_SLOTS_IN_TX_POOL: u64 = 10;
/// How many of the most recent slots `results` retains (§9 expansion: the
/// source grows this unboundedly, SPEC_FULL.md resolves the open question
/// with a retention horizon).
pub const RESULT_RETENTION_SLOTS: u64 = 256;

/// `floor((now - GENESIS_TIME) / SLOT_SECONDS)`.
pub fn slot_at(now: f64) -> u64 {
    (((now - GENESIS_TIME as f64) / SLOT_SECONDS as f64).floor()).max(0.0) as u64
}

/// Wall-clock seconds since the Unix epoch, as a float (matching the
/// `submitted`/`started` timestamps used throughout the data model).
pub fn now_seconds() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is before the unix epoch")
        .as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_at_genesis_is_zero() {
        assert_eq!(slot_at(GENESIS_TIME as f64), 0);
    }

    #[test]
    fn slot_at_advances_every_twelve_seconds() {
        let t = GENESIS_TIME as f64 + 130.0;
        assert_eq!(slot_at(t), 10);
    }
}
