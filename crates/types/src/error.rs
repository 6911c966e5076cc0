use alloy_primitives::B256;

use crate::Pubkey;

/// Errors surfaced by the auction core. Every variant maps 1:1 onto an HTTP
/// 500 with the `Display` text as the body; the variant itself is not
/// transported over the wire.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("builder {0} is already registered")]
    AlreadyRegistered(Pubkey),

    #[error("builder {0} is not registered")]
    NotRegistered(Pubkey),

    #[error("builder {0} access is restricted")]
    AccessRestricted(Pubkey),

    #[error("transaction {0} is already in the pool")]
    Duplicate(B256),

    #[error("invalid transaction: {0}")]
    InvalidTx(String),

    #[error("transaction {0} not found in the pool")]
    NotFound(B256),

    #[error("transaction {0} has already been sold")]
    SoldAlready(B256),

    #[error("bid of {value} is below the reserve price of {reserve}")]
    BelowReserve { value: u128, reserve: u128 },

    #[error("bid for {bid_hash} submitted to the auction for {auction_hash}")]
    BidMismatch { bid_hash: B256, auction_hash: B256 },

    #[error("unknown transaction type byte 0x{0:02x}")]
    UnknownTxType(u8),

    #[error("re-encoding a stored transaction did not reproduce its hash")]
    EncodeMismatch,

    #[error("chain rpc error: {0}")]
    ChainRpc(#[from] ChainClientError),
}

pub type AuctionResult<T> = Result<T, AuctionError>;

/// Errors from the external chain client (C7). Kept distinct from
/// [`AuctionError`] so call sites can decide whether an RPC failure is fatal
/// (handler path, §7 "RPC errors in handlers are returned to the caller") or
/// should be logged and swallowed (background loop path).
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("transport error calling {method}: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("rpc error calling {method}: {message}")]
    Rpc { method: &'static str, message: String },
}
