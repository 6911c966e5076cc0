//! Raw-transaction codec (C1): decode a signed Ethereum-style transaction
//! from the bytes a searcher submits, and re-encode a [`TxData`] back to the
//! same canonical bytes for broadcast to the public mempool.
//!
//! Transaction type is classified by the first byte of the raw payload:
//! `> 0x7f` is a legacy (possibly EIP-155) transaction, otherwise the byte
//! is an EIP-2718 type prefix (`0x01` EIP-2930, `0x02` EIP-1559). Everything
//! else is rejected as [`auction_types::AuctionError::UnknownTxType`].

mod decode;
mod encode;
mod rlp_fields;
mod signature;

pub use decode::decode;
pub use encode::encode;
pub use signature::{chain_id_and_parity_to_legacy_v, legacy_v_to_chain_id_and_parity, recover_sender};
