use alloy_primitives::{Bytes, TxKind, U256};
use alloy_rlp::{Decodable, Header};
use auction_types::{AuctionError, AuctionResult};

/// Decoded fields of a legacy transaction body, in RLP order.
pub struct LegacyFields {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: TxKind,
    pub value: U256,
    pub input: Bytes,
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

pub fn decode_legacy_fields(buf: &mut &[u8]) -> AuctionResult<LegacyFields> {
    let header = Header::decode(buf).map_err(rlp_err)?;
    if !header.list {
        return Err(AuctionError::InvalidTx("expected an rlp list".into()));
    }
    Ok(LegacyFields {
        nonce: Decodable::decode(buf).map_err(rlp_err)?,
        gas_price: Decodable::decode(buf).map_err(rlp_err)?,
        gas_limit: Decodable::decode(buf).map_err(rlp_err)?,
        to: Decodable::decode(buf).map_err(rlp_err)?,
        value: Decodable::decode(buf).map_err(rlp_err)?,
        input: Decodable::decode(buf).map_err(rlp_err)?,
        v: Decodable::decode(buf).map_err(rlp_err)?,
        r: Decodable::decode(buf).map_err(rlp_err)?,
        s: Decodable::decode(buf).map_err(rlp_err)?,
    })
}

pub fn rlp_err(e: alloy_rlp::Error) -> AuctionError {
    AuctionError::InvalidTx(format!("rlp decode error: {e}"))
}
