use alloy_eips::eip2930::AccessList;
use alloy_primitives::{keccak256, Bytes, TxKind};
use alloy_rlp::{Encodable, Header};
use auction_types::{AuctionError, AuctionResult, TxData};

/// Re-encodes a [`TxData`] back into its canonical raw wire form.
///
/// Dispatches on fee-field presence: EIP-1559 if both `max_fee_per_gas` and
/// `max_priority_fee_per_gas` are set, EIP-2930 if `access_list` is set with
/// a plain `gas_price`, legacy otherwise. The result is checked against
/// `tx.hash` before returning; a mismatch means the `TxData` was mutated
/// in a way that doesn't round-trip and is reported as
/// [`AuctionError::EncodeMismatch`].
pub fn encode(tx: &TxData) -> AuctionResult<Bytes> {
    let raw = if tx.is_eip1559() {
        encode_eip1559(tx)
    } else if tx.access_list.is_some() {
        encode_eip2930(tx)
    } else {
        encode_legacy(tx)
    };

    if keccak256(&raw) != tx.hash {
        return Err(AuctionError::EncodeMismatch);
    }
    Ok(Bytes::from(raw))
}

fn to_kind(to: Option<alloy_primitives::Address>) -> TxKind {
    match to {
        Some(addr) => TxKind::Call(addr),
        None => TxKind::Create,
    }
}

fn encode_legacy(tx: &TxData) -> Vec<u8> {
    let to = to_kind(tx.to);
    let gas_price = tx.gas_price.unwrap_or_default();

    // `v` already carries both the chain id and y-parity (EIP-155) or is a
    // bare 27/28 for pre-155 transactions; it round-trips as stored.
    let payload_length = tx.nonce.length()
        + gas_price.length()
        + tx.gas.length()
        + to.length()
        + tx.value.length()
        + tx.input.length()
        + tx.v.length()
        + tx.r.length()
        + tx.s.length();

    let mut out = Vec::new();
    Header { list: true, payload_length }.encode(&mut out);
    tx.nonce.encode(&mut out);
    gas_price.encode(&mut out);
    tx.gas.encode(&mut out);
    to.encode(&mut out);
    tx.value.encode(&mut out);
    tx.input.encode(&mut out);
    tx.v.encode(&mut out);
    tx.r.encode(&mut out);
    tx.s.encode(&mut out);
    out
}

fn encode_eip2930(tx: &TxData) -> Vec<u8> {
    let to = to_kind(tx.to);
    let chain_id = tx.chain_id.unwrap_or_default();
    let gas_price = tx.gas_price.unwrap_or_default();
    let access_list = tx.access_list.clone().unwrap_or_else(AccessList::default);

    let payload_length = chain_id.length()
        + tx.nonce.length()
        + gas_price.length()
        + tx.gas.length()
        + to.length()
        + tx.value.length()
        + access_list.length()
        + tx.input.length()
        + tx.v.length()
        + tx.r.length()
        + tx.s.length();

    let mut out = Vec::new();
    out.push(0x01);
    Header { list: true, payload_length }.encode(&mut out);
    chain_id.encode(&mut out);
    tx.nonce.encode(&mut out);
    gas_price.encode(&mut out);
    tx.gas.encode(&mut out);
    to.encode(&mut out);
    tx.value.encode(&mut out);
    access_list.encode(&mut out);
    tx.input.encode(&mut out);
    tx.v.encode(&mut out);
    tx.r.encode(&mut out);
    tx.s.encode(&mut out);
    out
}

fn encode_eip1559(tx: &TxData) -> Vec<u8> {
    let to = to_kind(tx.to);
    let chain_id = tx.chain_id.unwrap_or_default();
    let max_priority_fee_per_gas = tx.max_priority_fee_per_gas.unwrap_or_default();
    let max_fee_per_gas = tx.max_fee_per_gas.unwrap_or_default();
    let access_list = tx.access_list.clone().unwrap_or_else(AccessList::default);

    let payload_length = chain_id.length()
        + tx.nonce.length()
        + max_priority_fee_per_gas.length()
        + max_fee_per_gas.length()
        + tx.gas.length()
        + to.length()
        + tx.value.length()
        + access_list.length()
        + tx.input.length()
        + tx.v.length()
        + tx.r.length()
        + tx.s.length();

    let mut out = Vec::new();
    out.push(0x02);
    Header { list: true, payload_length }.encode(&mut out);
    chain_id.encode(&mut out);
    tx.nonce.encode(&mut out);
    max_priority_fee_per_gas.encode(&mut out);
    max_fee_per_gas.encode(&mut out);
    tx.gas.encode(&mut out);
    to.encode(&mut out);
    tx.value.encode(&mut out);
    access_list.encode(&mut out);
    tx.input.encode(&mut out);
    tx.v.encode(&mut out);
    tx.r.encode(&mut out);
    tx.s.encode(&mut out);
    out
}
