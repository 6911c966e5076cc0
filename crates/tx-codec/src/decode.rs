use alloy_eips::eip2930::AccessList;
use alloy_primitives::{keccak256, Bytes, TxKind, B256, U256};
use alloy_rlp::{Decodable, Encodable, Header};
use auction_types::{AuctionError, AuctionResult, TxData};

use crate::{
    rlp_fields::{decode_legacy_fields, rlp_err},
    signature::{legacy_v_to_chain_id_and_parity, recover_sender},
};

/// Classifies and decodes a raw signed transaction (spec.md §4.1).
///
/// `hash` is the keccak of the raw bytes as given: the caller is handing
/// us the exact bytes that will later be re-broadcast, so this is also the
/// canonical hash the pool indexes by.
pub fn decode(raw: &[u8]) -> AuctionResult<TxData> {
    if raw.is_empty() {
        return Err(AuctionError::InvalidTx("empty transaction".into()));
    }
    let hash = keccak256(raw);

    if raw[0] > 0x7f {
        decode_legacy(raw, hash)
    } else {
        let ty = raw[0];
        let body = &raw[1..];
        match ty {
            0x01 => decode_eip2930(body, hash),
            0x02 => decode_eip1559(body, hash),
            other => Err(AuctionError::UnknownTxType(other)),
        }
    }
}

fn decode_legacy(raw: &[u8], hash: B256) -> AuctionResult<TxData> {
    let mut buf = raw;
    let fields = decode_legacy_fields(&mut buf)?;
    let (chain_id, parity) = legacy_v_to_chain_id_and_parity(fields.v);

    let signing_hash = legacy_signing_hash(
        fields.nonce,
        fields.gas_price,
        fields.gas_limit,
        fields.to,
        fields.value,
        &fields.input,
        chain_id,
    );
    let from = recover_sender(signing_hash, parity, fields.r, fields.s)?;

    Ok(TxData {
        nonce: fields.nonce,
        to: fields.to.to().copied(),
        value: fields.value,
        gas: fields.gas_limit,
        gas_price: Some(fields.gas_price),
        max_fee_per_gas: None,
        max_priority_fee_per_gas: None,
        input: fields.input,
        chain_id,
        access_list: None,
        v: fields.v,
        r: fields.r,
        s: fields.s,
        from,
        hash,
    })
}

fn legacy_signing_hash(
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: TxKind,
    value: U256,
    input: &Bytes,
    chain_id: Option<u64>,
) -> B256 {
    let mut payload_length = nonce.length()
        + gas_price.length()
        + gas_limit.length()
        + to.length()
        + value.length()
        + input.length();
    if let Some(id) = chain_id {
        payload_length += id.length() + 0u8.length() + 0u8.length();
    }

    let mut out = Vec::with_capacity(payload_length + 8);
    Header { list: true, payload_length }.encode(&mut out);
    nonce.encode(&mut out);
    gas_price.encode(&mut out);
    gas_limit.encode(&mut out);
    to.encode(&mut out);
    value.encode(&mut out);
    input.encode(&mut out);
    if let Some(id) = chain_id {
        id.encode(&mut out);
        0u8.encode(&mut out);
        0u8.encode(&mut out);
    }
    keccak256(out)
}

fn decode_eip2930(body: &[u8], hash: B256) -> AuctionResult<TxData> {
    let mut buf = body;
    let header = Header::decode(&mut buf).map_err(rlp_err)?;
    if !header.list {
        return Err(AuctionError::InvalidTx("expected an rlp list".into()));
    }
    let chain_id: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let nonce: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let gas_price: u128 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let gas_limit: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let to: TxKind = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let value: U256 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let access_list: AccessList = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let input: Bytes = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let v: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let r: U256 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let s: U256 = Decodable::decode(&mut buf).map_err(rlp_err)?;

    let signing_hash = typed_signing_hash(
        0x01,
        chain_id,
        nonce,
        &[gas_price],
        gas_limit,
        to,
        value,
        &access_list,
        &input,
    );
    let from = recover_sender(signing_hash, v as u8, r, s)?;

    Ok(TxData {
        nonce,
        to: to.to().copied(),
        value,
        gas: gas_limit,
        gas_price: Some(gas_price),
        max_fee_per_gas: None,
        max_priority_fee_per_gas: None,
        input,
        chain_id: Some(chain_id),
        access_list: Some(access_list),
        v,
        r,
        s,
        from,
        hash,
    })
}

fn decode_eip1559(body: &[u8], hash: B256) -> AuctionResult<TxData> {
    let mut buf = body;
    let header = Header::decode(&mut buf).map_err(rlp_err)?;
    if !header.list {
        return Err(AuctionError::InvalidTx("expected an rlp list".into()));
    }
    let chain_id: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let nonce: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let max_priority_fee_per_gas: u128 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let max_fee_per_gas: u128 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let gas_limit: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let to: TxKind = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let value: U256 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let access_list: AccessList = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let input: Bytes = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let v: u64 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let r: U256 = Decodable::decode(&mut buf).map_err(rlp_err)?;
    let s: U256 = Decodable::decode(&mut buf).map_err(rlp_err)?;

    let signing_hash = typed_signing_hash(
        0x02,
        chain_id,
        nonce,
        &[max_priority_fee_per_gas, max_fee_per_gas],
        gas_limit,
        to,
        value,
        &access_list,
        &input,
    );
    let from = recover_sender(signing_hash, v as u8, r, s)?;

    Ok(TxData {
        nonce,
        to: to.to().copied(),
        value,
        gas: gas_limit,
        gas_price: None,
        max_fee_per_gas: Some(max_fee_per_gas),
        max_priority_fee_per_gas: Some(max_priority_fee_per_gas),
        input,
        chain_id: Some(chain_id),
        access_list: Some(access_list),
        v,
        r,
        s,
        from,
        hash,
    })
}

/// Signing hash for a typed (EIP-2718) transaction: `keccak256(type_byte ||
/// rlp_list(chain_id, nonce, fee_fields.., gas_limit, to, value, access_list, input))`.
#[allow(clippy::too_many_arguments)]
fn typed_signing_hash(
    ty: u8,
    chain_id: u64,
    nonce: u64,
    fee_fields: &[u128],
    gas_limit: u64,
    to: TxKind,
    value: U256,
    access_list: &AccessList,
    input: &Bytes,
) -> B256 {
    let mut payload_length = chain_id.length()
        + nonce.length()
        + gas_limit.length()
        + to.length()
        + value.length()
        + access_list.length()
        + input.length();
    for fee in fee_fields {
        payload_length += fee.length();
    }

    let mut out = Vec::with_capacity(payload_length + 16);
    out.push(ty);
    Header { list: true, payload_length }.encode(&mut out);
    chain_id.encode(&mut out);
    nonce.encode(&mut out);
    for fee in fee_fields {
        fee.encode(&mut out);
    }
    gas_limit.encode(&mut out);
    to.encode(&mut out);
    value.encode(&mut out);
    access_list.encode(&mut out);
    input.encode(&mut out);
    keccak256(out)
}
