//! Request/response bodies for the six routes of spec.md §6. Field names
//! follow the wire's camelCase; byte strings ride on `alloy-primitives`'s own
//! `0x`-hex serde impls, wei and slot numbers go through [`crate::wire`]'s
//! decimal-string helpers.

use alloy_primitives::{Bytes, B256};
use auction_types::{Pubkey, TxData};
use serde::{Deserialize, Serialize};

use crate::wire;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub pub_key: Pubkey,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub pub_key: Pubkey,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub access: bool,
    #[serde(with = "wire::u128_str")]
    pub pending_payment: u128,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTxRequest {
    pub raw_tx: Bytes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPoolRequest {
    pub pub_key: Pubkey,
}

#[derive(Debug, Serialize)]
pub struct PooledTxWire {
    pub data: TxData,
    #[serde(with = "wire::u128_str")]
    pub reserve: u128,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBidRequest {
    pub pub_key: Pubkey,
    pub tx_hash: B256,
    #[serde(with = "wire::u128_str")]
    pub value: u128,
}

#[derive(Debug, Serialize)]
pub struct SubmitBidResponse {
    #[serde(with = "wire::u64_str")]
    pub slot: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRequest {
    pub pub_key: Pubkey,
    #[serde(with = "wire::u64_str")]
    pub slot: u64,
}

#[derive(Debug, Serialize)]
pub struct ResultTxWire {
    #[serde(with = "wire::u128_str")]
    pub payment: u128,
    pub data: TxData,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub transactions: Vec<ResultTxWire>,
    #[serde(with = "wire::u128_str")]
    pub total_payment: u128,
}
