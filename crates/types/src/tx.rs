use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Decoded fields of a signed transaction, legacy or typed.
///
/// This is the in-memory shape C1 (`tx-codec`) decodes into and encodes
/// back out of. A single struct (rather than an enum per tx type) mirrors
/// the reference implementation's plain field dict: fee-field presence is
/// what distinguishes legacy from EIP-1559 on re-encode (§4.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxData {
    pub nonce: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    /// Set for legacy / EIP-2930 transactions.
    pub gas_price: Option<u128>,
    /// Set together with `max_priority_fee_per_gas` for EIP-1559 transactions.
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub input: Bytes,
    pub chain_id: Option<u64>,
    pub access_list: Option<AccessList>,
    pub v: u64,
    pub r: U256,
    pub s: U256,
    /// Recovered sender, attached by C1 after signature recovery.
    pub from: Address,
    pub hash: B256,
}

impl TxData {
    /// Whether this decodes to an EIP-1559 dynamic-fee transaction, per the
    /// fee-field presence rule in spec.md §4.1.
    pub fn is_eip1559(&self) -> bool {
        self.max_fee_per_gas.is_some() && self.max_priority_fee_per_gas.is_some()
    }

    /// `txPool` (C4 `get_txpool`) redacts the signature so a builder cannot
    /// rebroadcast a private transaction body it was only shown for bidding.
    pub fn redact_signature(&self) -> Self {
        Self { v: 0, r: U256::ZERO, s: U256::ZERO, ..self.clone() }
    }
}
