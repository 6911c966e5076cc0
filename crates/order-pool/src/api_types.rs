use alloy_primitives::B256;
use auction_types::TxData;

/// Response shape for [`crate::RequestApi::get_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderStatus {
    pub access: bool,
    pub pending_payment: u128,
}

/// One entry of [`crate::RequestApi::get_txpool`]'s response; the signature
/// fields of `data` are already redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledTx {
    pub data: TxData,
    pub reserve: u128,
}

/// One settled transaction the caller won, returned by `get_results`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub tx_hash: B256,
    pub payment: u128,
    pub data: TxData,
}

/// Response shape for [`crate::RequestApi::get_results`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsPage {
    pub transactions: Vec<ResultEntry>,
    pub total_payment: u128,
}
