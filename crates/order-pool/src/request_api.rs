use alloy_primitives::{Bytes, B256};
use async_trait::async_trait;
use auction_core::Auction;
use auction_types::{
    now_seconds, slot_at, AuctionError, AuctionResult, Bid, Builder, Pubkey, Transaction,
    TxData, MIN_TIME_IN_TX_POOL_SECONDS,
};

use crate::api_types::{BuilderStatus, PooledTx, ResultEntry, ResultsPage};
use crate::state::PoolState;

/// The six synchronous operations of spec.md §4.4, as a plain trait
/// independent of any wire format. C8 (the HTTP surface) is a thin adapter
/// onto this trait, mirroring the teacher's split between its order-pool
/// handle and its RPC-facing server trait.
#[async_trait]
pub trait RequestApi {
    async fn register(&self, pubkey: Pubkey) -> AuctionResult<()>;
    async fn get_status(&self, pubkey: &Pubkey) -> AuctionResult<BuilderStatus>;
    async fn submit_tx(&self, raw_tx: Bytes) -> AuctionResult<B256>;
    async fn get_txpool(&self, pubkey: &Pubkey) -> AuctionResult<Vec<PooledTx>>;
    async fn submit_bid(&self, pubkey: Pubkey, tx_hash: B256, value: u128) -> AuctionResult<u64>;
    async fn get_results(&self, pubkey: &Pubkey, slot: u64) -> AuctionResult<ResultsPage>;
}

/// `reserve = priority_fee_basis * estimated_gas`, per the §9 open-question
/// resolution: EIP-1559 uses `maxPriorityFeePerGas`, legacy/EIP-2930 uses
/// `gasPrice` as the direct analogue.
fn compute_reserve(data: &TxData, estimated_gas: u64) -> u128 {
    let basis = data.max_priority_fee_per_gas.or(data.gas_price).unwrap_or_default();
    basis.saturating_mul(estimated_gas as u128)
}

#[async_trait]
impl RequestApi for PoolState {
    async fn register(&self, pubkey: Pubkey) -> AuctionResult<()> {
        let mut builders = self.builders.lock();
        if builders.contains_key(&pubkey) {
            return Err(AuctionError::AlreadyRegistered(pubkey));
        }
        builders.insert(pubkey.clone(), Builder::new(pubkey));
        Ok(())
    }

    async fn get_status(&self, pubkey: &Pubkey) -> AuctionResult<BuilderStatus> {
        let builders = self.builders.lock();
        let builder = builders.get(pubkey).ok_or_else(|| AuctionError::NotRegistered(pubkey.clone()))?;
        Ok(BuilderStatus { access: builder.access, pending_payment: builder.pending_payment })
    }

    async fn submit_tx(&self, raw_tx: Bytes) -> AuctionResult<B256> {
        let submitted = now_seconds();
        let data = tx_codec::decode(&raw_tx)?;

        if self.txpool.lock().contains_key(&data.hash) {
            return Err(AuctionError::Duplicate(data.hash));
        }

        let estimated_gas = self
            .chain
            .estimate_gas(&data)
            .await
            .map_err(|_| AuctionError::InvalidTx("chain client rejected gas estimation".into()))?;
        let reserve = compute_reserve(&data, estimated_gas);
        let hash = data.hash;

        let mut txpool = self.txpool.lock();
        if txpool.contains_key(&hash) {
            return Err(AuctionError::Duplicate(hash));
        }
        txpool.insert(hash, Transaction::new(hash, data, reserve, submitted));
        Ok(hash)
    }

    async fn get_txpool(&self, pubkey: &Pubkey) -> AuctionResult<Vec<PooledTx>> {
        self.require_access(pubkey)?;
        let txpool = self.txpool.lock();
        Ok(txpool
            .values()
            .filter(|tx| !tx.sold)
            .map(|tx| PooledTx { data: tx.data.redact_signature(), reserve: tx.reserve })
            .collect())
    }

    async fn submit_bid(&self, pubkey: Pubkey, tx_hash: B256, value: u128) -> AuctionResult<u64> {
        let submitted = now_seconds();
        self.require_access(&pubkey)?;

        let (tx_submitted, reserve, sold) = {
            let txpool = self.txpool.lock();
            let tx = txpool.get(&tx_hash).ok_or(AuctionError::NotFound(tx_hash))?;
            (tx.submitted, tx.reserve, tx.sold)
        };
        if sold {
            return Err(AuctionError::SoldAlready(tx_hash));
        }
        if value < reserve {
            return Err(AuctionError::BelowReserve { value, reserve });
        }

        let bid = Bid { builder_pubkey: pubkey, tx_hash, value, submitted };
        {
            let mut auctions = self.auctions.lock();
            match auctions.get_mut(&tx_hash) {
                Some(auction) => auction.submit(bid)?,
                None => {
                    auctions.insert(tx_hash, Auction::new(tx_hash, reserve, bid)?);
                }
            }
        }

        let current_slot = slot_at(submitted);
        let too_young = submitted - tx_submitted < MIN_TIME_IN_TX_POOL_SECONDS;
        let results_exist = self.results.read().contains_key(&current_slot);
        Ok(if too_young || results_exist { current_slot + 1 } else { current_slot })
    }

    async fn get_results(&self, pubkey: &Pubkey, slot: u64) -> AuctionResult<ResultsPage> {
        self.require_access(pubkey)?;
        let results = self.results.read();
        let Some(entries) = results.get(&slot) else {
            return Ok(ResultsPage::default());
        };

        let mut total_payment = 0u128;
        let transactions = entries
            .iter()
            .filter(|(outcome, _)| &outcome.winner_pubkey == pubkey)
            .map(|(outcome, data)| {
                total_payment += outcome.payment;
                ResultEntry { tx_hash: outcome.tx_hash, payment: outcome.payment, data: data.clone() }
            })
            .collect();
        Ok(ResultsPage { transactions, total_payment })
    }
}

#[cfg(test)]
mod reserve_proptests {
    use alloy_primitives::{Bytes, B256};
    use auction_types::TxData;
    use proptest::prelude::*;

    use super::compute_reserve;

    fn data_with(gas_price: Option<u128>, max_priority: Option<u128>) -> TxData {
        TxData {
            nonce: 0,
            to: None,
            value: alloy_primitives::U256::ZERO,
            gas: 0,
            gas_price,
            max_fee_per_gas: max_priority.map(|_| 0),
            max_priority_fee_per_gas: max_priority,
            input: Bytes::new(),
            chain_id: None,
            access_list: None,
            v: 0,
            r: alloy_primitives::U256::ZERO,
            s: alloy_primitives::U256::ZERO,
            from: alloy_primitives::Address::ZERO,
            hash: B256::ZERO,
        }
    }

    proptest! {
        /// §9 open-question resolution: for an EIP-1559 transaction the
        /// reserve basis is `maxPriorityFeePerGas`, never `gasPrice`, even
        /// when both happen to be present.
        #[test]
        fn eip1559_basis_wins_over_gas_price(priority in 0u128..1_000_000, gas_price in 0u128..1_000_000, gas in 1u64..1_000_000) {
            let data = data_with(Some(gas_price), Some(priority));
            let reserve = compute_reserve(&data, gas);
            prop_assert_eq!(reserve, priority.saturating_mul(gas as u128));
        }

        /// Legacy/EIP-2930 (no priority fee) falls back to `gasPrice`.
        #[test]
        fn legacy_basis_is_gas_price(gas_price in 0u128..1_000_000, gas in 1u64..1_000_000) {
            let data = data_with(Some(gas_price), None);
            let reserve = compute_reserve(&data, gas);
            prop_assert_eq!(reserve, gas_price.saturating_mul(gas as u128));
        }

        /// Reserve never overflows/panics regardless of magnitude; it
        /// saturates instead.
        #[test]
        fn reserve_never_panics_on_overflow(priority in any::<u128>(), gas in any::<u64>()) {
            let data = data_with(None, Some(priority));
            let _ = compute_reserve(&data, gas);
        }
    }
}
