//! Pool state (C3), the synchronous request API (C4), and the two
//! background loops that drive settlement (C5) and cleanup (C6).
//!
//! [`PoolState`] owns the three `parking_lot` mutexes spec.md §4.3 requires
//! (`builders`, `txpool`, `auctions`) plus the lock-free `results` table.
//! [`RequestApi`] is the synchronous operation surface; [`settlement::spawn`]
//! and [`cleanup::spawn`] start the two long-running tasks against a shared
//! `Arc<PoolState>`.

mod api_types;
pub mod cleanup;
mod request_api;
pub mod settlement;
mod state;

pub use api_types::{BuilderStatus, PooledTx, ResultEntry, ResultsPage};
pub use request_api::RequestApi;
pub use state::PoolState;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
    use std::sync::Arc;

    use alloy_primitives::{Address, Bytes, B256, U256};
    use async_trait::async_trait;
    use auction_chain::{ChainClient, TxReceipt};
    use auction_types::{AuctionError, ChainClientError, Pubkey, TxData};
    use parking_lot::Mutex;

    use super::*;

    /// In-memory chain double grounded on the teacher's
    /// `MockOrderPoolHandle`/`MockValidator` pattern: canned responses plus
    /// just enough state to drive the end-to-end scenarios in spec.md §8.
    #[derive(Default)]
    struct MockChainClient {
        block: AtomicU64,
        gas_estimate: u64,
        receipts: Mutex<std::collections::HashSet<B256>>,
        sent: Mutex<Vec<Bytes>>,
    }

    impl MockChainClient {
        fn new(gas_estimate: u64) -> Self {
            Self { block: AtomicU64::new(0), gas_estimate, receipts: Mutex::new(Default::default()), sent: Mutex::new(Vec::new()) }
        }

        fn mark_executed(&self, hash: B256) {
            self.receipts.lock().insert(hash);
        }
    }

    #[async_trait]
    impl ChainClient for MockChainClient {
        async fn estimate_gas(&self, _tx: &TxData) -> Result<u64, ChainClientError> {
            Ok(self.gas_estimate)
        }

        async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<TxReceipt>, ChainClientError> {
            if self.receipts.lock().contains(&hash) {
                Ok(Some(TxReceipt::default()))
            } else {
                Ok(None)
            }
        }

        async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, ChainClientError> {
            self.sent.lock().push(raw.clone());
            Ok(alloy_primitives::keccak256(&raw))
        }

        async fn block_number(&self) -> Result<u64, ChainClientError> {
            Ok(self.block.load(AtomicOrdering::Relaxed))
        }
    }

    fn pubkey(byte: u8) -> Pubkey {
        Pubkey(Bytes::from(vec![byte; 20]))
    }

    fn sample_tx(hash_seed: u8, gas_price: u128) -> TxData {
        TxData {
            nonce: 0,
            to: Some(Address::with_last_byte(1)),
            value: U256::ZERO,
            gas: 21_000,
            gas_price: Some(gas_price),
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            input: Bytes::new(),
            chain_id: Some(1),
            access_list: None,
            v: 27,
            r: U256::from(1u64),
            s: U256::from(1u64),
            from: Address::with_last_byte(2),
            hash: B256::with_last_byte(hash_seed),
        }
    }

    fn new_pool(gas_estimate: u64) -> Arc<PoolState> {
        Arc::new(PoolState::new(Arc::new(MockChainClient::new(gas_estimate))))
    }

    fn new_pool_with_mock(gas_estimate: u64) -> (Arc<PoolState>, Arc<MockChainClient>) {
        let mock = Arc::new(MockChainClient::new(gas_estimate));
        (Arc::new(PoolState::new(mock.clone())), mock)
    }

    #[tokio::test]
    async fn register_then_duplicate_register_fails() {
        let pool = new_pool(21_000);
        let pk = pubkey(0xAA);
        pool.register(pk.clone()).await.unwrap();
        let err = pool.register(pk).await.unwrap_err();
        assert!(matches!(err, AuctionError::AlreadyRegistered(_)));
    }

    #[tokio::test]
    async fn get_status_requires_registration() {
        let pool = new_pool(21_000);
        let err = pool.get_status(&pubkey(0xAA)).await.unwrap_err();
        assert!(matches!(err, AuctionError::NotRegistered(_)));
    }

    #[tokio::test]
    async fn txpool_redacts_signature_and_hides_sold() {
        let pool = new_pool(21_000);
        let pk = pubkey(0xAA);
        pool.register(pk.clone()).await.unwrap();

        // Directly seed the pool to avoid depending on RLP fixtures here;
        // submit_tx's decode path is exercised in tx-codec's own tests.
        let data = sample_tx(1, 20_000_000_000);
        let tx = auction_types::Transaction::new(data.hash, data.clone(), 420_000_000_000_000, auction_types::now_seconds());
        pool.txpool.lock().insert(tx.hash, tx);

        let pooled = pool.get_txpool(&pk).await.unwrap();
        assert_eq!(pooled.len(), 1);
        assert_eq!(pooled[0].data.v, 0);
        assert_eq!(pooled[0].data.r, U256::ZERO);
    }

    #[tokio::test]
    async fn bid_below_reserve_is_rejected() {
        let pool = new_pool(21_000);
        let pk = pubkey(0xAA);
        pool.register(pk.clone()).await.unwrap();

        let data = sample_tx(2, 20_000_000_000);
        let reserve = 420_000_000_000_000u128;
        let tx = auction_types::Transaction::new(data.hash, data.clone(), reserve, auction_types::now_seconds());
        pool.txpool.lock().insert(tx.hash, tx);

        let err = pool.submit_bid(pk, data.hash, reserve - 1).await.unwrap_err();
        assert!(matches!(err, AuctionError::BelowReserve { .. }));
    }

    #[tokio::test]
    async fn bid_on_unknown_tx_is_not_found() {
        let pool = new_pool(21_000);
        let pk = pubkey(0xAA);
        pool.register(pk.clone()).await.unwrap();
        let err = pool.submit_bid(pk, B256::with_last_byte(0x99), 100).await.unwrap_err();
        assert!(matches!(err, AuctionError::NotFound(_)));
    }

    #[tokio::test]
    async fn access_restricted_blocks_txpool_and_bid_but_not_status() {
        let pool = new_pool(21_000);
        let pk = pubkey(0xAA);
        pool.register(pk.clone()).await.unwrap();
        pool.builders.lock().get_mut(&pk).unwrap().access = false;

        assert!(matches!(pool.get_txpool(&pk).await.unwrap_err(), AuctionError::AccessRestricted(_)));
        assert!(matches!(
            pool.submit_bid(pk.clone(), B256::ZERO, 1).await.unwrap_err(),
            AuctionError::AccessRestricted(_)
        ));
        assert!(pool.get_status(&pk).await.is_ok());
    }

    #[tokio::test]
    async fn settlement_pays_second_price_and_records_result() {
        let pool = new_pool(21_000);
        let aa = pubkey(0xAA);
        let bb = pubkey(0xBB);
        pool.register(aa.clone()).await.unwrap();
        pool.register(bb.clone()).await.unwrap();

        let data = sample_tx(3, 20_000_000_000);
        let reserve = 100u128;
        let submitted = auction_types::now_seconds() - 10.0;
        let tx = auction_types::Transaction::new(data.hash, data.clone(), reserve, submitted);
        pool.txpool.lock().insert(tx.hash, tx);

        pool.submit_bid(aa.clone(), data.hash, 150).await.unwrap();
        pool.submit_bid(bb.clone(), data.hash, 200).await.unwrap();

        let slot = auction_types::slot_at(auction_types::now_seconds());
        pool.settle_slot(slot, auction_types::now_seconds());

        let bb_results = pool.get_results(&bb, slot).await.unwrap();
        assert_eq!(bb_results.total_payment, 150);
        assert_eq!(bb_results.transactions[0].payment, 150);

        let aa_results = pool.get_results(&aa, slot).await.unwrap();
        assert!(aa_results.transactions.is_empty());
    }

    #[tokio::test]
    async fn too_young_bid_is_postponed_past_dwell_floor() {
        let pool = new_pool(21_000);
        let aa = pubkey(0xAA);
        pool.register(aa.clone()).await.unwrap();

        let data = sample_tx(4, 20_000_000_000);
        let reserve = 100u128;
        let now = auction_types::now_seconds();
        let tx = auction_types::Transaction::new(data.hash, data.clone(), reserve, now);
        pool.txpool.lock().insert(tx.hash, tx);
        pool.submit_bid(aa.clone(), data.hash, 100).await.unwrap();

        let slot = auction_types::slot_at(now);
        pool.settle_slot(slot, now);

        // Too young: no result yet, and the auction survives for next pass.
        let results = pool.get_results(&aa, slot).await.unwrap();
        assert!(results.transactions.is_empty());
        assert!(pool.auctions.lock().contains_key(&data.hash));
    }

    #[tokio::test]
    async fn executed_transaction_is_removed_without_producing_a_result() {
        let (pool, mock) = new_pool_with_mock(21_000);
        let aa = pubkey(0xAA);
        pool.register(aa.clone()).await.unwrap();

        let data = sample_tx(5, 20_000_000_000);
        let tx = auction_types::Transaction::new(data.hash, data.clone(), 100, auction_types::now_seconds() - 10.0);
        pool.txpool.lock().insert(tx.hash, tx);
        pool.submit_bid(aa.clone(), data.hash, 150).await.unwrap();

        pool.process_executed().await;
        assert!(pool.txpool.lock().contains_key(&data.hash), "still pending, no receipt yet");

        mock.mark_executed(data.hash);
        pool.process_executed().await;

        assert!(!pool.txpool.lock().contains_key(&data.hash));
        assert!(!pool.auctions.lock().contains_key(&data.hash));

        let slot = auction_types::slot_at(auction_types::now_seconds());
        let results = pool.get_results(&aa, slot).await.unwrap();
        assert!(results.transactions.is_empty(), "an executed tx never produces a result");
    }

    #[tokio::test]
    async fn expired_transaction_is_rebroadcast_then_removed() {
        let (pool, mock) = new_pool_with_mock(21_000);
        let aa = pubkey(0xAA);
        pool.register(aa.clone()).await.unwrap();

        let signed_raw = build_signed_legacy_raw();
        let hash = alloy_primitives::keccak256(&signed_raw);
        let data = tx_codec::decode(&signed_raw).unwrap();
        let long_ago = auction_types::now_seconds() - (auction_types::MAX_SLOTS_IN_TX_POOL as f64 + 2.0) * 12.0;
        let tx = auction_types::Transaction::new(hash, data, 0, long_ago);
        pool.txpool.lock().insert(hash, tx);

        pool.process_expired(auction_types::now_seconds(), auction_types::MAX_SLOTS_IN_TX_POOL).await;

        assert!(!pool.txpool.lock().contains_key(&hash));
        assert_eq!(mock.sent.lock().len(), 1);
    }

    fn build_signed_legacy_raw() -> Bytes {
        use alloy_primitives::{keccak256, TxKind, U256};
        use alloy_rlp::{Encodable, Header};
        use secp256k1::{Message, SecretKey, SECP256K1};

        let key = SecretKey::from_slice(&[0x22; 32]).unwrap();
        let to = Address::with_last_byte(9);
        let value = U256::ZERO;
        let input = Bytes::new();
        let to_kind = TxKind::Call(to);

        let preimage_payload_length = 0u64.length()
            + 1_000_000_000u128.length()
            + 21_000u64.length()
            + to_kind.length()
            + value.length()
            + input.length();
        let mut preimage = Vec::new();
        Header { list: true, payload_length: preimage_payload_length }.encode(&mut preimage);
        0u64.encode(&mut preimage);
        1_000_000_000u128.encode(&mut preimage);
        21_000u64.encode(&mut preimage);
        to_kind.encode(&mut preimage);
        value.encode(&mut preimage);
        input.encode(&mut preimage);
        let signing_hash = keccak256(&preimage);

        let message = Message::from_digest_slice(&signing_hash.0).unwrap();
        let (recovery_id, sig) = SECP256K1.sign_ecdsa_recoverable(&message, &key).serialize_compact();
        let r = U256::from_be_slice(&sig[..32]);
        let s = U256::from_be_slice(&sig[32..]);
        let v = 27 + recovery_id.to_i32() as u64;

        let payload_length = preimage_payload_length + v.length() + r.length() + s.length();
        let mut out = Vec::new();
        Header { list: true, payload_length }.encode(&mut out);
        0u64.encode(&mut out);
        1_000_000_000u128.encode(&mut out);
        21_000u64.encode(&mut out);
        to_kind.encode(&mut out);
        value.encode(&mut out);
        input.encode(&mut out);
        v.encode(&mut out);
        r.encode(&mut out);
        s.encode(&mut out);
        Bytes::from(out)
    }
}
