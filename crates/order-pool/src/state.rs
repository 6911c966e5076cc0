use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::B256;
use auction_chain::ChainClient;
use auction_core::Auction;
use auction_types::{
    AuctionError, AuctionOutcome, AuctionResult, Builder, Pubkey, Transaction, TxData,
    MIN_TIME_IN_TX_POOL_SECONDS, RESULT_RETENTION_SLOTS,
};
use parking_lot::{Mutex, RwLock};

/// The shared state behind C4-C6: the three mutexes named in spec.md §4.3
/// (`builders`, `txpool`, `auctions`) plus the lock-free `results` table.
///
/// Lock acquisition order, whenever more than one is held at once, is
/// `auctions -> builders -> txpool` throughout this crate.
pub struct PoolState {
    pub(crate) builders: Mutex<HashMap<Pubkey, Builder>>,
    pub(crate) txpool: Mutex<HashMap<B256, Transaction>>,
    pub(crate) auctions: Mutex<HashMap<B256, Auction>>,
    pub(crate) results: RwLock<HashMap<u64, Vec<(AuctionOutcome, TxData)>>>,
    pub(crate) chain: Arc<dyn ChainClient>,
}

impl PoolState {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self {
            builders: Mutex::new(HashMap::new()),
            txpool: Mutex::new(HashMap::new()),
            auctions: Mutex::new(HashMap::new()),
            results: RwLock::new(HashMap::new()),
            chain,
        }
    }

    pub(crate) fn require_access(&self, pubkey: &Pubkey) -> AuctionResult<()> {
        let builders = self.builders.lock();
        let builder = builders.get(pubkey).ok_or_else(|| AuctionError::NotRegistered(pubkey.clone()))?;
        if !builder.access {
            return Err(AuctionError::AccessRestricted(pubkey.clone()));
        }
        Ok(())
    }

    /// One settlement pass for `slot` (C5 loop body, steps 4 onward). Takes
    /// all three locks in canonical order, settles every auction whose
    /// transaction has dwelled long enough, postpones the rest, and writes
    /// `results[slot]` exactly once.
    pub(crate) fn settle_slot(&self, slot: u64, started: f64) {
        let mut auctions = self.auctions.lock();
        let mut builders = self.builders.lock();
        let mut txpool = self.txpool.lock();

        let mut postponed = HashMap::with_capacity(auctions.len());
        let mut slot_results = Vec::new();

        for (hash, auction) in auctions.drain() {
            let Some(tx) = txpool.get_mut(&hash) else {
                // Removed by the cleanup loop between bid submission and
                // this pass; the auction simply lapses.
                continue;
            };

            if tx.submitted >= started - MIN_TIME_IN_TX_POOL_SECONDS {
                postponed.insert(hash, auction);
                continue;
            }

            let outcome = auction.settle();
            tx.sold = true;
            if let Some(builder) = builders.get_mut(&outcome.winner_pubkey) {
                builder.pending_payment += outcome.payment;
            }
            slot_results.push((outcome, tx.data.clone()));
        }

        *auctions = postponed;
        drop(auctions);
        drop(builders);
        drop(txpool);

        let mut results = self.results.write();
        results.insert(slot, slot_results);
        evict_old_results(&mut results, slot);
    }

    /// C6 phase one: drop every transaction whose receipt has appeared.
    pub(crate) async fn process_executed(&self) {
        let hashes: Vec<B256> = {
            let txpool = self.txpool.lock();
            txpool.keys().copied().collect()
        };

        let mut executed = Vec::new();
        for hash in hashes {
            match self.chain.get_transaction_receipt(hash).await {
                Ok(Some(_)) => executed.push(hash),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%hash, %error, "cleanup loop: get_transaction_receipt failed");
                }
            }
        }

        if executed.is_empty() {
            return;
        }
        let mut auctions = self.auctions.lock();
        let mut txpool = self.txpool.lock();
        for hash in executed {
            auctions.remove(&hash);
            txpool.remove(&hash);
        }
    }

    /// C6 phase two: anything still pending past the slot horizon is
    /// re-encoded and broadcast to the public mempool, then dropped
    /// regardless of whether the broadcast succeeded.
    pub(crate) async fn process_expired(&self, now: f64, max_slots_in_pool: u64) {
        let candidates: Vec<(B256, TxData)> = {
            let txpool = self.txpool.lock();
            txpool
                .values()
                .filter(|tx| {
                    let slots_dwelled = ((now - tx.submitted) / auction_types::SLOT_SECONDS as f64).floor();
                    slots_dwelled > max_slots_in_pool as f64
                })
                .map(|tx| (tx.hash, tx.data.clone()))
                .collect()
        };

        if candidates.is_empty() {
            return;
        }

        let mut expired = Vec::with_capacity(candidates.len());
        for (hash, data) in candidates {
            match tx_codec::encode(&data) {
                Ok(raw) => {
                    if let Err(error) = self.chain.send_raw_transaction(raw).await {
                        tracing::warn!(%hash, %error, "cleanup loop: send_raw_transaction failed");
                    }
                }
                Err(error) => {
                    tracing::warn!(%hash, %error, "cleanup loop: failed to re-encode expiring transaction");
                }
            }
            expired.push(hash);
        }

        let mut auctions = self.auctions.lock();
        let mut txpool = self.txpool.lock();
        for hash in expired {
            auctions.remove(&hash);
            txpool.remove(&hash);
        }
    }
}

fn evict_old_results(results: &mut HashMap<u64, Vec<(AuctionOutcome, TxData)>>, current_slot: u64) {
    let floor = current_slot.saturating_sub(RESULT_RETENTION_SLOTS);
    results.retain(|&slot, _| slot >= floor);
}
