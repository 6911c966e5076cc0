use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use auction_types::{now_seconds, MAX_SLOTS_IN_TX_POOL};
use tokio::task::JoinHandle;

use crate::state::PoolState;

/// How often the cleanup loop polls the chain's block number.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// C6: spawns the cleanup loop. Each new block triggers `process_executed`
/// then `process_expired`, in that order, so an executed-and-expired
/// transaction is never also rebroadcast (spec.md §4.6).
pub fn spawn(pool: Arc<PoolState>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_block: Option<u64> = None;
        let mut ticker = tokio::time::interval(POLL_INTERVAL);

        loop {
            ticker.tick().await;
            if stop.load(Ordering::Relaxed) {
                tracing::info!("cleanup loop: stop requested, exiting");
                return;
            }

            let block = match pool.chain.block_number().await {
                Ok(block) => block,
                Err(error) => {
                    tracing::warn!(%error, "cleanup loop: block_number failed");
                    continue;
                }
            };
            if last_block == Some(block) {
                continue;
            }
            last_block = Some(block);

            pool.process_executed().await;
            pool.process_expired(now_seconds(), MAX_SLOTS_IN_TX_POOL).await;
            tracing::debug!(block, "cleanup loop: processed block");
        }
    })
}
