use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use auction_types::{now_seconds, slot_at, SETTLEMENT_DELAY_SECONDS};
use tokio::task::JoinHandle;

use crate::state::PoolState;

/// How often the settlement loop polls the slot clock. Small relative to a
/// 12-second slot so a new slot boundary is noticed promptly without
/// busy-spinning (spec.md §9: replace the source's tight sleep-and-recheck
/// poll with a proper timer).
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// C5: spawns the settlement loop as a background task. `stop` is checked
/// once per poll tick; setting it causes the loop to exit at the next tick
/// boundary rather than mid-settlement.
pub fn spawn(pool: Arc<PoolState>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_slot: Option<u64> = None;
        let mut ticker = tokio::time::interval(POLL_INTERVAL);

        loop {
            ticker.tick().await;
            if stop.load(Ordering::Relaxed) {
                tracing::info!("settlement loop: stop requested, exiting");
                return;
            }

            let slot = slot_at(now_seconds());
            if last_slot.is_some_and(|l| slot <= l) {
                continue;
            }
            last_slot = Some(slot);

            tokio::time::sleep(Duration::from_secs(SETTLEMENT_DELAY_SECONDS)).await;

            let started = now_seconds();
            pool.settle_slot(slot, started);
            tracing::debug!(slot, "settlement loop: settled slot");
        }
    })
}
