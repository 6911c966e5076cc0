//! The per-transaction sealed-bid second-price (Vickrey) auction, with a
//! reserve price equal to the transaction's own priority-fee budget.
//!
//! Grounded on `original_source/auction/auction.py`: one `Auction` per
//! transaction hash, created on the first valid bid, append-only until
//! `settle()` is called.

use alloy_primitives::B256;
use auction_types::{AuctionError, AuctionOutcome, AuctionResult, Bid};

/// Sealed-bid auction for a single transaction.
///
/// `reserve` is captured at construction time rather than re-read from a
/// shared `Transaction` record: the reserve is fixed at admission (spec.md
/// §3) and the auction and the pool's transaction map are independent
/// containers (spec.md §4.3), so the auction only needs the price floor it
/// validates bids against, not the transaction record itself.
#[derive(Debug, Clone)]
pub struct Auction {
    tx_hash: B256,
    reserve: u128,
    bids: Vec<Bid>,
}

impl Auction {
    /// Creates a new auction seeded with `bid`. Fails the same way
    /// `submit` would if `bid` does not belong to `tx_hash` or undercuts
    /// `reserve`.
    pub fn new(tx_hash: B256, reserve: u128, bid: Bid) -> AuctionResult<Self> {
        let mut auction = Self { tx_hash, reserve, bids: Vec::new() };
        auction.submit(bid)?;
        Ok(auction)
    }

    pub fn tx_hash(&self) -> B256 {
        self.tx_hash
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    /// Appends `bid` after validating it targets this auction's transaction
    /// and clears the reserve. Repeated bids from the same builder are
    /// allowed and all count at settlement (spec.md §9, open question
    /// resolved: source allows it).
    pub fn submit(&mut self, bid: Bid) -> AuctionResult<()> {
        if bid.tx_hash != self.tx_hash {
            return Err(AuctionError::BidMismatch { bid_hash: bid.tx_hash, auction_hash: self.tx_hash });
        }
        if bid.value < self.reserve {
            return Err(AuctionError::BelowReserve { value: bid.value, reserve: self.reserve });
        }
        self.bids.push(bid);
        Ok(())
    }

    /// Computes the settlement outcome.
    ///
    /// One bid: that bidder wins, paying the reserve. Two or more: the
    /// highest bid wins, paying the second-highest value (Vickrey); ties on
    /// value are broken by earliest `submitted` timestamp. The reserve does
    /// not participate in pricing once there are 2+ bids.
    ///
    /// Panics if called with no bids. An `Auction` can't exist without at
    /// least one (it is constructed from a seed bid and otherwise only
    /// grown), so an empty auction reaching `settle` is an invariant
    /// violation in the caller, not a recoverable error.
    pub fn settle(&self) -> AuctionOutcome {
        match self.bids.as_slice() {
            [] => panic!("settle() called on an auction with no bids"),
            [only] => AuctionOutcome {
                winner_pubkey: only.builder_pubkey.clone(),
                tx_hash: self.tx_hash,
                payment: self.reserve,
            },
            bids => {
                let mut ranked: Vec<&Bid> = bids.iter().collect();
                ranked.sort_by(|a, b| {
                    b.value.cmp(&a.value).then_with(|| {
                        a.submitted
                            .partial_cmp(&b.submitted)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                });
                let winner = ranked[0];
                let second = ranked[1];
                AuctionOutcome {
                    winner_pubkey: winner.builder_pubkey.clone(),
                    tx_hash: self.tx_hash,
                    payment: second.value,
                }
            }
        }
    }
}
