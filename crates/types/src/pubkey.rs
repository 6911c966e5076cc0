use std::fmt;

use alloy_primitives::{hex, Bytes};
use serde::{Deserialize, Serialize};

/// A builder's identifying key. The wire format is an opaque `0x`-prefixed
/// byte string (spec.md never requires it to be a valid secp256k1 point),
/// so we carry it as bytes and compare by equality rather than parsing it
/// as a curve point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pubkey(pub Bytes);

impl Pubkey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for Pubkey {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_prefixed(&self.0))
    }
}
