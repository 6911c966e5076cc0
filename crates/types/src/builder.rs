use crate::Pubkey;

/// A registered block builder.
///
/// `access` is a placeholder for external relay-registration validation
/// (spec.md §9 / §4.4): it is always `true` at creation and only ever
/// inspected, never flipped, by this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    pub pubkey: Pubkey,
    pub access: bool,
    pub pending_payment: u128,
}

impl Builder {
    pub fn new(pubkey: Pubkey) -> Self {
        Self { pubkey, access: true, pending_payment: 0 }
    }
}
