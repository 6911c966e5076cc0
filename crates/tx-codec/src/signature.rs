use alloy_primitives::{keccak256, Address, B256, U256};
use auction_types::{AuctionError, AuctionResult};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, SECP256K1,
};

/// Recovers the sender address from a transaction's signing hash and its
/// `(v, r, s)` components.
///
/// Grounded on the teacher's own
/// `crates/types/src/on_chain/signature.rs::BundleSignature::recover_key`:
/// build a [`RecoverableSignature`] from the compact `r || s` bytes and a
/// recovery id, then recover the uncompressed public key and keccak it to
/// get the Ethereum address.
pub fn recover_sender(signing_hash: B256, y_parity: u8, r: U256, s: U256) -> AuctionResult<Address> {
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&r.to_be_bytes::<32>());
    compact[32..].copy_from_slice(&s.to_be_bytes::<32>());

    let recovery_id = RecoveryId::from_i32(y_parity as i32)
        .map_err(|e| AuctionError::InvalidTx(format!("bad recovery id: {e}")))?;
    let signature = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|e| AuctionError::InvalidTx(format!("bad signature: {e}")))?;
    let message = Message::from_digest_slice(signing_hash.as_slice())
        .map_err(|e| AuctionError::InvalidTx(format!("bad signing hash: {e}")))?;

    let public_key = SECP256K1
        .recover_ecdsa(&message, &signature)
        .map_err(|e| AuctionError::InvalidTx(format!("signature recovery failed: {e}")))?;

    let uncompressed = public_key.serialize_uncompressed();
    // Skip the leading 0x04 prefix byte; the address is the low 20 bytes of
    // keccak256 over the raw 64-byte public key point.
    let hash = keccak256(&uncompressed[1..]);
    Ok(Address::from_slice(&hash[12..]))
}

/// Splits a legacy / EIP-155 `v` value into its chain id (if replay
/// protected) and y-parity bit.
pub fn legacy_v_to_chain_id_and_parity(v: u64) -> (Option<u64>, u8) {
    if v >= 35 {
        let chain_id = (v - 35) / 2;
        let parity = ((v - 35) % 2) as u8;
        (Some(chain_id), parity)
    } else {
        // Pre-EIP-155: v is 27 or 28.
        (None, (v - 27) as u8)
    }
}

/// Reconstructs the legacy `v` value from a chain id and y-parity bit,
/// inverse of [`legacy_v_to_chain_id_and_parity`].
pub fn chain_id_and_parity_to_legacy_v(chain_id: Option<u64>, parity: u8) -> u64 {
    match chain_id {
        Some(id) => 35 + id * 2 + parity as u64,
        None => 27 + parity as u64,
    }
}
