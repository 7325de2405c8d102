//! Off-chain withdrawal signing.
//!
//! Pure computation: no shared state, no I/O, and the private key is never
//! persisted or logged here. Each co-signer runs this independently over the
//! canonical digest; signing parallelises freely across signers and vaults.
//!
//! Notes:
//! - Signing is deterministic ECDSA (RFC 6979 nonces, as `k256` implements),
//!   so a repeated ephemeral nonce can never leak the key.
//! - `v` is emitted in the Ethereum 27/28 convention; the verifier also
//!   accepts the raw 0/1 form.

use alloy_primitives::{keccak256, Address, B256};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use vault_multisig_types::{AggregateProof, Signature, WithdrawalIntent};

use crate::digest::withdrawal_digest;
use crate::errors::SigningError;

/// Parse a signing key from a hex string (`0x`-prefixed or bare).
///
/// The key must decode to exactly 32 bytes; `SigningKey::from_slice`
/// left-zero-pads shorter slices, so the width is checked here.
pub fn signing_key_from_hex(raw: &str) -> Result<SigningKey, SigningError> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(stripped).map_err(|_| SigningError::MalformedKey)?;
    if bytes.len() != 32 {
        return Err(SigningError::MalformedKey);
    }
    SigningKey::from_slice(&bytes).map_err(|_| SigningError::MalformedKey)
}

/// Parse a 32-byte digest from a hex string (`0x`-prefixed or bare).
pub fn digest_from_hex(raw: &str) -> Result<B256, SigningError> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(stripped).map_err(|_| SigningError::MalformedDigest)?;
    if bytes.len() != 32 {
        return Err(SigningError::DigestLength(bytes.len()));
    }
    Ok(B256::from_slice(&bytes))
}

/// The signer identity a key controls.
pub fn signer_address(key: &SigningKey) -> Address {
    verifying_address(key.verifying_key())
}

/// Derive an address from a public key: keccak256 of the uncompressed SEC1
/// encoding (sans the 0x04 tag), low 20 bytes.
pub fn verifying_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Sign a 32-byte canonical digest, returning `(r, s, v)` with `v = 27 +
/// recovery id`.
pub fn sign_withdrawal(key: &SigningKey, digest: B256) -> Result<Signature, SigningError> {
    let (sig, recid) = key
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|_| SigningError::Ecdsa)?;
    let (r, s) = sig.split_bytes();
    Ok(Signature::new(
        B256::from_slice(r.as_slice()),
        B256::from_slice(s.as_slice()),
        27 + recid.to_byte(),
    ))
}

/// Sign a withdrawal intent (digest + sign in one step).
pub fn sign_intent(key: &SigningKey, intent: &WithdrawalIntent) -> Result<Signature, SigningError> {
    sign_withdrawal(key, withdrawal_digest(intent))
}

/// Collect an aggregate proof from keys supplied in registered-signer order.
///
/// Mirrors the off-chain collection step: each of the first T signers signs
/// the same digest, and the signatures are stacked in signer order.
pub fn collect_proof(
    keys: &[SigningKey],
    intent: &WithdrawalIntent,
) -> Result<AggregateProof, SigningError> {
    let digest = withdrawal_digest(intent);
    let mut signatures = Vec::with_capacity(keys.len());
    for key in keys {
        signatures.push(sign_withdrawal(key, digest)?);
    }
    Ok(AggregateProof::from_signatures(signatures))
}
