//! Threshold verification of aggregate proofs.
//!
//! This is the security-critical path: it must reject any proof that does not
//! supply at least T distinct, order-correct, genuinely-recovered registered
//! signers over the exact canonical digest of the exact intent whose nonce
//! matches the vault's current counter.
//!
//! Notes:
//! - Proof entries must be ordered by ascending position in the registered
//!   signer set. This keeps verification a single linear pass and makes the
//!   proof canonical: one valid proof per signer subset, not T! reorderings.
//! - We accept signatures with v in {0, 1, 27, 28} and normalise high-s
//!   values (EIP-2), flipping the recovery id parity alongside.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use tracing::{debug, warn};

use vault_multisig_types::{AggregateProof, Signature, WithdrawalIntent};

use crate::digest::withdrawal_digest;
use crate::errors::VerifyError;
use crate::signer::verifying_address;
use crate::vault::{Authorized, Vault};

/// Verify `proof` against `vault` and, on success, consume the nonce and
/// release the intent for execution.
///
/// No rejection path mutates vault state. Two concurrent calls that both
/// observe the same nonce can both pass the signature checks, but only one
/// wins the final compare-and-increment; the other is told its nonce is
/// stale and its withdrawal is not released.
pub fn authorize(
    vault: &Vault,
    intent: WithdrawalIntent,
    proof: &AggregateProof,
) -> Result<Authorized, VerifyError> {
    if intent.vault != vault.address() {
        warn!(expected = %vault.address(), got = %intent.vault, "intent names a different vault");
        return Err(VerifyError::VaultMismatch { expected: vault.address(), got: intent.vault });
    }

    // Fast-path staleness check against the currently observed counter. The
    // authoritative check is the compare-and-increment at the end.
    let observed = vault.current_nonce();
    if intent.nonce != observed {
        return Err(VerifyError::StaleNonce { expected: observed, got: intent.nonce });
    }

    let digest = withdrawal_digest(&intent);

    // Positions (into the registered signer set) of recovered signers, in
    // proof order. Strictly ascending by construction of the checks below.
    let mut positions: Vec<usize> = Vec::with_capacity(proof.len());
    for (index, sig) in proof.iter().enumerate() {
        let recovered = recover_signer(digest, sig, index)?;
        let position = vault
            .signer_index(recovered)
            .ok_or(VerifyError::UnknownSigner { index, recovered })?;
        if positions.contains(&position) {
            return Err(VerifyError::DuplicateSigner { index, signer: recovered });
        }
        if positions.last().is_some_and(|&last| position < last) {
            return Err(VerifyError::OutOfOrder { index });
        }
        positions.push(position);
    }

    if positions.len() < vault.threshold() {
        warn!(
            valid = positions.len(),
            required = vault.threshold(),
            "proof below threshold"
        );
        return Err(VerifyError::ThresholdNotMet {
            required: vault.threshold(),
            valid: positions.len(),
        });
    }

    // Single mutation point. Losing the race means another authorization
    // consumed this nonce between the fast-path check and here.
    if !vault.sequencer().advance_if_current(intent.nonce) {
        return Err(VerifyError::StaleNonce {
            expected: vault.current_nonce(),
            got: intent.nonce,
        });
    }

    debug!(
        vault = %vault.address(),
        destination = %intent.destination,
        signers = positions.len(),
        nonce = %intent.nonce,
        "withdrawal authorised"
    );
    Ok(Authorized { signer_count: positions.len(), nonce: intent.nonce, intent })
}

/// Recover the signer identity from `(digest, r, s, v)`.
///
/// The identity is derived the same way addresses are derived everywhere else
/// in the system (keccak256 of the uncompressed public key).
pub(crate) fn recover_signer(
    digest: B256,
    sig: &Signature,
    index: usize,
) -> Result<Address, VerifyError> {
    let recid_byte = sig
        .recovery_id()
        .map_err(|_| VerifyError::MalformedSignature { index })?;

    let mut rs = [0u8; 64];
    rs[0..32].copy_from_slice(sig.r.as_slice());
    rs[32..64].copy_from_slice(sig.s.as_slice());
    let mut parsed =
        EcdsaSignature::from_slice(&rs).map_err(|_| VerifyError::MalformedSignature { index })?;
    let mut recid = RecoveryId::from_byte(recid_byte)
        .ok_or(VerifyError::MalformedSignature { index })?;

    // EIP-2 low-s normalisation; s and the recovery id parity flip together.
    if let Some(normalised) = parsed.normalize_s() {
        parsed = normalised;
        recid = RecoveryId::from_byte(recid_byte ^ 1)
            .ok_or(VerifyError::MalformedSignature { index })?;
    }

    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &parsed, recid)
        .map_err(|_| VerifyError::MalformedSignature { index })?;
    Ok(verifying_address(&key))
}
