//! Canonical withdrawal digest.
//!
//! This layout is the external binary contract of the core: the execution
//! environment that ultimately releases funds recomputes the same digest to
//! validate the submitted signatures, so any change here is a hard fork of
//! the authorization scheme.

use alloy_primitives::{keccak256, B256};

use vault_multisig_types::WithdrawalIntent;

/// ERC-191 version-0 domain prefix (`0x19 || 0x00`).
///
/// Keeps the preimage from colliding with signed transactions or other
/// signed-message conventions.
pub const DOMAIN_PREFIX: [u8; 2] = [0x19, 0x00];

/// Compute the canonical digest all signers sign and the verifier recovers
/// against.
///
/// Preimage layout (big-endian for integer fields, no length delimiters):
/// - 2-byte domain prefix
/// - `vault` address (20 bytes)
/// - `destination` address (20 bytes)
/// - `amount` (32 bytes, left-padded)
/// - `data` (variable)
/// - `nonce` (32 bytes, left-padded)
///
/// A single keccak256 pass over the preimage yields the digest. Structurally
/// equal intents always produce byte-identical output.
pub fn withdrawal_digest(intent: &WithdrawalIntent) -> B256 {
    let mut buf = Vec::with_capacity(2 + 20 + 20 + 32 + intent.data.len() + 32);
    buf.extend_from_slice(&DOMAIN_PREFIX);
    buf.extend_from_slice(intent.vault.as_slice());
    buf.extend_from_slice(intent.destination.as_slice());
    buf.extend_from_slice(&intent.amount.to_be_bytes::<32>());
    buf.extend_from_slice(&intent.data);
    buf.extend_from_slice(&intent.nonce.to_be_bytes::<32>());
    keccak256(buf)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, keccak256, Bytes, U256};

    use super::{withdrawal_digest, DOMAIN_PREFIX};
    use vault_multisig_types::WithdrawalIntent;

    fn sample_intent() -> WithdrawalIntent {
        WithdrawalIntent::new(
            address!("00000000000000000000000000000000000000aa"),
            address!("00000000000000000000000000000000000000bb"),
            U256::from(1000u64),
            Bytes::from_static(&[0xca, 0xfe]),
            U256::from(3u64),
        )
    }

    #[test]
    fn digest_matches_documented_preimage_layout() {
        let intent = sample_intent();

        let mut expected = Vec::new();
        expected.extend_from_slice(&DOMAIN_PREFIX);
        expected.extend_from_slice(intent.vault.as_slice());
        expected.extend_from_slice(intent.destination.as_slice());
        expected.extend_from_slice(&U256::from(1000u64).to_be_bytes::<32>());
        expected.extend_from_slice(&[0xca, 0xfe]);
        expected.extend_from_slice(&U256::from(3u64).to_be_bytes::<32>());

        assert_eq!(withdrawal_digest(&intent), keccak256(expected));
    }

    #[test]
    fn digest_is_deterministic_for_equal_intents() {
        assert_eq!(withdrawal_digest(&sample_intent()), withdrawal_digest(&sample_intent()));
    }

    #[test]
    fn digest_changes_when_any_field_changes() {
        let base = sample_intent();
        let base_digest = withdrawal_digest(&base);

        let mut m = base.clone();
        m.vault = address!("00000000000000000000000000000000000000cc");
        assert_ne!(withdrawal_digest(&m), base_digest);

        let mut m = base.clone();
        m.destination = address!("00000000000000000000000000000000000000cc");
        assert_ne!(withdrawal_digest(&m), base_digest);

        let mut m = base.clone();
        m.amount = U256::from(1001u64);
        assert_ne!(withdrawal_digest(&m), base_digest);

        let mut m = base.clone();
        m.data = Bytes::from_static(&[0xca, 0xff]);
        assert_ne!(withdrawal_digest(&m), base_digest);

        let mut m = base;
        m.nonce = U256::from(4u64);
        assert_ne!(withdrawal_digest(&m), base_digest);
    }
}
