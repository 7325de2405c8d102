use alloy_primitives::B256;

use crate::error::EncodingError;

/// A single ECDSA signature over the canonical withdrawal digest.
///
/// `v` is accepted either as the Ethereum convention (27/28) or already
/// normalised to a raw recovery id (0/1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

impl Signature {
    pub fn new(r: B256, s: B256, v: u8) -> Self {
        Self { r, s, v }
    }

    /// Normalise `v` to a raw recovery id in {0, 1}.
    pub fn recovery_id(&self) -> Result<u8, EncodingError> {
        match self.v {
            0 | 1 => Ok(self.v),
            27 | 28 => Ok(self.v - 27),
            other => Err(EncodingError::RecoveryId(other)),
        }
    }

    /// Serialise as the conventional 65-byte `r || s || v` blob.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }
}

/// An ordered set of signatures submitted for threshold verification.
///
/// Ordering contract: entries must appear in ascending order of the signer's
/// index within the vault's registered signer set. The verifier rejects any
/// other ordering, so there is exactly one canonical proof per signer subset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateProof {
    signatures: Vec<Signature>,
}

impl AggregateProof {
    /// Build a proof from signatures already in submission order.
    pub fn from_signatures(signatures: Vec<Signature>) -> Self {
        Self { signatures }
    }

    /// Build a proof from the parallel `(v[], r[], s[])` arrays used on the
    /// wire; index `i` across all three belongs to the same signature.
    pub fn from_parallel(v: &[u8], r: &[B256], s: &[B256]) -> Result<Self, EncodingError> {
        if v.len() != r.len() || v.len() != s.len() {
            return Err(EncodingError::ProofArityMismatch {
                v: v.len(),
                r: r.len(),
                s: s.len(),
            });
        }
        let signatures = v
            .iter()
            .zip(r.iter().zip(s.iter()))
            .map(|(&v, (&r, &s))| Signature { r, s, v })
            .collect();
        Ok(Self { signatures })
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;

    use super::{AggregateProof, Signature};
    use crate::error::EncodingError;

    #[test]
    fn recovery_id_normalises_both_conventions() {
        let sig = |v| Signature::new(B256::ZERO, B256::ZERO, v);
        assert_eq!(sig(27).recovery_id().unwrap(), 0);
        assert_eq!(sig(28).recovery_id().unwrap(), 1);
        assert_eq!(sig(0).recovery_id().unwrap(), 0);
        assert_eq!(sig(1).recovery_id().unwrap(), 1);
        assert_eq!(sig(29).recovery_id().unwrap_err(), EncodingError::RecoveryId(29));
    }

    #[test]
    fn to_bytes_lays_out_r_s_v() {
        let sig = Signature::new(B256::repeat_byte(0xaa), B256::repeat_byte(0xbb), 28);
        let bytes = sig.to_bytes();
        assert!(bytes[0..32].iter().all(|&b| b == 0xaa));
        assert!(bytes[32..64].iter().all(|&b| b == 0xbb));
        assert_eq!(bytes[64], 28);
    }

    #[test]
    fn from_parallel_rejects_mismatched_arity() {
        let err = AggregateProof::from_parallel(&[27, 28], &[B256::ZERO], &[B256::ZERO])
            .unwrap_err();
        assert_eq!(err, EncodingError::ProofArityMismatch { v: 2, r: 1, s: 1 });
    }

    #[test]
    fn from_parallel_pairs_by_index() {
        let proof = AggregateProof::from_parallel(
            &[27, 28],
            &[B256::repeat_byte(1), B256::repeat_byte(2)],
            &[B256::repeat_byte(3), B256::repeat_byte(4)],
        )
        .unwrap();
        assert_eq!(proof.len(), 2);
        let sigs: Vec<_> = proof.iter().copied().collect();
        assert_eq!(sigs[0], Signature::new(B256::repeat_byte(1), B256::repeat_byte(3), 27));
        assert_eq!(sigs[1], Signature::new(B256::repeat_byte(2), B256::repeat_byte(4), 28));
    }
}
