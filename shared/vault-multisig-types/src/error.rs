use thiserror::Error;

/// Errors during intent/proof construction.
///
/// These are caller bugs (malformed fields), not retryable conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// An address field was not exactly 20 bytes.
    #[error("{field} must be exactly 20 bytes, got {len}")]
    AddressLength { field: &'static str, len: usize },

    /// A big-endian integer encoding did not fit in 256 bits.
    #[error("{field} does not fit in 256 bits")]
    IntegerRange { field: &'static str },

    /// The parallel (v, r, s) arrays of a proof disagree on length.
    #[error("proof arrays disagree on length: v={v}, r={r}, s={s}")]
    ProofArityMismatch { v: usize, r: usize, s: usize },

    /// A recovery id outside the accepted {0, 1, 27, 28} set.
    #[error("unrecognised recovery id {0} (expected 0, 1, 27 or 28)")]
    RecoveryId(u8),
}
