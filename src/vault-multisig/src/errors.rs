use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors during off-chain signing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// The private key bytes do not form a valid secp256k1 scalar.
    #[error("malformed private key")]
    MalformedKey,
    /// A hex digest string that does not decode.
    #[error("digest is not valid hex")]
    MalformedDigest,
    /// A digest of the wrong width.
    #[error("digest must be exactly 32 bytes, got {0}")]
    DigestLength(usize),
    /// The underlying ECDSA operation failed.
    #[error("ecdsa signing failed")]
    Ecdsa,
}

/// Errors during threshold verification.
///
/// Every variant is terminal for that specific proof: no rejection path
/// mutates vault state. `StaleNonce` means the caller must refresh the nonce
/// and re-collect signatures over a fresh intent; the proof errors mean the
/// submitted proof itself is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The intent names a different vault than the one verifying it.
    #[error("intent targets vault {got}, verifier holds {expected}")]
    VaultMismatch { expected: Address, got: Address },

    /// The intent's nonce is not the vault's current counter.
    #[error("stale nonce: intent carries {got}, vault is at {expected}")]
    StaleNonce { expected: U256, got: U256 },

    /// Signature bytes from which no public key can be recovered.
    #[error("signature {index} is malformed and cannot be recovered")]
    MalformedSignature { index: usize },

    /// A recovered identity that is not in the registered signer set.
    #[error("signature {index} recovers {recovered}, not a registered signer")]
    UnknownSigner { index: usize, recovered: Address },

    /// The same signer appears more than once in the proof.
    #[error("signer {signer} appears more than once (signature {index})")]
    DuplicateSigner { index: usize, signer: Address },

    /// Signatures not in ascending registered-signer-set order.
    #[error("signature {index} breaks ascending signer-set order")]
    OutOfOrder { index: usize },

    /// Fewer valid distinct signers than the vault threshold.
    #[error("threshold not met: {valid} valid signers, {required} required")]
    ThresholdNotMet { required: usize, valid: usize },
}

/// Errors loading or validating vault configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read vault config")]
    Io(#[from] std::io::Error),
    #[error("failed to parse vault config")]
    Parse(#[from] serde_json::Error),
    #[error("vault address must not be zero")]
    ZeroVault,
    #[error("threshold must be at least 1")]
    ZeroThreshold,
    #[error("threshold {threshold} exceeds signer count {signers}")]
    ThresholdExceedsSigners { threshold: usize, signers: usize },
    #[error("signer address must not be zero")]
    ZeroSigner,
    #[error("signer {0} registered more than once")]
    DuplicateSigner(Address),
}
