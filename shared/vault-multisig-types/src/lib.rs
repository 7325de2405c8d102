//! Shared types for the vault multisig authorization core.
//!
//! These types form the contract between off-chain tooling (intent builders,
//! signers, proof aggregators) and the verification core: the withdrawal
//! intent, the single-signer signature, and the aggregate proof submitted for
//! threshold verification.

pub mod error;
pub mod intent;
pub mod signature;

pub use error::EncodingError;
pub use intent::WithdrawalIntent;
pub use signature::{AggregateProof, Signature};
