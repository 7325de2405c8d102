//! Threshold multisig **authorization core** for custodial vault withdrawals.
//!
//! A withdrawal executes only if at least T of N registered co-signers have
//! produced valid ECDSA signatures over the canonical, replay-protected
//! digest of that exact withdrawal.
//!
//! Design notes:
//! - The core decides *whether* a proposed withdrawal is authorised; it never
//!   moves funds. The [`vault::Authorized`] value is handed to an external
//!   executor.
//! - The digest layout in [`digest`] is the one externally-facing binary
//!   contract: a downstream execution environment must be able to recompute
//!   the same hash independently.
//! - The vault nonce is the single piece of mutable state; it advances only
//!   through [`sequencer::NonceSequencer::advance_if_current`] on a
//!   successful authorization, so a verified proof cannot replay.

pub mod config;
pub mod digest;
pub mod errors;
pub mod sequencer;
pub mod signer;
pub mod vault;
pub mod verifier;


pub use config::VaultConfig;
pub use digest::withdrawal_digest;
pub use errors::{ConfigError, SigningError, VerifyError};
pub use sequencer::NonceSequencer;
pub use signer::{
    collect_proof, digest_from_hex, sign_intent, sign_withdrawal, signer_address,
    signing_key_from_hex,
};
pub use vault::{Authorized, Vault};
pub use vault_multisig_types::{AggregateProof, EncodingError, Signature, WithdrawalIntent};
