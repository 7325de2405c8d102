//! Vault state: signer set, threshold, and the authorization counter.

use alloy_primitives::{Address, U256};

use vault_multisig_types::{AggregateProof, WithdrawalIntent};

use crate::config::VaultConfig;
use crate::errors::{ConfigError, VerifyError};
use crate::sequencer::NonceSequencer;
use crate::verifier;

/// One vault's authorization state.
///
/// The signer set and threshold are configuration: loaded once via
/// [`VaultConfig`] and immutable for the lifetime of the value. The nonce is
/// owned by the embedded [`NonceSequencer`] and written only on a successful
/// authorization, so a `Vault` can be shared across threads and raced safely.
#[derive(Debug)]
pub struct Vault {
    address: Address,
    signers: Vec<Address>,
    threshold: usize,
    sequencer: NonceSequencer,
}

impl Vault {
    /// Build a vault from validated configuration.
    pub fn new(config: VaultConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            address: config.vault,
            signers: config.signers,
            threshold: config.threshold,
            sequencer: NonceSequencer::new(config.nonce),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Registered signers in their canonical order.
    pub fn signers(&self) -> &[Address] {
        &self.signers
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The nonce a fresh intent must carry.
    pub fn current_nonce(&self) -> U256 {
        self.sequencer.current()
    }

    /// Position of `signer` within the registered set, if registered.
    pub fn signer_index(&self, signer: Address) -> Option<usize> {
        self.signers.iter().position(|&s| s == signer)
    }

    pub(crate) fn sequencer(&self) -> &NonceSequencer {
        &self.sequencer
    }

    /// Verify an aggregate proof for `intent`; see [`verifier::authorize`].
    pub fn authorize(
        &self,
        intent: WithdrawalIntent,
        proof: &AggregateProof,
    ) -> Result<Authorized, VerifyError> {
        verifier::authorize(self, intent, proof)
    }
}

/// A successfully authorised withdrawal, ready for the external executor.
///
/// The core never performs the transfer itself; this value is the hand-off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authorized {
    /// The intent exactly as verified.
    pub intent: WithdrawalIntent,
    /// How many valid distinct signers the proof carried (>= threshold).
    pub signer_count: usize,
    /// The counter value this authorization consumed.
    pub nonce: U256,
}
