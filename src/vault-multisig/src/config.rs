//! Vault configuration: the registered signer set and threshold.
//!
//! Loaded once and immutable for the lifetime of the core. Signer rotation is
//! deliberately not modelled; a new signer set is a new config and a new
//! [`crate::vault::Vault`].

use std::path::Path;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Operator-supplied vault configuration.
///
/// JSON layout:
/// ```json
/// {
///   "vault": "0x…",
///   "signers": ["0x…", "0x…"],
///   "threshold": 2,
///   "nonce": "0x0"
/// }
/// ```
/// Signer order is significant: proofs must present signatures in ascending
/// order of position in this list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Address of the vault this configuration belongs to.
    pub vault: Address,
    /// Registered co-signers, in their fixed canonical order.
    pub signers: Vec<Address>,
    /// Minimum number of distinct valid signers per authorization.
    pub threshold: usize,
    /// Starting authorization counter; defaults to 0 for a fresh vault.
    #[serde(default)]
    pub nonce: U256,
}

impl VaultConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject configurations no vault could be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vault == Address::ZERO {
            return Err(ConfigError::ZeroVault);
        }
        if self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.threshold > self.signers.len() {
            return Err(ConfigError::ThresholdExceedsSigners {
                threshold: self.threshold,
                signers: self.signers.len(),
            });
        }
        for (i, signer) in self.signers.iter().enumerate() {
            if *signer == Address::ZERO {
                return Err(ConfigError::ZeroSigner);
            }
            if self.signers[..i].contains(signer) {
                return Err(ConfigError::DuplicateSigner(*signer));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, U256};

    use super::VaultConfig;
    use crate::errors::ConfigError;

    fn valid() -> VaultConfig {
        VaultConfig {
            vault: address!("00000000000000000000000000000000000000aa"),
            signers: vec![
                address!("0000000000000000000000000000000000000001"),
                address!("0000000000000000000000000000000000000002"),
            ],
            threshold: 2,
            nonce: U256::ZERO,
        }
    }

    #[test]
    fn parses_json_with_default_nonce() {
        let config = VaultConfig::from_json_str(
            r#"{
                "vault": "0x00000000000000000000000000000000000000aa",
                "signers": ["0x0000000000000000000000000000000000000001"],
                "threshold": 1
            }"#,
        )
        .unwrap();
        assert_eq!(config.nonce, U256::ZERO);
        assert_eq!(config.threshold, 1);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_zero_threshold() {
        let mut config = valid();
        config.threshold = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroThreshold)));
    }

    #[test]
    fn rejects_threshold_above_signer_count() {
        let mut config = valid();
        config.threshold = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdExceedsSigners { threshold: 3, signers: 2 })
        ));
    }

    #[test]
    fn rejects_duplicate_and_zero_signers() {
        let mut config = valid();
        config.signers.push(config.signers[0]);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateSigner(_))));

        let mut config = valid();
        config.signers[1] = alloy_primitives::Address::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSigner)));
    }

    #[test]
    fn rejects_zero_vault() {
        let mut config = valid();
        config.vault = alloy_primitives::Address::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroVault)));
    }
}
