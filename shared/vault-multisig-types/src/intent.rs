use alloy_primitives::{Address, Bytes, U256};

use crate::error::EncodingError;

/// A withdrawal intent: the exact operation the signers are authorising.
///
/// Immutable once constructed; every field participates in the canonical
/// digest, so two intents that differ in any field sign differently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalIntent {
    /// The vault the funds leave.
    pub vault: Address,
    /// Where the funds go.
    pub destination: Address,
    /// Withdrawal amount (interpretation — wei, token units — is the
    /// executor's concern; the core only binds the value).
    pub amount: U256,
    /// Opaque execution payload, often empty.
    pub data: Bytes,
    /// Vault-scoped replay nonce; must equal the vault's current counter at
    /// verification time.
    pub nonce: U256,
}

impl WithdrawalIntent {
    /// Build an intent from already-typed fields.
    pub fn new(
        vault: Address,
        destination: Address,
        amount: U256,
        data: Bytes,
        nonce: U256,
    ) -> Self {
        Self { vault, destination, amount, data, nonce }
    }

    /// Build an intent from raw byte encodings.
    ///
    /// `amount_be` and `nonce_be` are big-endian unsigned integers of at most
    /// 32 bytes (shorter encodings are left-padded with zeroes).
    pub fn from_raw_parts(
        vault: &[u8],
        destination: &[u8],
        amount_be: &[u8],
        data: &[u8],
        nonce_be: &[u8],
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            vault: read_address(vault, "vault")?,
            destination: read_address(destination, "destination")?,
            amount: read_u256(amount_be, "amount")?,
            data: Bytes::from(data.to_vec()),
            nonce: read_u256(nonce_be, "nonce")?,
        })
    }
}

fn read_address(bytes: &[u8], field: &'static str) -> Result<Address, EncodingError> {
    if bytes.len() != 20 {
        return Err(EncodingError::AddressLength { field, len: bytes.len() });
    }
    Ok(Address::from_slice(bytes))
}

fn read_u256(bytes: &[u8], field: &'static str) -> Result<U256, EncodingError> {
    U256::try_from_be_slice(bytes).ok_or(EncodingError::IntegerRange { field })
}
