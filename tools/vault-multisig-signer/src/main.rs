use std::{fs, path::PathBuf};

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use vault_multisig::{
    sign_intent, signer_address, signing_key_from_hex, withdrawal_digest, Vault, VaultConfig,
};
use vault_multisig_types::{AggregateProof, Signature, WithdrawalIntent};

/// Produce and check threshold withdrawal authorizations from the command line.
///
/// This is intentionally a thin wrapper over the `vault-multisig` core: the
/// digest, signature, and verification semantics live in the library, and
/// this tool only handles operator I/O (hex args, config/proof JSON files).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical digest for a withdrawal intent.
    Digest(IntentArgs),
    /// Sign a withdrawal intent; prints one proof entry as JSON.
    Sign(SignArgs),
    /// Verify an aggregate proof against a vault config.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct IntentArgs {
    /// Vault address (0x...).
    #[arg(long)]
    vault: Address,

    /// Destination address (0x...).
    #[arg(long)]
    destination: Address,

    /// Amount, decimal or 0x-prefixed hex.
    #[arg(long)]
    amount: U256,

    /// Opaque execution payload, hex (defaults to empty).
    #[arg(long, default_value = "0x")]
    data: Bytes,

    /// Vault nonce the intent is built against, decimal or 0x-prefixed hex.
    #[arg(long)]
    nonce: U256,
}

impl IntentArgs {
    fn intent(&self) -> WithdrawalIntent {
        WithdrawalIntent::new(
            self.vault,
            self.destination,
            self.amount,
            self.data.clone(),
            self.nonce,
        )
    }
}

#[derive(Args, Debug)]
struct SignArgs {
    #[command(flatten)]
    intent: IntentArgs,

    /// Signer private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Path to a file containing the signer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[command(flatten)]
    intent: IntentArgs,

    /// Path to the vault config JSON ({vault, signers, threshold, nonce}).
    ///
    /// The `nonce` field is the vault's replay state: this tool does not
    /// write it back, so after an authorized withdrawal the operator must
    /// bump it to the printed next expected value (or re-read it from the
    /// execution environment).
    #[arg(long, default_value = "vault.json")]
    config: PathBuf,

    /// Path to the proof JSON: an array of {r, s, v} entries in ascending
    /// registered-signer order.
    #[arg(long)]
    proof: PathBuf,
}

/// One aggregate-proof entry as exchanged between signers.
#[derive(Serialize, Deserialize, Debug)]
struct ProofEntry {
    r: B256,
    s: B256,
    v: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Digest(args) => {
            println!("{}", withdrawal_digest(&args.intent()));
            Ok(())
        }
        Command::Sign(args) => run_sign(args),
        Command::Verify(args) => run_verify(args),
    }
}

fn run_sign(args: SignArgs) -> Result<()> {
    let key_hex = if let Some(pk) = args.private_key {
        pk
    } else if let Some(ref path) = args.private_key_path {
        fs::read_to_string(path)
            .with_context(|| format!("reading private key from {}", path.display()))?
    } else {
        return Err(anyhow!(
            "missing signer key: provide --private-key or --private-key-path (or set PKEY/PRIV_KEY_PATH)"
        ));
    };

    let key = signing_key_from_hex(key_hex.trim())?;
    let signature = sign_intent(&key, &args.intent.intent())?;

    // Proof entry on stdout (machine-readable), signer identity on stderr.
    let entry = ProofEntry { r: signature.r, s: signature.s, v: signature.v };
    println!("{}", serde_json::to_string_pretty(&entry)?);
    eprintln!("signer: {}", signer_address(&key));
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let config = VaultConfig::from_path(&args.config)
        .with_context(|| format!("loading vault config from {}", args.config.display()))?;
    let vault = Vault::new(config)?;

    let raw = fs::read_to_string(&args.proof)
        .with_context(|| format!("reading proof from {}", args.proof.display()))?;
    let entries: Vec<ProofEntry> = serde_json::from_str(&raw).context("parsing proof JSON")?;
    let proof = AggregateProof::from_signatures(
        entries
            .iter()
            .map(|e| Signature::new(e.r, e.s, e.v))
            .collect(),
    );

    let authorized = vault
        .authorize(args.intent.intent(), &proof)
        .context("proof rejected")?;
    println!("{}", verify_summary(&authorized, vault.current_nonce()));
    Ok(())
}

/// Summary line for an accepted proof.
///
/// Includes the next expected nonce because the in-memory vault is dropped on
/// exit: the config file's `nonce` field is the replay state, and the
/// operator must advance it to this value before the next verification.
fn verify_summary(authorized: &vault_multisig::Authorized, next_nonce: U256) -> String {
    format!(
        "authorized: {} signers, consumed nonce {}; next expected nonce {}",
        authorized.signer_count, authorized.nonce, next_nonce
    )
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Bytes, U256};

    use vault_multisig::Authorized;
    use vault_multisig_types::WithdrawalIntent;

    use super::verify_summary;

    #[test]
    fn verify_summary_reports_the_next_expected_nonce() {
        let authorized = Authorized {
            intent: WithdrawalIntent::new(
                address!("00000000000000000000000000000000000000aa"),
                address!("00000000000000000000000000000000000000bb"),
                U256::from(1000u64),
                Bytes::new(),
                U256::ZERO,
            ),
            signer_count: 2,
            nonce: U256::ZERO,
        };
        assert_eq!(
            verify_summary(&authorized, U256::from(1u64)),
            "authorized: 2 signers, consumed nonce 0; next expected nonce 1"
        );
    }
}
