//! Owner key management and signing.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables (or generated)
//! - Keys are never logged or serialized

use alloy::eips::eip7702::{Authorization, SignedAuthorization};
use alloy::primitives::{Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Owner of a smart account, or sender of plain transactions.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Whether the key was generated for this run only.
    ephemeral: bool,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet initialized");

        Ok(Self {
            signer,
            ephemeral: false,
        })
    }

    /// Generate a fresh random key.
    pub fn random() -> Self {
        let signer = PrivateKeySigner::random();
        tracing::info!(address = %signer.address(), "Generated ephemeral wallet");
        Self {
            signer,
            ephemeral: true,
        }
    }

    /// Load wallet from `PRIVATE_KEY`, generating a key when it is unset or
    /// empty.
    pub fn from_env_or_random() -> BlockchainResult<Self> {
        Self::from_key_or_random(std::env::var(PRIVATE_KEY_ENV_VAR).ok().as_deref())
    }

    /// Wallet from `key`, or a generated one when `key` is missing or blank.
    pub fn from_key_or_random(key: Option<&str>) -> BlockchainResult<Self> {
        match key {
            Some(key) if !key.trim().is_empty() => Self::from_private_key(key),
            _ => Ok(Self::random()),
        }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// True when the key was generated rather than loaded.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Get the underlying signer.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign a 32-byte digest without any prefix.
    pub async fn sign_hash(&self, hash: B256) -> BlockchainResult<Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))
    }

    /// Sign an EIP-7702 authorization delegating this account to `delegate`.
    pub async fn sign_authorization(
        &self,
        chain_id: u64,
        delegate: Address,
        nonce: u64,
    ) -> BlockchainResult<SignedAuthorization> {
        let authorization = Authorization {
            chain_id: U256::from(chain_id),
            address: delegate,
            nonce,
        };
        let signature = self.sign_hash(authorization.signature_hash()).await?;

        tracing::debug!(
            delegate = %delegate,
            chain_id = chain_id,
            nonce = nonce,
            "Signed EIP-7702 authorization"
        );

        Ok(authorization.into_signed(signature))
    }
}
