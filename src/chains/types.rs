//! Chain descriptor records and registry errors.

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by registry lookups and construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainConfigError {
    /// No entry is registered under the requested key.
    #[error("Chain configuration not found for name: {0}")]
    NotFound(String),

    /// Two entries share the same key.
    #[error("Duplicate chain key: {0}")]
    DuplicateKey(String),

    /// Two entries share the same chain id.
    #[error("Duplicate chain id {chain_id} ({first} and {second})")]
    DuplicateChainId {
        chain_id: u64,
        first: String,
        second: String,
    },
}

/// Native currency of a network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "Ether".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// Network description handed to the client layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainDescriptor {
    /// Network slug (e.g. "ink-sepolia").
    pub network: String,

    pub native_currency: NativeCurrency,

    /// Multicall3 deployment, if any.
    pub multicall3: Option<Address>,

    pub testnet: bool,
}

impl Default for ChainDescriptor {
    fn default() -> Self {
        Self {
            network: String::new(),
            native_currency: NativeCurrency::default(),
            multicall3: None,
            testnet: true,
        }
    }
}

/// Token contracts known on a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenContracts {
    pub usdc: Option<Address>,
    pub weth: Option<Address>,
    pub wip: Option<Address>,
}

/// One network entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainConfig {
    /// Registry key used for lookup by name (e.g. "inkSepolia").
    pub key: String,

    /// Human readable name (e.g. "Ink Sepolia").
    pub name: String,

    pub chain_id: u64,

    pub rpc_url: String,

    /// Failover JSON-RPC endpoints, tried in order after `rpc_url`.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    pub block_explorer: String,

    #[serde(default)]
    pub tokens: TokenContracts,

    /// Counter contract the drivers call `increment()` on.
    #[serde(default)]
    pub target_contract: Option<Address>,

    #[serde(default)]
    pub chain: ChainDescriptor,
}

impl ChainConfig {
    /// Token used for ERC-20 fee payment: USDC when known, else WETH.
    pub fn payment_token(&self) -> Option<Address> {
        self.tokens.usdc.or(self.tokens.weth)
    }

    /// Explorer link for a transaction.
    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_base(), hash)
    }

    /// Explorer link for an address.
    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_base(), address)
    }

    fn explorer_base(&self) -> &str {
        self.block_explorer.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256};

    fn arb() -> ChainConfig {
        ChainConfig {
            key: "arbSepolia".to_string(),
            name: "Arbitrum Sepolia".to_string(),
            chain_id: 421614,
            rpc_url: "https://sepolia-rollup.arbitrum.io/rpc".to_string(),
            failover_urls: Vec::new(),
            block_explorer: "https://sepolia.arbiscan.io/".to_string(),
            tokens: TokenContracts {
                weth: Some(address!("2836ae2eA2c013acD38028fD0C77B92cccFa2EE4")),
                ..Default::default()
            },
            target_contract: None,
            chain: ChainDescriptor::default(),
        }
    }

    #[test]
    fn test_explorer_links_strip_trailing_slash() {
        let chain = arb();
        let hash = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        assert_eq!(
            chain.tx_url(&hash),
            format!("https://sepolia.arbiscan.io/tx/{hash}")
        );
        assert!(chain
            .address_url(&Address::ZERO)
            .starts_with("https://sepolia.arbiscan.io/address/0x"));
    }

    #[test]
    fn test_payment_token_prefers_usdc() {
        let mut chain = arb();
        assert_eq!(chain.payment_token(), chain.tokens.weth);

        let usdc = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");
        chain.tokens.usdc = Some(usdc);
        assert_eq!(chain.payment_token(), Some(usdc));
    }

    #[test]
    fn test_not_found_display() {
        let err = ChainConfigError::NotFound("doesNotExist".to_string());
        assert_eq!(
            err.to_string(),
            "Chain configuration not found for name: doesNotExist"
        );
    }

    #[test]
    fn test_chain_config_from_toml() {
        let toml = r#"
            key = "localAnvil"
            name = "Local Anvil"
            chain_id = 31337
            rpc_url = "http://localhost:8545"
            block_explorer = "http://localhost:4000"
            target_contract = "0xEEeBe2F778AA186e88dCf2FEb8f8231565769C27"

            [tokens]
            weth = "0x4200000000000000000000000000000000000006"
        "#;
        let chain: ChainConfig = toml::from_str(toml).unwrap();
        assert_eq!(chain.chain_id, 31337);
        assert!(chain.tokens.usdc.is_none());
        assert_eq!(
            chain.tokens.weth,
            Some(address!("4200000000000000000000000000000000000006"))
        );
        assert_eq!(chain.chain.native_currency.symbol, "ETH");
    }
}
