//! Builtin network table and lookup helpers.

use alloy::primitives::{address, Address};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::chains::types::{
    ChainConfig, ChainConfigError, ChainDescriptor, NativeCurrency, TokenContracts,
};

/// Counter contract deployed at the same address on every builtin network.
pub const COUNTER_ADDRESS: Address = address!("EEeBe2F778AA186e88dCf2FEb8f8231565769C27");

/// Canonical Multicall3 deployment.
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

static BUILTIN: LazyLock<ChainRegistry> = LazyLock::new(ChainRegistry::builtin);

fn descriptor(network: &str) -> ChainDescriptor {
    ChainDescriptor {
        network: network.to_string(),
        native_currency: NativeCurrency::default(),
        multicall3: Some(MULTICALL3_ADDRESS),
        testnet: true,
    }
}

/// The networks shipped with the crate.
pub fn builtin_chains() -> Vec<ChainConfig> {
    vec![
        ChainConfig {
            key: "inkSepolia".to_string(),
            name: "Ink Sepolia".to_string(),
            chain_id: 763373,
            rpc_url: "https://rpc.ink-sepolia.gelato.digital".to_string(),
            failover_urls: vec!["https://rpc-gel-sepolia.inkonchain.com".to_string()],
            block_explorer: "https://explorer-sepolia.inkonchain.com".to_string(),
            tokens: TokenContracts {
                weth: Some(address!("60C67E75292B101F9289f11f59aD7DD75194CCa6")),
                ..Default::default()
            },
            target_contract: Some(COUNTER_ADDRESS),
            chain: descriptor("ink-sepolia"),
        },
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
            target_contract: Some(COUNTER_ADDRESS),
            chain: descriptor("arbitrum-sepolia"),
        },
        ChainConfig {
            key: "baseSepolia".to_string(),
            name: "Base Sepolia".to_string(),
            chain_id: 84532,
            rpc_url: "https://sepolia.base.org".to_string(),
            failover_urls: Vec::new(),
            block_explorer: "https://sepolia.basescan.org".to_string(),
            tokens: TokenContracts {
                usdc: Some(address!("036CbD53842c5426634e7929541eC2318f3dCF7e")),
                weth: Some(address!("4200000000000000000000000000000000000006")),
                wip: None,
            },
            target_contract: Some(COUNTER_ADDRESS),
            chain: descriptor("base-sepolia"),
        },
    ]
}

/// Immutable map from registry key to chain record.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: HashMap<String, ChainConfig>,
}

impl ChainRegistry {
    /// Build a registry, rejecting duplicate keys and chain ids.
    pub fn from_chains(chains: Vec<ChainConfig>) -> Result<Self, ChainConfigError> {
        let mut by_key: HashMap<String, ChainConfig> = HashMap::with_capacity(chains.len());
        let mut ids: HashMap<u64, String> = HashMap::with_capacity(chains.len());

        for chain in chains {
            if by_key.contains_key(&chain.key) {
                return Err(ChainConfigError::DuplicateKey(chain.key));
            }
            if let Some(first) = ids.get(&chain.chain_id) {
                return Err(ChainConfigError::DuplicateChainId {
                    chain_id: chain.chain_id,
                    first: first.clone(),
                    second: chain.key,
                });
            }
            ids.insert(chain.chain_id, chain.key.clone());
            by_key.insert(chain.key.clone(), chain);
        }

        Ok(Self { chains: by_key })
    }

    /// Registry holding only the builtin networks.
    pub fn builtin() -> Self {
        let chains = builtin_chains()
            .into_iter()
            .map(|c| (c.key.clone(), c))
            .collect();
        Self { chains }
    }

    /// Builtin networks plus user entries. An entry whose key matches a
    /// builtin one replaces it.
    pub fn with_overrides(overrides: Vec<ChainConfig>) -> Result<Self, ChainConfigError> {
        let mut chains = builtin_chains();
        for entry in overrides {
            match chains.iter_mut().find(|c| c.key == entry.key) {
                Some(existing) => {
                    tracing::debug!(key = %entry.key, "Overriding builtin chain");
                    *existing = entry;
                }
                None => chains.push(entry),
            }
        }
        Self::from_chains(chains)
    }

    /// Look up a chain by numeric id. A miss is not an error.
    pub fn by_chain_id(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.values().find(|c| c.chain_id == chain_id)
    }

    /// Look up a chain by registry key.
    pub fn by_name(&self, name: &str) -> Result<&ChainConfig, ChainConfigError> {
        self.chains
            .get(name)
            .ok_or_else(|| ChainConfigError::NotFound(name.to_string()))
    }

    /// Registry keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainConfig> {
        self.chains.values()
    }
}

/// Look up a builtin chain by numeric id.
pub fn get_chain_config_by_chain_id(chain_id: u64) -> Option<&'static ChainConfig> {
    BUILTIN.by_chain_id(chain_id)
}

/// Look up a builtin chain by registry key.
pub fn get_chain_config_by_name(name: &str) -> Result<&'static ChainConfig, ChainConfigError> {
    BUILTIN.by_name(name)
}
