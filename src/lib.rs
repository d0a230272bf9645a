//! Smart-wallet relay drivers.
//!
//! A chain registry, a relay client for EIP-7702 and ERC-4337 style smart
//! accounts (sponsored, ERC-20 and native payment), and the CLI drivers
//! built on them.

pub mod blockchain;
pub mod chains;
pub mod commands;
pub mod config;
pub mod observability;
pub mod resilience;
pub mod smartwallet;

pub use chains::{get_chain_config_by_chain_id, get_chain_config_by_name, ChainConfig};
pub use config::AppConfig;
pub use smartwallet::SmartWalletClient;
