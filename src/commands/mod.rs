//! Driver subcommands.
//!
//! Each driver is a `clap::Args` struct with an `execute` method. Drivers
//! print progress to stdout and leave diagnostics to `tracing`.

pub mod bundler;
pub mod common;
pub mod custom;
pub mod erc20;
pub mod estimate;
pub mod kernel;
pub mod native;
pub mod safe;
pub mod sponsored;
pub mod weth;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::chains::ChainConfigError;
use crate::config::ConfigError;
use crate::smartwallet::SmartWalletError;

pub use common::Context;

/// Errors surfaced by a driver run.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0} is not set")]
    MissingEnv(&'static str),

    #[error("{what} is not configured for chain {chain}")]
    MissingContract { chain: String, what: &'static str },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chain(#[from] ChainConfigError),

    #[error("no chain configured with id {0}")]
    UnknownChainId(u64),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    SmartWallet(#[from] SmartWalletError),

    #[error("transaction failed: {0}")]
    TaskFailed(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("insufficient funds: need {needed} ETH, have {available} ETH")]
    InsufficientFunds { needed: String, available: String },
}

#[derive(Parser, Debug)]
#[command(name = "smartwallet")]
#[command(about = "Smart-wallet relay drivers for sponsored, ERC-20 and native payments", long_about = None)]
pub struct Cli {
    /// TOML config file (relay endpoints, RPC settings, chain overrides)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sponsored call from a Gelato EIP-7702 account
    Sponsored(sponsored::SponsoredArgs),
    /// Call paid in an ERC-20 token
    Erc20(erc20::Erc20Args),
    /// Call paid in native currency
    Native(native::NativeArgs),
    /// Quote fee and gas without submitting
    Estimate(estimate::EstimateArgs),
    /// Sponsored call from a Safe
    SafeSponsored(safe::SafeArgs),
    /// Sponsored call from a Kernel account
    KernelSponsored(kernel::KernelArgs),
    /// Sponsored call from a custom EIP-7702 delegation
    CustomSponsored(custom::CustomArgs),
    /// Sponsored user operation through the bundler adapter
    Bundler(bundler::BundlerArgs),
    /// Wrap ETH into WETH from the owner EOA
    GetWeth(weth::GetWethArgs),
    /// List the known chains
    Chains,
}

impl Commands {
    pub async fn run(&self, ctx: &Context) -> Result<(), CommandError> {
        match self {
            Commands::Sponsored(args) => args.execute(ctx).await,
            Commands::Erc20(args) => args.execute(ctx).await,
            Commands::Native(args) => args.execute(ctx).await,
            Commands::Estimate(args) => args.execute(ctx).await,
            Commands::SafeSponsored(args) => args.execute(ctx).await,
            Commands::KernelSponsored(args) => args.execute(ctx).await,
            Commands::CustomSponsored(args) => args.execute(ctx).await,
            Commands::Bundler(args) => args.execute(ctx).await,
            Commands::GetWeth(args) => args.execute(ctx).await,
            Commands::Chains => {
                for key in ctx.registry.keys() {
                    let chain = ctx.chain(key)?;
                    println!("{:<14} {:>8}  {}", chain.key, chain.chain_id, chain.name);
                }
                Ok(())
            }
        }
    }
}
