//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (PRIVATE_KEY)
//!     → wallet.rs (key loading, digest and authorization signing)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (plain EOA send, receipt polling)
//!     → contracts.rs (Counter / WETH calldata)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contracts;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use transaction::{wait_for_receipt, TxSender};
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus};
pub use wallet::Wallet;
