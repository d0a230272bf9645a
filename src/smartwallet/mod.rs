//! Smart-wallet relay integration.
//!
//! # Data Flow
//! ```text
//! account.rs (AccountKind, encodings, EIP-7702 designators)
//! payment.rs (sponsored / erc20 / native)
//!     → client.rs (prepare → sign → send)
//!     → rpc.rs (JSON-RPC + task status over HTTP)
//!     → task.rs (poll until terminal, wait or watch)
//! bundler.rs wraps client.rs with user-operation style calls
//! ```
//!
//! # Security Constraints
//! - The sponsor API key travels in a header, never in request bodies or logs
//! - Only digests returned by the relay are signed; the owner key stays local

pub mod account;
pub mod bundler;
pub mod client;
pub mod payment;
pub mod rpc;
pub mod task;
pub mod types;

pub use account::{AccountKind, EntryPoint, EntryPointVersion, WalletEncoding};
pub use bundler::{BundlerClient, GasPrice, UserOperationGasPrice, UserOperationReceipt};
pub use client::{ExecuteResponse, SmartWalletClient};
pub use payment::Payment;
pub use task::TaskHandle;
pub use types::{
    Call, Estimate, FeeQuote, SmartWalletError, SmartWalletResult, TaskEvent, TaskState,
    TaskStatus,
};
