//! Chain configuration registry.
//!
//! # Data Flow
//! ```text
//! builtin table (registry.rs)
//!     → optional [[chains]] entries from the config file
//!     → ChainRegistry (validated, immutable)
//!     → lookups by chain id (Option) or by key (Result)
//! ```
//!
//! # Design Decisions
//! - Records never change after the registry is built
//! - Lookup by id returns `None` on a miss; lookup by name returns
//!   `ChainConfigError::NotFound` carrying the requested name
//! - Chain ids and keys are unique per registry

pub mod registry;
pub mod types;

pub use registry::{
    builtin_chains, get_chain_config_by_chain_id, get_chain_config_by_name, ChainRegistry,
};
pub use types::{ChainConfig, ChainConfigError, ChainDescriptor, NativeCurrency, TokenContracts};
