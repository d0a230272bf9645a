//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: chain, task_id, tx_hash, ...)
//!     → logging.rs subscriber (EnvFilter + fmt layer, stderr)
//! ```

pub mod logging;

pub use logging::init_tracing;
