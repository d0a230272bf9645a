//! Resilience helpers.
//!
//! # Design Decisions
//! - Every external wait has a deadline (see `RelayConfig::task_timeout_secs`)
//! - Status polling backs off exponentially with jitter
//! - Relay submissions are never retried; a failed submit ends the run

pub mod backoff;

pub use backoff::{calculate_backoff, PollBackoff};
