//! Smart-wallet drivers.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI (clap)  ──▶  commands::<driver>
//!                        │
//!          ┌─────────────┼───────────────────┐
//!          ▼             ▼                   ▼
//!      chains        smartwallet         blockchain
//!     registry    prepare/sign/send    RPC, wallet, tx
//!                        │
//!                        ▼
//!                   relay task poll (resilience::backoff)
//! ```

use std::process::ExitCode;

use clap::Parser;

use smartwallet_examples::commands::{Cli, Context};
use smartwallet_examples::config::load_or_default;
use smartwallet_examples::observability::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.observability.log_level);
    tracing::debug!(relay = %config.relay.rpc_url, "Configuration loaded");

    let ctx = match Context::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "Invalid chain configuration");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.run(&ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Driver failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
