//! Driver entry points: environment checks and the WETH pre-check.
//!
//! Everything here mutates process environment, so it lives in a single
//! test to keep the steps ordered.

use clap::Parser;
use serde_json::json;

use smartwallet_examples::commands::common::owner_or_random;
use smartwallet_examples::commands::{Cli, CommandError, Context};
use smartwallet_examples::config::AppConfig;

mod common;

use common::{rpc_error, rpc_result, start_mock_server, MockServer};

const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn context(server: &MockServer) -> Context {
    let config = AppConfig {
        relay: server.relay_config(),
        chains: vec![server.chain()],
        ..AppConfig::default()
    };
    Context::new(config).unwrap()
}

async fn run(ctx: &Context, args: &[&str]) -> Result<(), CommandError> {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command.run(ctx).await
}

#[tokio::test]
async fn test_drivers_check_environment_before_network() {
    let server = start_mock_server(|req| match req.rpc_method().as_deref() {
        Some("eth_chainId") => rpc_result(req, json!("0x14a34")),
        Some("eth_getBalance") => rpc_result(req, json!("0x0")),
        _ => rpc_error(req, -32601, "method not found"),
    })
    .await;
    let ctx = context(&server);

    std::env::remove_var("SPONSOR_API_KEY");
    std::env::set_var("PRIVATE_KEY", "");

    // Blank key counts as unset: a fresh owner is generated.
    assert!(owner_or_random().unwrap().is_ephemeral());

    for driver in [
        "sponsored",
        "estimate",
        "safe-sponsored",
        "kernel-sponsored",
        "custom-sponsored",
        "bundler",
    ] {
        let err = run(&ctx, &["smartwallet", driver]).await.unwrap_err();
        assert!(
            matches!(err, CommandError::MissingEnv("SPONSOR_API_KEY")),
            "{}: {}",
            driver,
            err
        );
    }

    for driver in ["erc20", "native", "get-weth"] {
        let err = run(&ctx, &["smartwallet", driver]).await.unwrap_err();
        assert!(
            matches!(err, CommandError::MissingEnv("PRIVATE_KEY")),
            "{}: {}",
            driver,
            err
        );
    }

    assert!(server.requests().is_empty());

    // An empty account is refused before anything is broadcast.
    std::env::set_var("PRIVATE_KEY", OWNER_KEY);
    let err = run(
        &ctx,
        &["smartwallet", "get-weth", "--chain-id", "84532", "--amount", "0.1"],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CommandError::InsufficientFunds { .. }));
    assert!(err.to_string().starts_with("insufficient funds: need 0.1"));
    assert_eq!(server.rpc_calls("eth_getBalance").len(), 1);
    assert!(server.rpc_calls("eth_sendRawTransaction").is_empty());
}
