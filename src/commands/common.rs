//! Plumbing shared by the drivers: environment, chain selection, clients,
//! console reporting.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{hex, U256};

use crate::blockchain::contracts::increment_calldata;
use crate::blockchain::{ChainClient, Wallet};
use crate::chains::{ChainConfig, ChainRegistry};
use crate::commands::CommandError;
use crate::config::AppConfig;
use crate::smartwallet::{
    AccountKind, Call, ExecuteResponse, FeeQuote, SmartWalletClient, TaskEvent, TaskHandle,
};

/// Environment variable holding the sponsor API key.
pub const SPONSOR_API_KEY_ENV_VAR: &str = "SPONSOR_API_KEY";

/// Read a required environment variable. Empty values count as unset.
pub fn require_env(name: &'static str) -> Result<String, CommandError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CommandError::MissingEnv(name)),
    }
}

/// Read `SPONSOR_API_KEY`.
pub fn sponsor_api_key() -> Result<String, CommandError> {
    require_env(SPONSOR_API_KEY_ENV_VAR)
}

/// Owner key from `PRIVATE_KEY`, failing when it is unset.
pub fn required_owner() -> Result<Wallet, CommandError> {
    let key = require_env(crate::blockchain::wallet::PRIVATE_KEY_ENV_VAR)?;
    Ok(Wallet::from_private_key(&key)?)
}

/// Owner key from `PRIVATE_KEY`, or a fresh one when it is unset.
pub fn owner_or_random() -> Result<Wallet, CommandError> {
    let wallet = Wallet::from_env_or_random()?;
    if wallet.is_ephemeral() {
        println!("PRIVATE_KEY not set, using generated owner {}", wallet.address());
    }
    Ok(wallet)
}

/// Loaded configuration plus the chain registry built from it.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub registry: ChainRegistry,
}

impl Context {
    pub fn new(config: AppConfig) -> Result<Self, CommandError> {
        let registry = ChainRegistry::with_overrides(config.chains.clone())?;
        Ok(Self { config, registry })
    }

    /// Chain by registry key.
    pub fn chain(&self, key: &str) -> Result<&ChainConfig, CommandError> {
        Ok(self.registry.by_name(key)?)
    }

    /// RPC client for a chain.
    pub async fn chain_client(&self, chain: &ChainConfig) -> Result<ChainClient, CommandError> {
        Ok(ChainClient::new(chain, &self.config.rpc).await?)
    }

    /// Relay client for `account` owned by `owner` on `chain`.
    pub async fn smart_wallet(
        &self,
        chain: &ChainConfig,
        owner: Wallet,
        account: AccountKind,
        api_key: Option<&str>,
    ) -> Result<SmartWalletClient, CommandError> {
        let client = self.chain_client(chain).await?;
        Ok(SmartWalletClient::new(
            client,
            owner,
            account,
            self.config.relay.clone(),
            api_key,
        )?)
    }
}

/// `increment()` on the chain's counter contract.
pub fn increment_call(chain: &ChainConfig) -> Result<Call, CommandError> {
    let target = chain.target_contract.ok_or_else(|| CommandError::MissingContract {
        chain: chain.key.clone(),
        what: "target contract",
    })?;
    let data = increment_calldata();
    println!("Encoded increment() function data: {}", hex::encode_prefixed(&data));
    Ok(Call::new(target, data))
}

/// Print the submission banner.
pub fn report_submitted(response: &ExecuteResponse) {
    println!("Your task id is: {}", response.id);
    println!(
        "Check the status of your request here: {}",
        response.handle.status_url()
    );
    println!("Waiting for transaction to be confirmed...");
}

/// Block on the task and print the explorer link.
pub async fn wait_for_task(handle: &TaskHandle, chain: &ChainConfig) -> Result<(), CommandError> {
    let tx_hash = handle.wait().await?;
    println!("Transaction hash: {}", tx_hash);
    println!("Transaction successful: {}", chain.tx_url(&tx_hash));
    Ok(())
}

/// Follow task events until success or failure.
pub async fn watch_task(handle: &TaskHandle, chain: &ChainConfig) -> Result<(), CommandError> {
    let mut events = handle.watch();

    while let Some(event) = events.recv().await {
        match event {
            TaskEvent::Pending(status) => {
                tracing::debug!(task_id = %status.task_id, state = %status.task_state, "Task pending");
            }
            TaskEvent::Success(status) => {
                match status.transaction_hash {
                    Some(hash) => println!("Transaction successful: {}", chain.tx_url(&hash)),
                    None => println!("Transaction successful (task {})", status.task_id),
                }
                return Ok(());
            }
            TaskEvent::Error(message) => {
                eprintln!("Transaction failed: {}", message);
                return Err(CommandError::TaskFailed(message));
            }
        }
    }

    Err(CommandError::TaskFailed(format!(
        "status stream for task {} ended early",
        handle.id()
    )))
}

/// Human readable fee, in ETH for native/sponsored quotes.
pub fn format_fee(fee: &FeeQuote) -> String {
    match fee.token {
        Some(token) => format!("{} (token {})", fee.estimated_fee, token),
        None => format!("{} ETH", format_ether(fee.estimated_fee)),
    }
}

/// Parse a decimal ETH amount into wei.
pub fn parse_eth(amount: &str) -> Result<U256, CommandError> {
    alloy::primitives::utils::parse_ether(amount)
        .map_err(|_| CommandError::InvalidAmount(amount.to_string()))
}
