//! Plain EOA transactions: signing, broadcast and confirmation monitoring.
//!
//! # Responsibilities
//! - Sign and broadcast transactions from the owner key
//! - Monitor confirmations with a deadline

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;

/// Sends transactions from the wallet's own address.
pub struct TxSender {
    client: ChainClient,
    wallet: Wallet,
}

impl TxSender {
    /// Create a new transaction sender.
    pub fn new(client: ChainClient, wallet: Wallet) -> Self {
        Self { client, wallet }
    }

    /// Sign and broadcast a transaction. Nonce, gas and fees are filled by
    /// the provider.
    ///
    /// # Arguments
    /// * `to` - Destination address
    /// * `value` - Amount of native token to send
    /// * `data` - Call data (empty for simple transfers)
    pub async fn send(&self, to: Address, value: U256, data: Bytes) -> BlockchainResult<TxHash> {
        let chain = self.client.chain();
        let url: url::Url = chain.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", chain.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(self.wallet.signer().clone()))
            .connect_http(url);

        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(value)
            .with_input(data)
            .with_chain_id(chain.chain_id);

        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| BlockchainError::Rpc(format!("Failed to send transaction: {}", e)))?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(tx_hash = %tx_hash, to = %to, value = %value, "Transaction broadcast");
        Ok(tx_hash)
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait for confirmation
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
    ) -> BlockchainResult<(ConfirmationStatus, TransactionReceipt)> {
        wait_for_receipt(&self.client, tx_hash, timeout_secs).await
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}

/// Poll for a receipt until it has the configured confirmation depth.
///
/// A reverted receipt is returned as `ConfirmationStatus::Failed`.
pub async fn wait_for_receipt(
    client: &ChainClient,
    tx_hash: TxHash,
    timeout_secs: u64,
) -> BlockchainResult<(ConfirmationStatus, TransactionReceipt)> {
    let required_confirmations = client.confirmation_blocks();
    let poll_interval = Duration::from_secs(2);

    let result = timeout(Duration::from_secs(timeout_secs), async {
        let mut ticker = interval(poll_interval);

        loop {
            ticker.tick().await;

            let receipt = match client.get_transaction_receipt(tx_hash).await? {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
            };

            if !receipt.status() {
                return Ok((
                    ConfirmationStatus::Failed("Transaction reverted".to_string()),
                    receipt,
                ));
            }

            let current_block = client.get_block_number().await?;
            let tx_block = receipt.block_number.unwrap_or(current_block);
            // The inclusion block counts as the first confirmation.
            let confirmations = u32::try_from(current_block.saturating_sub(tx_block))
                .unwrap_or(u32::MAX)
                .saturating_add(1);

            if confirmations >= required_confirmations {
                return Ok((
                    ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                    },
                    receipt,
                ));
            }

            tracing::debug!(
                tx_hash = %tx_hash,
                confirmations = confirmations,
                required = required_confirmations,
                "Waiting for confirmations"
            );
        }
    })
    .await;

    match result {
        Ok(status) => status,
        Err(_) => Err(BlockchainError::ConfirmationTimeout(timeout_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::get_chain_config_by_name;
    use crate::config::RpcConfig;

    #[tokio::test]
    async fn test_wait_times_out_on_dead_rpc() {
        let mut chain = get_chain_config_by_name("arbSepolia").unwrap().clone();
        chain.rpc_url = "http://127.0.0.1:1".to_string();
        let rpc = RpcConfig {
            timeout_secs: 1,
            ..RpcConfig::default()
        };
        let client = ChainClient::connect(&chain, &rpc).unwrap();

        // Either the RPC error or the deadline ends the wait; neither hangs.
        let result = wait_for_receipt(&client, TxHash::ZERO, 1).await;
        assert!(result.is_err());
    }
}
