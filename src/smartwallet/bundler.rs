//! ERC-4337 style adapter over the relay.
//!
//! Exposes the user-operation vocabulary (gas price tiers, send, wait for
//! receipt) for callers used to bundler clients, while submission still goes
//! through `SmartWalletClient`.

use alloy::eips::eip1559::Eip1559Estimation;
use alloy::rpc::types::TransactionReceipt;

use crate::blockchain::{wait_for_receipt, ConfirmationStatus};
use crate::smartwallet::account::WalletEncoding;
use crate::smartwallet::client::SmartWalletClient;
use crate::smartwallet::payment::Payment;
use crate::smartwallet::types::{Call, SmartWalletError, SmartWalletResult};

/// EIP-1559 fee pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPrice {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

impl GasPrice {
    fn scaled(estimate: &Eip1559Estimation, percent: u128) -> Self {
        Self {
            max_fee_per_gas: estimate.max_fee_per_gas.saturating_mul(percent) / 100,
            max_priority_fee_per_gas: estimate.max_priority_fee_per_gas.saturating_mul(percent) / 100,
        }
    }
}

/// Gas price tiers for a user operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserOperationGasPrice {
    pub slow: GasPrice,
    pub standard: GasPrice,
    pub fast: GasPrice,
}

impl From<Eip1559Estimation> for UserOperationGasPrice {
    fn from(estimate: Eip1559Estimation) -> Self {
        Self {
            slow: GasPrice::scaled(&estimate, 100),
            standard: GasPrice::scaled(&estimate, 110),
            fast: GasPrice::scaled(&estimate, 120),
        }
    }
}

/// Receipt of a completed user operation.
#[derive(Debug, Clone)]
pub struct UserOperationReceipt {
    pub task_id: String,
    pub receipt: TransactionReceipt,
}

/// Bundler-style client with a fixed payment and encoding.
#[derive(Debug, Clone)]
pub struct BundlerClient {
    wallet: SmartWalletClient,
    payment: Payment,
    encoding: WalletEncoding,
}

impl BundlerClient {
    pub fn new(wallet: SmartWalletClient, payment: Payment, encoding: WalletEncoding) -> Self {
        if encoding != wallet.account().encoding() {
            tracing::warn!(
                account = wallet.account().label(),
                encoding = ?encoding,
                "Encoding differs from the account's default"
            );
        }
        Self {
            wallet,
            payment,
            encoding,
        }
    }

    pub fn wallet(&self) -> &SmartWalletClient {
        &self.wallet
    }

    /// Current gas price tiers from the chain's fee history.
    pub async fn get_user_operation_gas_price(&self) -> SmartWalletResult<UserOperationGasPrice> {
        let estimate = self.wallet.chain().estimate_eip1559_fees().await?;
        Ok(estimate.into())
    }

    /// Submit `calls` and return the relay task id.
    pub async fn send_user_operation(&self, calls: &[Call]) -> SmartWalletResult<String> {
        let response = self
            .wallet
            .execute_with_encoding(&self.payment, calls, self.encoding)
            .await?;
        Ok(response.id)
    }

    /// Wait for the task, then for the on-chain receipt of its transaction.
    pub async fn wait_for_user_operation_receipt(
        &self,
        task_id: &str,
    ) -> SmartWalletResult<UserOperationReceipt> {
        let tx_hash = self.wallet.task(task_id).wait().await?;

        let chain = self.wallet.chain();
        let timeout_secs = chain.rpc_config().receipt_timeout_secs;
        let (status, receipt) = wait_for_receipt(chain, tx_hash, timeout_secs).await?;

        if let ConfirmationStatus::Failed(reason) = status {
            return Err(SmartWalletError::Blockchain(
                crate::blockchain::BlockchainError::Reverted(format!("{}: {}", tx_hash, reason)),
            ));
        }

        Ok(UserOperationReceipt {
            task_id: task_id.to_string(),
            receipt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_price_tiers() {
        let estimate = Eip1559Estimation {
            max_fee_per_gas: 1_000,
            max_priority_fee_per_gas: 100,
        };
        let tiers = UserOperationGasPrice::from(estimate);
        assert_eq!(tiers.slow.max_fee_per_gas, 1_000);
        assert_eq!(tiers.standard.max_fee_per_gas, 1_100);
        assert_eq!(tiers.fast.max_fee_per_gas, 1_200);
        assert_eq!(tiers.fast.max_priority_fee_per_gas, 120);
    }

    #[test]
    fn test_gas_price_saturates() {
        let estimate = Eip1559Estimation {
            max_fee_per_gas: u128::MAX,
            max_priority_fee_per_gas: 0,
        };
        let tiers = UserOperationGasPrice::from(estimate);
        assert_eq!(tiers.fast.max_fee_per_gas, u128::MAX / 100);
        assert_eq!(tiers.fast.max_priority_fee_per_gas, 0);
    }
}
