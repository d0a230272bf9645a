use clap::{Args, ValueEnum};

use crate::commands::common::{increment_call, owner_or_random, sponsor_api_key, Context};
use crate::commands::CommandError;
use crate::smartwallet::{AccountKind, BundlerClient, Payment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BundlerAccount {
    /// Kernel delegated via EIP-7702, ERC-7579 encoding
    Kernel,
    /// Safe 1.4.1, Safe encoding
    Safe,
}

/// Sponsored user operation through the bundler-style adapter.
#[derive(Args, Debug)]
pub struct BundlerArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "baseSepolia")]
    chain: String,

    /// Smart account flavour
    #[arg(long, value_enum, default_value_t = BundlerAccount::Kernel)]
    account: BundlerAccount,
}

impl BundlerArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let api_key = sponsor_api_key()?;
        let chain = ctx.chain(&self.chain)?;
        let call = increment_call(chain)?;

        let account = match self.account {
            BundlerAccount::Kernel => AccountKind::kernel(true),
            BundlerAccount::Safe => AccountKind::safe(),
        };
        let encoding = account.encoding();

        let owner = owner_or_random()?;
        let swc = ctx.smart_wallet(chain, owner, account, Some(&api_key)).await?;
        let bundler = BundlerClient::new(swc, Payment::sponsored(), encoding);

        let gas_price = bundler.get_user_operation_gas_price().await?.fast;
        println!(
            "User operation gas price: maxFeePerGas={} maxPriorityFeePerGas={}",
            gas_price.max_fee_per_gas, gas_price.max_priority_fee_per_gas
        );

        let task_id = bundler.send_user_operation(&[call]).await?;
        println!("Your task id is: {}", task_id);
        println!("Waiting for transaction to be confirmed...");

        let receipt = bundler.wait_for_user_operation_receipt(&task_id).await?;
        println!(
            "Transaction successful: {}",
            chain.tx_url(&receipt.receipt.transaction_hash)
        );
        Ok(())
    }
}
