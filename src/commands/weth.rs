use alloy::primitives::utils::format_ether;
use alloy::network::TransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use clap::Args;

use crate::blockchain::contracts::{balance_of_calldata, decode_balance, deposit_calldata};
use crate::blockchain::{ConfirmationStatus, TxSender};
use crate::commands::common::{parse_eth, required_owner, Context};
use crate::commands::CommandError;

/// Wrap native ETH into WETH from the owner EOA.
#[derive(Args, Debug)]
pub struct GetWethArgs {
    /// Chain id of the target chain
    #[arg(long, default_value_t = 421614)]
    chain_id: u64,

    /// Amount of ETH to wrap
    #[arg(long, default_value = "0.1")]
    amount: String,
}

impl GetWethArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let owner = required_owner()?;
        let value = parse_eth(&self.amount)?;

        let chain = ctx
            .registry
            .by_chain_id(self.chain_id)
            .ok_or(CommandError::UnknownChainId(self.chain_id))?;
        let weth = chain.tokens.weth.ok_or_else(|| CommandError::MissingContract {
            chain: chain.key.clone(),
            what: "WETH contract",
        })?;

        let client = ctx.chain_client(chain).await?;
        let balance = client.get_balance(owner.address()).await?;
        println!("ETH Balance: {} ETH", format_ether(balance));
        if balance < value {
            return Err(CommandError::InsufficientFunds {
                needed: format_ether(value),
                available: format_ether(balance),
            });
        }

        println!("Converting {} ETH to WETH...", self.amount);
        let sender = TxSender::new(client.clone(), owner.clone());
        let tx_hash = sender.send(weth, value, deposit_calldata()).await?;
        println!("Transaction hash: {}", tx_hash);
        println!("View transaction: {}", chain.tx_url(&tx_hash));

        println!("Waiting for transaction to be finalized...");
        let (status, _receipt) = sender
            .wait_for_confirmation(tx_hash, ctx.config.rpc.receipt_timeout_secs)
            .await?;
        if let ConfirmationStatus::Failed(reason) = status {
            return Err(CommandError::TaskFailed(reason));
        }
        println!("Transaction finalized!");

        let call = TransactionRequest::default()
            .with_to(weth)
            .with_input(balance_of_calldata(owner.address()));
        let balance = decode_balance(&client.call(call).await?)?;
        println!("WETH Balance: {} wei ({} WETH)", balance, format_ether(balance));
        println!("Success! Transaction hash: {}", tx_hash);
        Ok(())
    }
}
