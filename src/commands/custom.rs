use alloy::primitives::Address;
use clap::Args;

use crate::commands::common::{
    increment_call, owner_or_random, report_submitted, sponsor_api_key, watch_task, Context,
};
use crate::commands::CommandError;
use crate::smartwallet::account::CUSTOM_DELEGATION_ADDRESS;
use crate::smartwallet::{AccountKind, Payment};

/// Sponsored call from an EIP-7702 account delegated to a chosen contract
/// (ERC-4337 entry point v0.8, ERC-7821 encoding).
#[derive(Args, Debug)]
pub struct CustomArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "inkSepolia")]
    chain: String,

    /// Delegation contract
    #[arg(long, default_value_t = CUSTOM_DELEGATION_ADDRESS)]
    delegation: Address,
}

impl CustomArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let api_key = sponsor_api_key()?;
        let chain = ctx.chain(&self.chain)?;
        let call = increment_call(chain)?;

        let owner = owner_or_random()?;
        println!("Account address: {}", owner.address());
        let swc = ctx
            .smart_wallet(chain, owner, AccountKind::custom(self.delegation), Some(&api_key))
            .await?;

        let response = swc.execute(&Payment::sponsored(), &[call]).await?;
        report_submitted(&response);
        watch_task(&response.handle, chain).await
    }
}
