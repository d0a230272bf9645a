use clap::Args;

use crate::commands::common::{
    increment_call, owner_or_random, report_submitted, sponsor_api_key, watch_task, Context,
};
use crate::commands::CommandError;
use crate::smartwallet::{AccountKind, Payment};

/// Sponsored call from a Kernel account.
#[derive(Args, Debug)]
pub struct KernelArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "baseSepolia")]
    chain: String,

    /// Delegate the owner EOA via EIP-7702 instead of deploying a Kernel
    #[arg(long)]
    eip7702: bool,
}

impl KernelArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let api_key = sponsor_api_key()?;
        let chain = ctx.chain(&self.chain)?;
        let call = increment_call(chain)?;

        let owner = owner_or_random()?;
        let swc = ctx
            .smart_wallet(chain, owner, AccountKind::kernel(self.eip7702), Some(&api_key))
            .await?;

        let response = swc.execute(&Payment::sponsored(), &[call]).await?;
        println!("Account address: {}", response.sender);
        report_submitted(&response);
        watch_task(&response.handle, chain).await
    }
}
