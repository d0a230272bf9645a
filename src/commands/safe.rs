use clap::Args;

use crate::commands::common::{
    increment_call, owner_or_random, report_submitted, sponsor_api_key, watch_task, Context,
};
use crate::commands::CommandError;
use crate::smartwallet::account::DEFAULT_SAFE_VERSION;
use crate::smartwallet::{AccountKind, Payment};

/// Sponsored call from a counterfactual Safe.
#[derive(Args, Debug)]
pub struct SafeArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "inkSepolia")]
    chain: String,

    /// Safe contracts version
    #[arg(long, default_value = DEFAULT_SAFE_VERSION)]
    version: String,
}

impl SafeArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let api_key = sponsor_api_key()?;
        let chain = ctx.chain(&self.chain)?;
        let call = increment_call(chain)?;

        let owner = owner_or_random()?;
        let account = AccountKind::Safe {
            version: self.version.clone(),
        };
        let swc = ctx.smart_wallet(chain, owner, account, Some(&api_key)).await?;

        let response = swc.execute(&Payment::sponsored(), &[call]).await?;
        println!("Account address: {}", response.sender);
        report_submitted(&response);
        watch_task(&response.handle, chain).await
    }
}
