use alloy::primitives::{Address, Bytes};
use clap::Args;

use crate::commands::common::{
    increment_call, owner_or_random, report_submitted, sponsor_api_key, wait_for_task, Context,
};
use crate::commands::CommandError;
use crate::smartwallet::{AccountKind, Call, Payment};

/// Sponsored call from an EIP-7702 smart account.
#[derive(Args, Debug)]
pub struct SponsoredArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "baseSepolia")]
    chain: String,

    /// Call target (defaults to the chain's counter contract)
    #[arg(long, requires = "data")]
    to: Option<Address>,

    /// Hex calldata for --to
    #[arg(long, requires = "to")]
    data: Option<Bytes>,
}

impl SponsoredArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let api_key = sponsor_api_key()?;
        let chain = ctx.chain(&self.chain)?;

        let call = match (self.to, &self.data) {
            (Some(to), Some(data)) => Call::new(to, data.clone()),
            _ => increment_call(chain)?,
        };

        let owner = owner_or_random()?;
        let swc = ctx
            .smart_wallet(chain, owner, AccountKind::gelato(), Some(&api_key))
            .await?;

        let response = swc.execute(&Payment::sponsored(), &[call]).await?;
        report_submitted(&response);
        wait_for_task(&response.handle, chain).await
    }
}
