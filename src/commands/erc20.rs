use alloy::primitives::{Address, Bytes};
use clap::Args;

use crate::commands::common::{
    increment_call, report_submitted, required_owner, watch_task, Context,
};
use crate::commands::CommandError;
use crate::smartwallet::{AccountKind, Call, Payment};

/// Call paid in an ERC-20 token from an EIP-7702 smart account.
#[derive(Args, Debug)]
pub struct Erc20Args {
    /// Registry key of the target chain
    #[arg(long, default_value = "baseSepolia")]
    chain: String,

    /// Fee token (defaults to the chain's USDC, then WETH)
    #[arg(long)]
    token: Option<Address>,

    /// Call target (defaults to the chain's counter contract)
    #[arg(long, requires = "data")]
    to: Option<Address>,

    /// Hex calldata for --to
    #[arg(long, requires = "to")]
    data: Option<Bytes>,
}

impl Erc20Args {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let owner = required_owner()?;
        let chain = ctx.chain(&self.chain)?;

        let token = self
            .token
            .or_else(|| chain.payment_token())
            .ok_or_else(|| CommandError::MissingContract {
                chain: chain.key.clone(),
                what: "payment token",
            })?;

        let call = match (self.to, &self.data) {
            (Some(to), Some(data)) => Call::new(to, data.clone()),
            _ => increment_call(chain)?,
        };

        let swc = ctx
            .smart_wallet(chain, owner, AccountKind::gelato(), None)
            .await?;

        let response = swc.execute(&Payment::erc20(token), &[call]).await?;
        report_submitted(&response);
        watch_task(&response.handle, chain).await
    }
}
