use clap::Args;

use crate::commands::common::{increment_call, report_submitted, required_owner, watch_task, Context};
use crate::commands::CommandError;
use crate::smartwallet::{AccountKind, Payment};

/// Call paid in the native currency from an EIP-7702 smart account.
#[derive(Args, Debug)]
pub struct NativeArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "inkSepolia")]
    chain: String,
}

impl NativeArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let owner = required_owner()?;
        let chain = ctx.chain(&self.chain)?;
        let call = increment_call(chain)?;

        let swc = ctx
            .smart_wallet(chain, owner, AccountKind::gelato(), None)
            .await?;

        let response = swc.execute(&Payment::native(), &[call]).await?;
        report_submitted(&response);
        watch_task(&response.handle, chain).await
    }
}
