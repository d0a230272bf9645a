use alloy::primitives::Address;
use clap::{Args, ValueEnum};

use crate::commands::common::{
    format_fee, increment_call, owner_or_random, sponsor_api_key, Context,
};
use crate::commands::CommandError;
use crate::smartwallet::{AccountKind, Payment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentMode {
    Sponsored,
    Native,
    Erc20,
}

/// Quote fee and gas for a call without submitting it.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Registry key of the target chain
    #[arg(long, default_value = "inkSepolia")]
    chain: String,

    /// How the fee would be paid
    #[arg(long, value_enum, default_value_t = PaymentMode::Sponsored)]
    payment: PaymentMode,

    /// Fee token for --payment erc20 (defaults to the chain's USDC, then WETH)
    #[arg(long)]
    token: Option<Address>,
}

impl EstimateArgs {
    pub async fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let api_key = match self.payment {
            PaymentMode::Sponsored => Some(sponsor_api_key()?),
            _ => None,
        };
        let chain = ctx.chain(&self.chain)?;

        let payment = match self.payment {
            PaymentMode::Sponsored => Payment::sponsored(),
            PaymentMode::Native => Payment::native(),
            PaymentMode::Erc20 => {
                let token = self.token.or_else(|| chain.payment_token()).ok_or_else(|| {
                    CommandError::MissingContract {
                        chain: chain.key.clone(),
                        what: "payment token",
                    }
                })?;
                Payment::erc20(token)
            }
        };

        let call = increment_call(chain)?;
        let owner = owner_or_random()?;
        let swc = ctx
            .smart_wallet(chain, owner, AccountKind::gelato(), api_key.as_deref())
            .await?;

        let estimate = swc.estimate(&payment, &[call]).await?;
        println!("Estimated fee: {}", format_fee(&estimate.fee));
        println!("Estimated gas: {} GAS", estimate.gas);
        Ok(())
    }
}
