//! How the relay gets paid for executing calls.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Fee payment mode.
///
/// Sponsored payments are authorized by the API key the client was built
/// with; the key never appears in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Payment {
    /// A third party (the API key owner) pays.
    Sponsored,
    /// The smart account pays in an ERC-20 token.
    Erc20 { token: Address },
    /// The smart account pays in the native currency.
    Native,
}

impl Payment {
    pub fn sponsored() -> Self {
        Payment::Sponsored
    }

    pub fn erc20(token: Address) -> Self {
        Payment::Erc20 { token }
    }

    pub fn native() -> Self {
        Payment::Native
    }

    pub fn is_sponsored(&self) -> bool {
        matches!(self, Payment::Sponsored)
    }
}

impl std::fmt::Display for Payment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payment::Sponsored => write!(f, "sponsored"),
            Payment::Erc20 { token } => write!(f, "erc20({})", token),
            Payment::Native => write!(f, "native"),
        }
    }
}
