//! Contract ABIs used by the drivers.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    /// Minimal counter used as the call target in every example.
    interface ICounter {
        function increment() external;
    }
}

sol! {
    /// Wrapped native token.
    interface IWETH {
        function deposit() external payable;
        function withdraw(uint256 amount) external;
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Calldata for `increment()`.
pub fn increment_calldata() -> Bytes {
    ICounter::incrementCall {}.abi_encode().into()
}

/// Calldata for `deposit()`.
pub fn deposit_calldata() -> Bytes {
    IWETH::depositCall {}.abi_encode().into()
}

/// Calldata for `withdraw(amount)`.
pub fn withdraw_calldata(amount: U256) -> Bytes {
    IWETH::withdrawCall { amount }.abi_encode().into()
}

/// Calldata for `balanceOf(owner)`.
pub fn balance_of_calldata(owner: Address) -> Bytes {
    IWETH::balanceOfCall { owner }.abi_encode().into()
}

/// Decode the return data of `balanceOf`.
pub fn decode_balance(data: &[u8]) -> BlockchainResult<U256> {
    IWETH::balanceOfCall::abi_decode_returns(data)
        .map_err(|e| BlockchainError::Contract(format!("balanceOf returned bad data: {}", e)))
}
