//! Relay request/response types and error definitions.

use alloy::eips::eip7702::SignedAuthorization;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::smartwallet::account::{AccountKind, WalletEncoding};
use crate::smartwallet::payment::Payment;

/// Errors returned by the relay client.
#[derive(Debug, Error)]
pub enum SmartWalletError {
    /// HTTP transport failed (connect, timeout, body decode).
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay answered with a non-success HTTP status.
    #[error("relay returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Relay answered with a JSON-RPC error object.
    #[error("relay error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Relay answered with something we cannot use.
    #[error("invalid relay response: {0}")]
    InvalidResponse(String),

    /// Sponsored payment requested without an API key.
    #[error("sponsored payment requires an API key")]
    MissingApiKey,

    /// Task reached a failed terminal state.
    #[error("task {id} ended in {state}: {message}")]
    TaskFailed {
        id: String,
        state: TaskState,
        message: String,
    },

    /// Task did not finish before the deadline.
    #[error("task {id} not finished after {secs} seconds")]
    TaskTimeout { id: String, secs: u64 },

    /// Chain access failed (code lookup, nonce, receipts).
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Result type for relay operations.
pub type SmartWalletResult<T> = Result<T, SmartWalletError>;

/// One call executed by the smart account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl Call {
    /// Call with zero value.
    pub fn new(to: Address, data: Bytes) -> Self {
        Self {
            to,
            data,
            value: U256::ZERO,
        }
    }
}

/// Fee quoted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    /// Fee in the payment token's smallest unit (wei for native).
    pub estimated_fee: U256,
    /// ERC-20 token the fee is charged in; `None` for native or sponsored.
    #[serde(default)]
    pub token: Option<Address>,
}

/// Result of an estimate-only request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub fee: FeeQuote,
    pub gas: U256,
}

/// Params of `wallet_prepareCalls`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareCallsRequest<'a> {
    pub chain_id: u64,
    /// Owner key of the account.
    pub from: Address,
    pub account: &'a AccountKind,
    pub encoding: WalletEncoding,
    pub payment: &'a Payment,
    pub calls: &'a [Call],
}

/// Result of `wallet_prepareCalls`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedCalls {
    /// Opaque state echoed back on send.
    pub context: serde_json::Value,
    /// Digest the owner must sign.
    pub digest: B256,
    /// Smart account address executing the calls.
    pub sender: Address,
    /// EIP-7702 delegation target the owner must authorize, if any.
    #[serde(default)]
    pub delegation: Option<Address>,
    pub fee: FeeQuote,
    pub gas: U256,
}

/// Params of `wallet_sendPreparedCalls`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPreparedCallsRequest<'a> {
    pub chain_id: u64,
    pub context: &'a serde_json::Value,
    pub signature: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<SignedAuthorization>,
}

/// Result of `wallet_sendPreparedCalls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendPreparedCallsResponse {
    /// Relay task id.
    pub id: String,
}

/// Relay task lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    CheckPending,
    ExecPending,
    WaitingForConfirmation,
    ExecSuccess,
    ExecReverted,
    Cancelled,
    NotFound,
}

impl TaskState {
    /// No further transitions happen from this state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::ExecSuccess | TaskState::ExecReverted | TaskState::Cancelled
        )
    }

    pub fn is_success(self) -> bool {
        self == TaskState::ExecSuccess
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskState::CheckPending => "CheckPending",
            TaskState::ExecPending => "ExecPending",
            TaskState::WaitingForConfirmation => "WaitingForConfirmation",
            TaskState::ExecSuccess => "ExecSuccess",
            TaskState::ExecReverted => "ExecReverted",
            TaskState::Cancelled => "Cancelled",
            TaskState::NotFound => "NotFound",
        };
        f.write_str(s)
    }
}

/// Task status as reported by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    #[serde(default)]
    pub chain_id: u64,
    pub task_id: String,
    pub task_state: TaskState,
    #[serde(default)]
    pub transaction_hash: Option<TxHash>,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub last_check_message: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
}

impl TaskStatus {
    /// Placeholder for a task the relay does not know yet.
    pub fn not_found(task_id: &str) -> Self {
        Self {
            chain_id: 0,
            task_id: task_id.to_string(),
            task_state: TaskState::NotFound,
            transaction_hash: None,
            block_number: None,
            last_check_message: None,
            creation_date: None,
        }
    }
}

/// Envelope of the task status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusResponse {
    pub task: TaskStatus,
}

/// Progress notification from a watched task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// Task moved to a new non-terminal state.
    Pending(TaskStatus),
    /// Task executed successfully.
    Success(TaskStatus),
    /// Task failed, was cancelled, or could not be tracked.
    Error(String),
}
