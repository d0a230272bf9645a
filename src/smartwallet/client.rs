//! Smart-wallet client: prepare, sign and submit call batches through the relay.
//!
//! # Flow
//! ```text
//! calls + payment
//!     → wallet_prepareCalls (relay returns digest, sender, fee quote)
//!     → owner signs digest (+ EIP-7702 authorization when needed)
//!     → wallet_sendPreparedCalls (relay returns task id)
//!     → TaskHandle (status polling)
//! ```

use alloy::eips::eip7702::SignedAuthorization;
use alloy::primitives::Address;
use std::sync::Arc;

use crate::blockchain::{ChainClient, Wallet};
use crate::config::RelayConfig;
use crate::smartwallet::account::{is_delegated_to, AccountKind, WalletEncoding};
use crate::smartwallet::payment::Payment;
use crate::smartwallet::rpc::RelayTransport;
use crate::smartwallet::task::TaskHandle;
use crate::smartwallet::types::{
    Call, Estimate, PrepareCallsRequest, PreparedCalls, SendPreparedCallsRequest,
    SendPreparedCallsResponse, SmartWalletError, SmartWalletResult,
};

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct ExecuteResponse {
    /// Relay task id.
    pub id: String,
    /// Smart account that executes the calls.
    pub sender: Address,
    /// Tracks the task to completion.
    pub handle: TaskHandle,
}

/// Client bound to one chain, one owner key and one account flavour.
#[derive(Debug, Clone)]
pub struct SmartWalletClient {
    chain: ChainClient,
    owner: Wallet,
    account: AccountKind,
    relay: RelayConfig,
    transport: Arc<RelayTransport>,
}

impl SmartWalletClient {
    /// Create a client. `api_key` is required for sponsored payments only.
    pub fn new(
        chain: ChainClient,
        owner: Wallet,
        account: AccountKind,
        relay: RelayConfig,
        api_key: Option<&str>,
    ) -> SmartWalletResult<Self> {
        let transport = Arc::new(RelayTransport::new(&relay, api_key)?);

        tracing::info!(
            chain = %chain.chain().key,
            owner = %owner.address(),
            account = account.label(),
            sponsored = api_key.is_some(),
            "Smart wallet client created"
        );

        Ok(Self {
            chain,
            owner,
            account,
            relay,
            transport,
        })
    }

    pub fn chain(&self) -> &ChainClient {
        &self.chain
    }

    pub fn account(&self) -> &AccountKind {
        &self.account
    }

    /// Owner EOA address.
    pub fn owner(&self) -> Address {
        self.owner.address()
    }

    /// Handle for a task submitted earlier.
    pub fn task(&self, id: impl Into<String>) -> TaskHandle {
        TaskHandle::new(id.into(), self.transport.clone(), &self.relay)
    }

    /// Ask the relay to prepare `calls` with the account's own encoding.
    pub async fn prepare(&self, payment: &Payment, calls: &[Call]) -> SmartWalletResult<PreparedCalls> {
        self.prepare_with_encoding(payment, calls, self.account.encoding())
            .await
    }

    /// Ask the relay to prepare `calls` with an explicit encoding.
    pub async fn prepare_with_encoding(
        &self,
        payment: &Payment,
        calls: &[Call],
        encoding: WalletEncoding,
    ) -> SmartWalletResult<PreparedCalls> {
        if payment.is_sponsored() && !self.transport.has_api_key() {
            return Err(SmartWalletError::MissingApiKey);
        }
        if calls.is_empty() {
            return Err(SmartWalletError::InvalidResponse(
                "refusing to prepare an empty call batch".to_string(),
            ));
        }

        let request = PrepareCallsRequest {
            chain_id: self.chain.chain().chain_id,
            from: self.owner.address(),
            account: &self.account,
            encoding,
            payment,
            calls,
        };
        let prepared: PreparedCalls = self.transport.request("wallet_prepareCalls", request).await?;

        if self.account.uses_eip7702() && prepared.sender != self.owner.address() {
            return Err(SmartWalletError::InvalidResponse(format!(
                "EIP-7702 account must execute from the owner {}, relay returned {}",
                self.owner.address(),
                prepared.sender
            )));
        }

        tracing::debug!(
            sender = %prepared.sender,
            fee = %prepared.fee.estimated_fee,
            gas = %prepared.gas,
            "Calls prepared"
        );
        Ok(prepared)
    }

    /// Fee and gas the relay would charge, without submitting.
    pub async fn estimate(&self, payment: &Payment, calls: &[Call]) -> SmartWalletResult<Estimate> {
        let prepared = self.prepare(payment, calls).await?;
        Ok(Estimate {
            fee: prepared.fee,
            gas: prepared.gas,
        })
    }

    /// Prepare, sign and submit `calls`.
    pub async fn execute(&self, payment: &Payment, calls: &[Call]) -> SmartWalletResult<ExecuteResponse> {
        self.execute_with_encoding(payment, calls, self.account.encoding())
            .await
    }

    /// Prepare, sign and submit `calls` with an explicit encoding.
    pub async fn execute_with_encoding(
        &self,
        payment: &Payment,
        calls: &[Call],
        encoding: WalletEncoding,
    ) -> SmartWalletResult<ExecuteResponse> {
        let prepared = self.prepare_with_encoding(payment, calls, encoding).await?;

        let signature = self.owner.sign_hash(prepared.digest).await?;
        let authorization = self.authorization_for(&prepared).await?;

        let request = SendPreparedCallsRequest {
            chain_id: self.chain.chain().chain_id,
            context: &prepared.context,
            signature: signature.as_bytes().to_vec().into(),
            authorization,
        };
        let response: SendPreparedCallsResponse = self
            .transport
            .request("wallet_sendPreparedCalls", request)
            .await?;

        tracing::info!(
            task_id = %response.id,
            sender = %prepared.sender,
            payment = %payment,
            "Calls submitted"
        );

        Ok(ExecuteResponse {
            handle: self.task(response.id.clone()),
            id: response.id,
            sender: prepared.sender,
        })
    }

    /// EIP-7702 authorization to attach, if the owner still needs one.
    async fn authorization_for(
        &self,
        prepared: &PreparedCalls,
    ) -> SmartWalletResult<Option<SignedAuthorization>> {
        if !self.account.uses_eip7702() {
            return Ok(None);
        }
        let Some(delegate) = prepared.delegation.or(self.account.delegation()) else {
            return Ok(None);
        };

        let owner = self.owner.address();
        let code = self.chain.get_code(owner).await?;
        if is_delegated_to(&code, delegate) {
            tracing::debug!(owner = %owner, delegate = %delegate, "Owner already delegated");
            return Ok(None);
        }

        let nonce = self.chain.get_transaction_count(owner).await?;
        let signed = self
            .owner
            .sign_authorization(self.chain.chain().chain_id, delegate, nonce)
            .await?;
        Ok(Some(signed))
    }
}
