//! JSON-RPC and REST transport to the relay.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::RelayConfig;
use crate::smartwallet::types::{
    SmartWalletError, SmartWalletResult, TaskStatus, TaskStatusResponse,
};

/// Header carrying the sponsor API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: [P; 1],
}

#[derive(Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// HTTP client for the relay's JSON-RPC and task status endpoints.
#[derive(Debug)]
pub struct RelayTransport {
    http: reqwest::Client,
    rpc_url: String,
    status_url: String,
    has_api_key: bool,
    next_id: AtomicU64,
}

impl RelayTransport {
    /// Build the HTTP client. The API key, when given, is sent on every
    /// request.
    pub fn new(config: &RelayConfig, api_key: Option<&str>) -> SmartWalletResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key).map_err(|_| {
                SmartWalletError::InvalidResponse("API key is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            status_url: config.status_url.trim_end_matches('/').to_string(),
            has_api_key: api_key.is_some(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// Call a JSON-RPC method with a single params object.
    pub async fn request<P, R>(&self, method: &str, params: P) -> SmartWalletResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: [params],
        };

        tracing::debug!(method = method, id = id, "Relay request");

        let res = self.http.post(&self.rpc_url).json(&body).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SmartWalletError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: JsonRpcResponse<R> = res.json().await?;
        if let Some(err) = response.error {
            return Err(SmartWalletError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        response.result.ok_or_else(|| {
            SmartWalletError::InvalidResponse(format!("{} returned neither result nor error", method))
        })
    }

    /// Human-facing status link for a task.
    pub fn task_status_url(&self, task_id: &str) -> String {
        format!("{}/tasks/status/{}", self.status_url, task_id)
    }

    /// Fetch the current status of a task. A 404 means the relay has not
    /// indexed the task yet.
    pub async fn task_status(&self, task_id: &str) -> SmartWalletResult<TaskStatus> {
        let res = self.http.get(self.task_status_url(task_id)).send().await?;
        let status = res.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(TaskStatus::not_found(task_id));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SmartWalletError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: TaskStatusResponse = res.json().await?;
        Ok(response.task)
    }
}
