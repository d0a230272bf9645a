//! Shared utilities for integration testing: a raw-TCP mock HTTP server
//! that plays both the relay and the chain RPC node.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use smartwallet_examples::chains::{get_chain_config_by_name, ChainConfig};
use smartwallet_examples::config::RelayConfig;

/// One request received by the mock server.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    /// Raw header block, lowercased.
    pub headers: String,
    pub body: String,
}

impl MockRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// JSON-RPC method name, if the body is a JSON-RPC request.
    pub fn rpc_method(&self) -> Option<String> {
        self.json()["method"].as_str().map(str::to_string)
    }

    pub fn has_header(&self, name: &str, value: &str) -> bool {
        self.headers
            .lines()
            .any(|line| line.trim() == format!("{}: {}", name, value).to_lowercase())
    }
}

type Handler = Arc<dyn Fn(&MockRequest) -> (u16, String) + Send + Sync>;

/// Running mock server plus everything it has received.
#[derive(Clone)]
pub struct MockServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

#[allow(dead_code)]
impl MockServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Received JSON-RPC requests calling `method`.
    pub fn rpc_calls(&self, method: &str) -> Vec<MockRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.rpc_method().as_deref() == Some(method))
            .collect()
    }

    /// Relay config pointing at this server, with fast polling.
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            rpc_url: self.url("/relay"),
            status_url: self.url(""),
            request_timeout_secs: 5,
            poll_interval_ms: 10,
            max_poll_interval_ms: 20,
            task_timeout_secs: 5,
        }
    }

    /// `baseSepolia` with its RPC pointed at this server.
    pub fn chain(&self) -> ChainConfig {
        let mut chain = get_chain_config_by_name("baseSepolia").unwrap().clone();
        chain.rpc_url = self.url("/chain");
        chain.failover_urls.clear();
        chain
    }
}

/// Start a programmable mock server on an ephemeral port.
pub async fn start_mock_server<F>(handler: F) -> MockServer
where
    F: Fn(&MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler: Handler = Arc::new(handler);
    let requests = Arc::new(Mutex::new(Vec::new()));

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        serve(socket, handler, recorded).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockServer { addr, requests }
}

async fn serve(mut socket: TcpStream, handler: Handler, recorded: Arc<Mutex<Vec<MockRequest>>>) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    recorded.lock().unwrap().push(request.clone());

    let (status, body) = handler(&request);
    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers = lines.collect::<Vec<_>>().join("\n").to_lowercase();

    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(MockRequest {
        method,
        path,
        headers,
        body,
    })
}

/// JSON-RPC success envelope echoing the request id.
pub fn rpc_result(request: &MockRequest, result: Value) -> (u16, String) {
    let id = request.json()["id"].clone();
    (
        200,
        json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string(),
    )
}

/// JSON-RPC error envelope echoing the request id.
#[allow(dead_code)]
pub fn rpc_error(request: &MockRequest, code: i64, message: &str) -> (u16, String) {
    let id = request.json()["id"].clone();
    (
        200,
        json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
            .to_string(),
    )
}

/// Transaction receipt as a node returns it, included in block 0x10.
#[allow(dead_code)]
pub fn receipt_json(tx_hash: &str, success: bool) -> Value {
    json!({
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0xb411",
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "33".repeat(32)),
        "blockNumber": "0x10",
        "gasUsed": "0xb411",
        "effectiveGasPrice": "0x3b9aca00",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x4200000000000000000000000000000000000006",
        "contractAddress": null
    })
}

/// Task status body in the relay's `{"task": {...}}` envelope.
#[allow(dead_code)]
pub fn task_body(task_id: &str, state: &str, tx_hash: Option<&str>) -> (u16, String) {
    let mut task = json!({
        "chainId": 84532,
        "taskId": task_id,
        "taskState": state,
    });
    if let Some(hash) = tx_hash {
        task["transactionHash"] = json!(hash);
        task["blockNumber"] = json!(12345);
    }
    (200, json!({ "task": task }).to_string())
}
