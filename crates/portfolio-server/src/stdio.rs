//! Stdio JSON-RPC Transport
//!
//! One JSON-RPC 2.0 message per line in, one response per line out.
//!
//! ```text
//! stdin ─► parse ─► dispatch ─┬─ initialize / ping
//!                             ├─ tools/list ──► ToolRegistry::schemas
//!                             └─ tools/call ──► ToolRegistry::execute
//!                                                   │
//! stdout ◄───────────── response (requests with an id only)
//! ```
//!
//! Logs go to stderr; stdout carries nothing but protocol frames.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use agent_core::{AgentError, ToolCall, ToolRegistry, ToolResult};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "portfolio-server";

pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub method: String,

    #[serde(default)]
    pub params: Value,

    /// Absent (or null) for notifications
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,

    #[serde(default)]
    arguments: Option<HashMap<String, Value>>,
}

/// JSON-RPC front end over a tool registry
pub struct RpcServer {
    tools: Arc<ToolRegistry>,
    instructions: String,
}

impl RpcServer {
    pub fn new(tools: Arc<ToolRegistry>, instructions: impl Into<String>) -> Self {
        Self {
            tools,
            instructions: instructions.into(),
        }
    }

    /// Serve until the reader hits EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    tracing::warn!("Request is not valid UTF-8: {}", e);
                    Some(RpcResponse::err(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)))
                }
            };
            let Some(response) = response else {
                continue;
            };
            let mut frame = serde_json::to_vec(&response)?;
            frame.push(b'\n');
            writer.write_all(&frame).await?;
            writer.flush().await?;
        }
        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` when no reply is due
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        if line.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<RpcRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                tracing::warn!("Unparseable request: {}", e);
                Some(RpcResponse::err(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)))
            }
        }
    }

    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        tracing::debug!(method = %request.method, id = ?request.id, "rpc request");

        let Some(id) = request.id else {
            // notifications/initialized and friends
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => RpcResponse::ok(id, self.initialize()),
            "ping" => RpcResponse::ok(id, json!({})),
            "tools/list" => RpcResponse::ok(id, self.list_tools()),
            "tools/call" => match self.call_tool(request.params).await {
                Ok(result) => RpcResponse::ok(id, result),
                Err((code, message)) => RpcResponse::err(id, code, message),
            },
            other => RpcResponse::err(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
        };
        Some(response)
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": { "tools": {} },
            "instructions": self.instructions,
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .schemas()
            .iter()
            .map(|schema| {
                json!({
                    "name": schema.name,
                    "description": schema.description,
                    "inputSchema": schema.input_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (i64, String)> {
        let params: CallParams = serde_json::from_value(params)
            .map_err(|e| (INVALID_PARAMS, format!("Invalid params: {}", e)))?;

        let call = ToolCall {
            name: params.name,
            arguments: params.arguments.unwrap_or_default(),
            id: None,
        };

        match self.tools.execute(&call).await {
            Ok(result) => Ok(call_result(&result)),
            Err(e) => match rpc_error(&e) {
                Some(error) => {
                    tracing::warn!(tool = %call.name, "Rejected tool call: {}", e);
                    Err(error)
                }
                None => {
                    tracing::error!(tool = %call.name, "Tool error: {}", e);
                    Ok(failed_result(&e))
                }
            },
        }
    }
}

fn call_result(result: &ToolResult) -> Value {
    let mut value = json!({
        "content": [{ "type": "text", "text": result.output }],
        "isError": !result.success,
    });
    if let Some(data) = &result.data {
        value["structuredContent"] = data.clone();
    }
    value
}

/// Tool that ran and failed; reported in-band so the client sees the message
fn failed_result(err: &AgentError) -> Value {
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "isError": true,
    })
}

/// Protocol-level error for a bad request; `None` when the tool itself failed
fn rpc_error(err: &AgentError) -> Option<(i64, String)> {
    match err {
        AgentError::ToolNotFound(_) | AgentError::ToolValidation(_) | AgentError::Parse(_) => {
            Some((INVALID_PARAMS, err.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn server() -> RpcServer {
        RpcServer::new(fixtures::registry(), "be helpful")
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_handshake() {
        let responses = exchange(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        ))
        .await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "portfolio-server");
        assert_eq!(responses[0]["result"]["instructions"], "be helpful");
        assert_eq!(responses[1], json!({ "jsonrpc": "2.0", "id": 2, "result": {} }));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_serving() {
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}");

        let mut output = Vec::new();
        server().serve(&input[..], &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1], json!({ "jsonrpc": "2.0", "id": 2, "result": {} }));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let responses = exchange("{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"method\":\"tools/list\"}\n").await;
        let tools = responses[0]["result"]["tools"].as_array().unwrap();

        assert_eq!(tools.len(), 5);
        let lookup = tools.iter().find(|t| t["name"] == "get_holding_by_ticker").unwrap();
        assert_eq!(lookup["inputSchema"]["required"], json!(["ticker"]));
    }

    #[tokio::test]
    async fn test_tools_call() {
        let response = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"get_holding_by_ticker","arguments":{"ticker":"aapl"}}}"#,
            )
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["total_value"], 1800.0);

        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, result["structuredContent"]);
    }

    #[tokio::test]
    async fn test_not_found_is_not_an_error() {
        let response = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"get_holding_by_ticker","arguments":{"ticker":"IBM"}}}"#,
            )
            .await
            .unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(
            result["structuredContent"]["error"],
            "Holding with ticker 'IBM' not found"
        );
    }

    #[tokio::test]
    async fn test_error_codes() {
        let server = server();

        let parse = server.handle_line("{not json").await.unwrap();
        assert_eq!(parse.id, Value::Null);
        assert_eq!(parse.error.unwrap().code, PARSE_ERROR);

        let method = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(method.error.unwrap().code, METHOD_NOT_FOUND);

        let params = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"arguments":{}}}"#)
            .await
            .unwrap();
        assert_eq!(params.error.unwrap().code, INVALID_PARAMS);

        let unknown = server
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"sell_everything"}}"#)
            .await
            .unwrap();
        assert_eq!(unknown.error.unwrap().code, INVALID_PARAMS);

        assert!(rpc_error(&AgentError::ToolExecution("boom".into())).is_none());
    }

    #[tokio::test]
    async fn test_malformed_store_is_reported_in_the_result() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{\"holdings\": [").unwrap();

        let analytics = Arc::new(portfolio_advisor::PortfolioAnalytics::with_store(Arc::new(
            portfolio_advisor::JsonFileStore::new(file.path()),
        )));
        let mut tools = ToolRegistry::new();
        portfolio_advisor::register_portfolio_tools(&mut tools, analytics);

        let response = RpcServer::new(Arc::new(tools), "")
            .handle_line(r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"assess_risk"}}"#)
            .await
            .unwrap();
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result.get("structuredContent").is_none());

        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Tool execution error:"), "{}", text);
    }
}
