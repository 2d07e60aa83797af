//! MCP stdio server: JSON-RPC 2.0, one object per line on stdin/stdout.
//!
//! Routed methods: `initialize`, `tools/list`, `tools/call`.
//! Notifications (requests without an id) are acknowledged silently.
//! Exits cleanly on EOF.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use netdiag_tools::{ToolDispatcher, ToolError, ToolRegistry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    /// Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

// Standard JSON-RPC error codes.
const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

// Application-specific error codes.
const TOOL_NOT_FOUND: i64 = -32000;
const TOOL_TIMEOUT: i64 = -32001;
const TOOL_EXECUTION_ERROR: i64 = -32002;

pub struct McpServer {
    registry: Arc<ToolRegistry>,
    dispatcher: ToolDispatcher,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>, dispatcher: ToolDispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Serve until EOF on the reader.
    pub async fn run(
        self,
        stdin: impl AsyncBufRead + Unpin,
        mut stdout: impl AsyncWrite + Unpin,
    ) -> Result<()> {
        let mut lines = stdin.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(line) {
                Ok(req) => req,
                Err(_) => {
                    let response = error_response(Value::Null, PARSE_ERROR, "Parse error");
                    write_response(&mut stdout, &response).await?;
                    continue;
                }
            };

            // Notifications get no reply.
            let id = match request.id {
                Some(id) => id,
                None => continue,
            };

            let response = match request.method.as_str() {
                "initialize" => self.handle_initialize(id),
                "tools/list" => self.handle_tools_list(id),
                "tools/call" => self.handle_tools_call(id, request.params).await,
                other => error_response(
                    id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {other}"),
                ),
            };

            write_response(&mut stdout, &response).await?;
        }

        Ok(())
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        ok_response(
            id,
            serde_json::json!({
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "netdiag",
                    "version": env!("CARGO_PKG_VERSION"),
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        ok_response(id, serde_json::json!({ "tools": self.registry.schemas() }))
    }

    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => return error_response(id, INVALID_PARAMS, "Missing params for tools/call"),
        };

        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name.to_string(),
            None => {
                return error_response(id, INVALID_PARAMS, "Missing 'name' in tools/call params")
            }
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        match self.dispatcher.dispatch(&tool_name, arguments).await {
            Ok(result) => ok_response(
                id,
                serde_json::json!({
                    "content": [{
                        "type": "text",
                        "text": result.text,
                    }]
                }),
            ),
            Err(err) => {
                let code = match &err {
                    ToolError::NotFound(_) => TOOL_NOT_FOUND,
                    ToolError::Validation(_) => INVALID_PARAMS,
                    ToolError::Timeout => TOOL_TIMEOUT,
                    ToolError::Execution(_) => TOOL_EXECUTION_ERROR,
                    ToolError::Internal => INTERNAL_ERROR,
                };
                error_response(id, code, &err.to_string())
            }
        }
    }
}

fn ok_response(id: Value, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        result: Some(result),
        error: None,
        id,
    }
}

fn error_response(id: Value, code: i64, message: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
        id,
    }
}

async fn write_response(
    writer: &mut (impl AsyncWrite + Unpin),
    response: &JsonRpcResponse,
) -> Result<()> {
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
