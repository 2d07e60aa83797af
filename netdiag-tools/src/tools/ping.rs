use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::ToolError;
use crate::invocation::{self, Capability};
use crate::platform::OsFamily;
use crate::process;
use crate::tools::base::{ExecutionContext, Tool, ToolResult};

/// Sends a single echo request and returns the tool's full output,
/// success or not.
pub struct PingTool {
    os: OsFamily,
}

impl PingTool {
    pub fn new(os: OsFamily) -> Self {
        Self { os }
    }
}

#[async_trait]
impl Tool for PingTool {
    fn name(&self) -> &'static str {
        Capability::Ping.name()
    }

    fn description(&self) -> &'static str {
        "Ping the specified IP address once and return the full command output"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "ip_address": {
                    "type": "string",
                    "description": "The target IP address or hostname to ping"
                }
            },
            "required": ["ip_address"]
        })
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let argv = invocation::build(self.os, Capability::Ping, &input)?;
        let outcome = process::run(&argv, Duration::from_millis(ctx.timeout_ms)).await;
        Ok(ToolResult::from_outcome(outcome))
    }
}
