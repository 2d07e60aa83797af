use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::ToolError;
use crate::invocation::{self, Capability};
use crate::platform::OsFamily;
use crate::process;
use crate::tools::base::{ExecutionContext, Tool, ToolResult};

pub struct TracerouteTool {
    os: OsFamily,
}

impl TracerouteTool {
    pub fn new(os: OsFamily) -> Self {
        Self { os }
    }
}

#[async_trait]
impl Tool for TracerouteTool {
    fn name(&self) -> &'static str {
        Capability::Traceroute.name()
    }

    fn description(&self) -> &'static str {
        "Trace the network path to the specified IP address and return the result"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "ip_address": {
                    "type": "string",
                    "description": "The target IP address or hostname to trace"
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
        let argv = invocation::build(self.os, Capability::Traceroute, &input)?;
        let outcome = process::run(&argv, Duration::from_millis(ctx.timeout_ms)).await;
        Ok(ToolResult::from_outcome(outcome))
    }
}
