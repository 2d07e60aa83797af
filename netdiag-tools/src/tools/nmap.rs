use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::ToolError;
use crate::invocation::{self, Capability, DEFAULT_NMAP_ARGS};
use crate::platform::OsFamily;
use crate::process;
use crate::tools::base::{ExecutionContext, Tool, ToolResult};

/// Flexible nmap scan. The option string is tokenized with shell quoting
/// rules and spliced into the argument vector; it never reaches a shell.
pub struct NmapScanTool {
    os: OsFamily,
}

impl NmapScanTool {
    pub fn new(os: OsFamily) -> Self {
        Self { os }
    }
}

#[async_trait]
impl Tool for NmapScanTool {
    fn name(&self) -> &'static str {
        Capability::NmapScan.name()
    }

    fn description(&self) -> &'static str {
        "Perform an nmap scan of a target with optional custom arguments"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "target": {
                    "type": "string",
                    "description": "IP address or subnet to scan"
                },
                "custom_args": {
                    "type": "string",
                    "description": format!(
                        "Optional nmap arguments (e.g. '-T4 -sV'); defaults to '{DEFAULT_NMAP_ARGS}' when empty"
                    )
                }
            },
            "required": ["target"]
        })
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let argv = invocation::build(self.os, Capability::NmapScan, &input)?;
        let outcome = process::run(&argv, Duration::from_millis(ctx.timeout_ms)).await;
        Ok(ToolResult::from_outcome(outcome))
    }
}
