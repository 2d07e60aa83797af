use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::ToolError;
use crate::invocation::{self, Capability};
use crate::platform::OsFamily;
use crate::process;
use crate::tools::base::{ExecutionContext, Tool, ToolResult};

/// Captures a bounded number of packets on one interface with an optional
/// display filter.
pub struct PacketSnifferTool {
    os: OsFamily,
}

impl PacketSnifferTool {
    pub fn new(os: OsFamily) -> Self {
        Self { os }
    }
}

#[async_trait]
impl Tool for PacketSnifferTool {
    fn name(&self) -> &'static str {
        Capability::PacketSniffer.name()
    }

    fn description(&self) -> &'static str {
        "Capture packets on a network interface using tshark display filters"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "interface": {
                    "type": "integer",
                    "description": "The interface number to capture on",
                    "default": 7
                },
                "packet_count": {
                    "type": "integer",
                    "description": "Number of packets to capture",
                    "default": 10
                },
                "filter_expr": {
                    "type": "string",
                    "description": "Optional display filter (e.g. 'dns', 'http', 'icmp')"
                }
            }
        })
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let argv = invocation::build(self.os, Capability::PacketSniffer, &input)?;
        let outcome = process::run(&argv, Duration::from_millis(ctx.timeout_ms)).await;
        Ok(ToolResult::from_outcome(outcome))
    }
}
