use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::ToolError;
use crate::invocation::{self, Capability};
use crate::platform::OsFamily;
use crate::process;
use crate::tools::base::{ExecutionContext, Tool, ToolResult};

/// Lists capture interfaces via `tshark -D`. Takes no parameters.
pub struct ListInterfacesTool {
    os: OsFamily,
}

impl ListInterfacesTool {
    pub fn new(os: OsFamily) -> Self {
        Self { os }
    }
}

#[async_trait]
impl Tool for ListInterfacesTool {
    fn name(&self) -> &'static str {
        Capability::ListInterfaces.name()
    }

    fn description(&self) -> &'static str {
        "List all available network interfaces with their indexes and descriptions"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        ctx: ExecutionContext,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let argv = invocation::build(self.os, Capability::ListInterfaces, &input)?;
        let outcome = process::run(&argv, Duration::from_millis(ctx.timeout_ms)).await;
        Ok(ToolResult::from_outcome(outcome))
    }
}
