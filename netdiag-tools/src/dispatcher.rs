use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::tools::{ExecutionContext, ToolResult};

/// Headroom over the per-call timeout so the executing tool gets to
/// report its own timeout as normalized text before the dispatcher
/// gives up on it.
const DISPATCH_GRACE_MS: u64 = 500;

const MAX_INPUT_BYTES: usize = 1_000_000;

/// Routes one invocation to its tool, bounded in time and isolated from
/// panics. Holds no per-call state; concurrent dispatches are independent.
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    timeout_ms: u64,
}

impl ToolDispatcher {
    pub fn new(registry: Arc<ToolRegistry>, timeout_ms: u64) -> Self {
        Self {
            registry,
            timeout_ms,
        }
    }

    pub async fn dispatch(
        &self,
        tool_name: &str,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        info!(tool = %tool_name, "dispatching tool call");

        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;

        if let Ok(serialized) = serde_json::to_string(&input) {
            if serialized.len() > MAX_INPUT_BYTES {
                return Err(ToolError::Validation("Input too large".to_string()));
            }
        }

        let ctx = ExecutionContext::new(self.timeout_ms);

        // Run in a spawned task so a panicking tool cannot take the
        // dispatcher down with it.
        let handle = tokio::spawn(async move { tool.execute(ctx, input).await });

        match timeout(
            Duration::from_millis(self.timeout_ms + DISPATCH_GRACE_MS),
            handle,
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                if join_err.is_panic() {
                    error!(tool = %tool_name, "tool execution panicked");
                } else {
                    error!(tool = %tool_name, "tool execution cancelled");
                }
                Err(ToolError::Internal)
            }
            Err(_) => {
                warn!(tool = %tool_name, timeout_ms = self.timeout_ms, "tool call timed out");
                Err(ToolError::Timeout)
            }
        }
    }
}
