use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::outcome::ExecOutcome;

/// Per-call execution settings handed to a tool by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext {
    pub timeout_ms: u64,
}

impl ExecutionContext {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }
}

/// What every capability hands back: one string, already normalized.
///
/// Failures are distinguished from successes by the `success` flag and,
/// inside the text itself, only by the leading `[!]` marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub text: String,
}

impl ToolResult {
    pub fn from_outcome(outcome: ExecOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            text: outcome.into_text(),
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> serde_json::Value;

    async fn execute(
        &self,
        ctx: ExecutionContext,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError>;
}
