use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::ToolError;
use crate::invocation::Capability;
use crate::session::{self, DeviceProfile, SUPPORTED_DEVICE_TYPES};
use crate::tools::base::{ExecutionContext, Tool, ToolResult};

#[derive(Debug, Deserialize)]
struct UseSshInput {
    device_type: String,
    ip: String,
    username: String,
    password: String,
    command: String,
}

/// Runs one command on a remote network device over an SSH session.
///
/// The session is opened, used for exactly that command, and released
/// before the call returns, whatever happened in between.
pub struct UseSshTool {
    connect_timeout: Duration,
}

impl UseSshTool {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Tool for UseSshTool {
    fn name(&self) -> &'static str {
        Capability::RemoteCommand.name()
    }

    fn description(&self) -> &'static str {
        "Execute a command on a remote network device over SSH"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "device_type": {
                    "type": "string",
                    "description": format!("Device family, one of: {}", SUPPORTED_DEVICE_TYPES.join(", "))
                },
                "ip": {
                    "type": "string",
                    "description": "IP address of the network device"
                },
                "username": {
                    "type": "string",
                    "description": "SSH username"
                },
                "password": {
                    "type": "string",
                    "description": "SSH password"
                },
                "command": {
                    "type": "string",
                    "description": "The command to run on the device"
                }
            },
            "required": ["device_type", "ip", "username", "password", "command"]
        })
    }

    async fn execute(
        &self,
        _ctx: ExecutionContext,
        input: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let input: UseSshInput =
            serde_json::from_value(input).map_err(|e| ToolError::Validation(e.to_string()))?;

        let profile = DeviceProfile {
            device_type: input.device_type,
            host: input.ip,
            username: input.username,
            password: input.password,
            connect_timeout: self.connect_timeout,
        };

        let outcome = session::run_remote_command(profile, input.command).await;
        Ok(ToolResult::from_outcome(outcome))
    }
}
