//! Capability tools — one implementation per catalogue entry.

pub mod base;
pub mod interfaces;
pub mod nmap;
pub mod ping;
pub mod remote_exec;
pub mod sniffer;
pub mod traceroute;

pub use base::{ExecutionContext, Tool, ToolResult};
pub use interfaces::ListInterfacesTool;
pub use nmap::NmapScanTool;
pub use ping::PingTool;
pub use remote_exec::UseSshTool;
pub use sniffer::PacketSnifferTool;
pub use traceroute::TracerouteTool;

use std::sync::Arc;
use std::time::Duration;

use crate::platform::OsFamily;
use crate::registry::ToolRegistry;

/// Register the full diagnostic catalogue.
pub fn register_defaults(
    registry: &mut ToolRegistry,
    os: OsFamily,
    ssh_connect_timeout: Duration,
) {
    registry
        .register(Arc::new(PingTool::new(os)))
        .register(Arc::new(TracerouteTool::new(os)))
        .register(Arc::new(NmapScanTool::new(os)))
        .register(Arc::new(ListInterfacesTool::new(os)))
        .register(Arc::new(PacketSnifferTool::new(os)))
        .register(Arc::new(UseSshTool::new(ssh_connect_timeout)));
}
