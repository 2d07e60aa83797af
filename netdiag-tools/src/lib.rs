//! Uniform invocation layer for a fixed catalogue of network-diagnostic
//! operations: reachability checks, path tracing, port scanning,
//! interface enumeration, packet capture, and remote device commands over
//! a managed SSH session. Every call returns normalized text; every
//! failure mode collapses into one classified, human-readable form.

pub mod dispatcher;
pub mod error;
pub mod invocation;
pub mod outcome;
pub mod platform;
pub mod process;
pub mod registry;
pub mod session;
pub mod tools;

pub use dispatcher::ToolDispatcher;
pub use error::ToolError;
pub use invocation::Capability;
pub use outcome::{ExecOutcome, FailureKind, FAILURE_MARKER};
pub use platform::OsFamily;
pub use registry::ToolRegistry;
pub use tools::{ExecutionContext, Tool, ToolResult};
