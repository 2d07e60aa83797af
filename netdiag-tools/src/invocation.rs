//! The capability catalogue and the invocation builder.
//!
//! `build` turns a capability plus a JSON parameter map into the literal
//! argument vector for one child process. The vector is consumed by the
//! process executor as-is; no element is ever re-interpreted by a shell.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::platform::OsFamily;

/// Default nmap options substituted when the caller supplies none.
pub const DEFAULT_NMAP_ARGS: &str = "-T4";

/// The fixed set of diagnostic operations this layer can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Ping,
    Traceroute,
    NmapScan,
    ListInterfaces,
    PacketSniffer,
    RemoteCommand,
}

impl Capability {
    /// The wire name the capability is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Capability::Ping => "ping_ip",
            Capability::Traceroute => "traceroute_ip",
            Capability::NmapScan => "nmap_scan",
            Capability::ListInterfaces => "list_interfaces",
            Capability::PacketSniffer => "packet_sniffer",
            Capability::RemoteCommand => "use_ssh",
        }
    }

    /// Whether the capability runs over a device session instead of a
    /// local child process.
    pub fn is_remote(self) -> bool {
        matches!(self, Capability::RemoteCommand)
    }
}

#[derive(Debug, Deserialize)]
struct PingParams {
    ip_address: String,
}

#[derive(Debug, Deserialize)]
struct TracerouteParams {
    ip_address: String,
}

#[derive(Debug, Deserialize)]
struct NmapParams {
    target: String,
    #[serde(default)]
    custom_args: String,
}

#[derive(Debug, Deserialize)]
struct SnifferParams {
    #[serde(default = "default_interface")]
    interface: u32,
    #[serde(default = "default_packet_count")]
    packet_count: u32,
    #[serde(default)]
    filter_expr: String,
}

fn default_interface() -> u32 {
    7
}

fn default_packet_count() -> u32 {
    10
}

/// Build the argument vector for a local capability.
///
/// Idempotent: identical inputs always yield an identical vector.
/// Missing or malformed parameters are rejected with a validation error
/// before anything is executed.
pub fn build(os: OsFamily, capability: Capability, params: &Value) -> Result<Vec<String>, ToolError> {
    match capability {
        Capability::Ping => {
            let p: PingParams = parse(params)?;
            Ok(vec![
                "ping".to_string(),
                os.ping_count_flag().to_string(),
                "1".to_string(),
                p.ip_address,
            ])
        }
        Capability::Traceroute => {
            let p: TracerouteParams = parse(params)?;
            Ok(vec![os.traceroute_program().to_string(), p.ip_address])
        }
        Capability::NmapScan => {
            let p: NmapParams = parse(params)?;
            let custom = p.custom_args.trim();
            let custom = if custom.is_empty() {
                DEFAULT_NMAP_ARGS
            } else {
                custom
            };
            let mut argv = vec!["nmap".to_string()];
            argv.extend(split_options(custom)?);
            argv.push(p.target);
            Ok(argv)
        }
        Capability::ListInterfaces => Ok(vec!["tshark".to_string(), "-D".to_string()]),
        Capability::PacketSniffer => {
            let p: SnifferParams = parse(params)?;
            let mut argv = vec![
                "tshark".to_string(),
                "-i".to_string(),
                p.interface.to_string(),
                "-c".to_string(),
                p.packet_count.to_string(),
            ];
            // The display filter is one argument to -Y, appended only when
            // the caller actually supplied an expression.
            if !p.filter_expr.is_empty() {
                argv.push("-Y".to_string());
                argv.push(p.filter_expr);
            }
            Ok(argv)
        }
        Capability::RemoteCommand => Err(ToolError::Validation(format!(
            "{} runs over a device session, not a local command",
            Capability::RemoteCommand.name()
        ))),
    }
}

/// Tokenize a free-form option string with shell-style quoting rules.
///
/// Splitting is the only shell behavior applied; the tokens go straight
/// into the argument vector, so embedded metacharacters have no effect
/// beyond quoting and word boundaries.
pub fn split_options(raw: &str) -> Result<Vec<String>, ToolError> {
    shlex::split(raw)
        .ok_or_else(|| ToolError::Validation("Unbalanced quoting in option string".to_string()))
}

fn parse<T: DeserializeOwned>(params: &Value) -> Result<T, ToolError> {
    serde_json::from_value(params.clone()).map_err(|e| ToolError::Validation(e.to_string()))
}
