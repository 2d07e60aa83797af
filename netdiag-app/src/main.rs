//! `netdiag` binary: serves the diagnostic catalogue as an MCP stdio
//! server, or runs a single remote device command from the command line.

mod config;
mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::info;

use config::Config;
use netdiag_tools::session::{self, DeviceProfile};
use netdiag_tools::tools::register_defaults;
use netdiag_tools::{OsFamily, ToolDispatcher, ToolRegistry};
use server::McpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the MCP protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("serve") => serve().await,
        Some("ssh") => run_ssh_command(&args[2..]).await,
        Some(other) => {
            eprintln!("Unknown command: {other}");
            eprintln!("Usage: netdiag [serve]");
            eprintln!("       netdiag ssh --device-type <type> --ip <addr> --username <user> --password <pass> --command <cmd>");
            std::process::exit(2);
        }
    }
}

async fn serve() -> Result<()> {
    let cfg = Config::from_env();
    let os = OsFamily::detect();

    let mut registry = ToolRegistry::new();
    register_defaults(&mut registry, os, Duration::from_millis(cfg.ssh_timeout_ms));
    let registry = Arc::new(registry);

    info!(tools = registry.count(), "serving MCP on stdio");

    let dispatcher = ToolDispatcher::new(registry.clone(), cfg.tool_timeout_ms);
    let server = McpServer::new(registry, dispatcher);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.run(stdin, tokio::io::stdout()).await
}

/// Standalone remote-command runner, the CLI twin of the `use_ssh` tool.
async fn run_ssh_command(args: &[String]) -> Result<()> {
    let mut device_type = None;
    let mut ip = None;
    let mut username = None;
    let mut password = None;
    let mut command = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let slot = match flag.as_str() {
            "--device-type" => &mut device_type,
            "--ip" => &mut ip,
            "--username" => &mut username,
            "--password" => &mut password,
            "--command" => &mut command,
            other => bail!("Unknown flag: {other}"),
        };
        match iter.next() {
            Some(value) => *slot = Some(value.clone()),
            None => bail!("Missing value for {flag}"),
        }
    }

    let (Some(device_type), Some(ip), Some(username), Some(password), Some(command)) =
        (device_type, ip, username, password, command)
    else {
        bail!(
            "ssh requires --device-type, --ip, --username, --password and --command"
        );
    };

    let cfg = Config::from_env();
    let profile = DeviceProfile {
        device_type,
        host: ip,
        username,
        password,
        connect_timeout: Duration::from_millis(cfg.ssh_timeout_ms),
    };

    let outcome = session::run_remote_command(profile, command).await;
    println!("{}", outcome.into_text());
    Ok(())
}
