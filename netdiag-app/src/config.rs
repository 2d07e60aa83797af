//! Runtime settings, taken from the environment. The invocation layer
//! itself has no configuration file format.

const DEFAULT_TOOL_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_SSH_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Deadline for one local tool invocation.
    pub tool_timeout_ms: u64,
    /// Deadline for SSH connection setup and per-operation socket reads.
    pub ssh_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            tool_timeout_ms: env_ms("NETDIAG_TIMEOUT_MS", DEFAULT_TOOL_TIMEOUT_MS),
            ssh_timeout_ms: env_ms("NETDIAG_SSH_TIMEOUT_MS", DEFAULT_SSH_TIMEOUT_MS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_timeout_ms: DEFAULT_TOOL_TIMEOUT_MS,
            ssh_timeout_ms: DEFAULT_SSH_TIMEOUT_MS,
        }
    }
}

fn env_ms(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.tool_timeout_ms, 30_000);
        assert_eq!(cfg.ssh_timeout_ms, 15_000);
    }
}
