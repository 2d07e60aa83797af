//! Remote device sessions: open, authenticate, execute one command, release.
//!
//! The lifecycle is a single-shot `Closed -> Opening -> Open -> Closed`
//! cycle driven by [`run_session`]. The transport behind it is a trait so
//! the close-on-every-exit-path contract can be verified without a live
//! device; production uses [`SshTransport`] over libssh2.

use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::outcome::{ExecOutcome, FailureKind};

/// Device families the session manager knows how to drive.
pub const SUPPORTED_DEVICE_TYPES: &[&str] = &[
    "cisco_ios",
    "cisco_xe",
    "cisco_nxos",
    "arista_eos",
    "juniper",
    "juniper_junos",
    "linux",
];

const SSH_PORT: u16 = 22;

/// Everything needed to open one authenticated session.
///
/// Credentials live only as long as the call that carries them and are
/// never logged.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    pub device_type: String,
    pub host: String,
    pub username: String,
    pub password: String,
    /// Bound on connection setup and per-operation socket reads.
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Authentication(String),
}

impl SessionError {
    pub fn into_outcome(self) -> ExecOutcome {
        match self {
            SessionError::Transport(text) => ExecOutcome::failure(FailureKind::Transport, text),
            SessionError::Authentication(text) => {
                ExecOutcome::failure(FailureKind::Authentication, text)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
}

/// One transient authenticated connection to a remote device.
pub trait DeviceTransport: Send {
    /// Authenticate and set up the transport. On failure the transport
    /// must be back in the closed state before the error is returned.
    fn open(&mut self) -> Result<(), SessionError>;

    /// Issue exactly one command and collect its output. The command's
    /// syntax is not validated; any failure mid-command is reported as a
    /// session error, never a panic.
    fn send(&mut self, command: &str) -> Result<String, SessionError>;

    /// Release the session. Must be safe to call in any state.
    fn close(&mut self);
}

/// Drive one open-send-close cycle.
///
/// `close` is invoked exactly once before this function returns, no
/// matter how the open or send steps went. Sessions are never pooled or
/// reused across calls.
pub fn run_session<T: DeviceTransport>(transport: &mut T, command: &str) -> ExecOutcome {
    let outcome = match transport.open() {
        Err(err) => err.into_outcome(),
        Ok(()) => match transport.send(command) {
            Ok(text) => ExecOutcome::Success(text),
            Err(err) => err.into_outcome(),
        },
    };
    transport.close();
    outcome
}

/// Open a session to `profile`, run `command`, and tear the session down,
/// from a blocking worker so the async caller is never stalled.
pub async fn run_remote_command(profile: DeviceProfile, command: String) -> ExecOutcome {
    let host = profile.host.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut transport = SshTransport::new(profile);
        run_session(&mut transport, &command)
    })
    .await;

    match result {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(%host, "session worker failed: {err}");
            ExecOutcome::failure(
                FailureKind::Transport,
                format!("session to {host} aborted: {err}"),
            )
        }
    }
}

/// Production transport over libssh2 with password authentication.
pub struct SshTransport {
    profile: DeviceProfile,
    state: SessionState,
    session: Option<ssh2::Session>,
}

impl SshTransport {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            state: SessionState::Closed,
            session: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn connect(&self) -> Result<ssh2::Session, SessionError> {
        let profile = &self.profile;

        if !SUPPORTED_DEVICE_TYPES.contains(&profile.device_type.as_str()) {
            return Err(SessionError::Transport(format!(
                "unsupported device type '{}' for {}",
                profile.device_type, profile.host
            )));
        }

        let addr = (profile.host.as_str(), SSH_PORT)
            .to_socket_addrs()
            .map_err(|err| {
                SessionError::Transport(format!("failed to resolve {}: {err}", profile.host))
            })?
            .next()
            .ok_or_else(|| {
                SessionError::Transport(format!("no address resolved for {}", profile.host))
            })?;

        let tcp = TcpStream::connect_timeout(&addr, profile.connect_timeout).map_err(|err| {
            SessionError::Transport(format!("failed to connect to {}: {err}", profile.host))
        })?;
        tcp.set_read_timeout(Some(profile.connect_timeout)).ok();
        tcp.set_write_timeout(Some(profile.connect_timeout)).ok();

        let mut session = ssh2::Session::new().map_err(|err| {
            SessionError::Transport(format!("failed to create session for {}: {err}", profile.host))
        })?;
        session.set_tcp_stream(tcp);
        session.handshake().map_err(|err| {
            SessionError::Transport(format!("handshake with {} failed: {err}", profile.host))
        })?;

        session
            .userauth_password(&profile.username, &profile.password)
            .map_err(|err| {
                SessionError::Authentication(format!(
                    "{} rejected credentials for '{}': {err}",
                    profile.host, profile.username
                ))
            })?;
        if !session.authenticated() {
            return Err(SessionError::Authentication(format!(
                "{} rejected credentials for '{}'",
                profile.host, profile.username
            )));
        }

        Ok(session)
    }
}

impl DeviceTransport for SshTransport {
    fn open(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Opening;
        match self.connect() {
            Ok(session) => {
                debug!(host = %self.profile.host, device_type = %self.profile.device_type, "session open");
                self.session = Some(session);
                self.state = SessionState::Open;
                Ok(())
            }
            Err(err) => {
                self.session = None;
                self.state = SessionState::Closed;
                Err(err)
            }
        }
    }

    fn send(&mut self, command: &str) -> Result<String, SessionError> {
        let host = &self.profile.host;
        let session = self.session.as_ref().ok_or_else(|| {
            SessionError::Transport(format!("session to {host} is not open"))
        })?;

        let mut channel = session.channel_session().map_err(|err| {
            SessionError::Transport(format!("failed to open channel on {host}: {err}"))
        })?;
        channel.exec(command).map_err(|err| {
            SessionError::Transport(format!("failed to run command on {host}: {err}"))
        })?;

        let mut output = String::new();
        channel.read_to_string(&mut output).map_err(|err| {
            SessionError::Transport(format!("connection to {host} dropped mid-command: {err}"))
        })?;
        let mut errors = String::new();
        if channel.stderr().read_to_string(&mut errors).is_ok() && !errors.is_empty() {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&errors);
        }

        // Command exit status is intentionally not inspected: the output of
        // a failing device command is the result the caller asked for.
        let _ = channel.wait_close();
        Ok(output)
    }

    fn close(&mut self) {
        if let Some(session) = self.session.take() {
            let _ = session.disconnect(None, "session released", None);
            debug!(host = %self.profile.host, "session closed");
        }
        self.state = SessionState::Closed;
    }
}

// Backstop only; run_session already closes on every path.
impl Drop for SshTransport {
    fn drop(&mut self) {
        self.close();
    }
}
