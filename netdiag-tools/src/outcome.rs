//! Execution outcomes and their rendering into caller-facing text.
//!
//! Every diagnostic run ends up as an [`ExecOutcome`]: either the captured
//! output of a successful invocation, or a classified failure whose
//! descriptive text is preserved. [`ExecOutcome::into_text`] is the last
//! step before the caller sees anything; it never fails and always yields
//! a string, with failures marked by a leading `[!]`.

/// Marker prepended to every normalized failure string.
pub const FAILURE_MARKER: &str = "[!]";

/// Why an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The tool ran and reported failure; its output is preserved.
    NonZeroExit,
    /// The executable could not be located on the search path.
    BinaryNotFound,
    /// A remote session could not be established or dropped mid-command.
    Transport,
    /// The remote device rejected the supplied credentials.
    Authentication,
}

/// The result of one invocation, local or remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    Success(String),
    Failure { kind: FailureKind, text: String },
}

impl ExecOutcome {
    pub fn failure(kind: FailureKind, text: impl Into<String>) -> Self {
        ExecOutcome::Failure {
            kind,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecOutcome::Success(_))
    }

    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ExecOutcome::Success(_) => None,
            ExecOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Normalize the outcome into the single string handed back to callers.
    ///
    /// Success text passes through unchanged. Failures are rendered with the
    /// `[!]` marker and a classification-appropriate message; the underlying
    /// cause text is kept verbatim so diagnosis never needs a stack trace.
    pub fn into_text(self) -> String {
        match self {
            ExecOutcome::Success(text) => text,
            ExecOutcome::Failure { kind, text } => match kind {
                FailureKind::NonZeroExit => format!("{FAILURE_MARKER} {text}"),
                FailureKind::BinaryNotFound => format!("{FAILURE_MARKER} {text}"),
                FailureKind::Transport => {
                    format!("{FAILURE_MARKER} Failed to run command: {text}")
                }
                FailureKind::Authentication => {
                    format!("{FAILURE_MARKER} Authentication failed: {text}")
                }
            },
        }
    }
}
