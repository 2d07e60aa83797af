//! OS-family detection for platform-sensitive command forms.

/// The two command-line dialects the diagnostic tools care about.
///
/// Detected once at startup and passed down explicitly so everything
/// built on top stays a pure function of its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Posix,
}

impl OsFamily {
    /// Read the host OS. Anything that is not Windows is treated as POSIX.
    pub fn detect() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }

    /// The ping flag that limits the number of echo requests.
    pub fn ping_count_flag(self) -> &'static str {
        match self {
            OsFamily::Windows => "-n",
            OsFamily::Posix => "-c",
        }
    }

    /// The path-trace executable name.
    pub fn traceroute_program(self) -> &'static str {
        match self {
            OsFamily::Windows => "tracert",
            OsFamily::Posix => "traceroute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_command_forms() {
        assert_eq!(OsFamily::Posix.ping_count_flag(), "-c");
        assert_eq!(OsFamily::Posix.traceroute_program(), "traceroute");
    }

    #[test]
    fn windows_command_forms() {
        assert_eq!(OsFamily::Windows.ping_count_flag(), "-n");
        assert_eq!(OsFamily::Windows.traceroute_program(), "tracert");
    }
}
