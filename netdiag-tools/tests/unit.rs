#[cfg(test)]
mod tests {
    use netdiag_tools::invocation::{build, split_options, Capability, DEFAULT_NMAP_ARGS};
    use netdiag_tools::session::{run_session, DeviceTransport, SessionError};
    use netdiag_tools::tools::*;
    use netdiag_tools::*;
    use serde_json::json;
    use std::sync::Arc;

    // -- Invocation builder -------------------------------------------------

    #[test]
    fn ping_argv_posix() {
        let argv = build(
            OsFamily::Posix,
            Capability::Ping,
            &json!({"ip_address": "8.8.8.8"}),
        )
        .unwrap();
        assert_eq!(argv, vec!["ping", "-c", "1", "8.8.8.8"]);
    }

    #[test]
    fn ping_argv_windows() {
        let argv = build(
            OsFamily::Windows,
            Capability::Ping,
            &json!({"ip_address": "8.8.8.8"}),
        )
        .unwrap();
        assert_eq!(argv, vec!["ping", "-n", "1", "8.8.8.8"]);
    }

    #[test]
    fn traceroute_program_follows_platform() {
        let posix = build(
            OsFamily::Posix,
            Capability::Traceroute,
            &json!({"ip_address": "1.1.1.1"}),
        )
        .unwrap();
        assert_eq!(posix, vec!["traceroute", "1.1.1.1"]);

        let windows = build(
            OsFamily::Windows,
            Capability::Traceroute,
            &json!({"ip_address": "1.1.1.1"}),
        )
        .unwrap();
        assert_eq!(windows, vec!["tracert", "1.1.1.1"]);
    }

    #[test]
    fn build_is_idempotent() {
        let params = json!({"target": "10.0.0.0/24", "custom_args": "-T4 -sV"});
        let first = build(OsFamily::Posix, Capability::NmapScan, &params).unwrap();
        let second = build(OsFamily::Posix, Capability::NmapScan, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_nmap_options_substitute_the_default() {
        let argv = build(
            OsFamily::Posix,
            Capability::NmapScan,
            &json!({"target": "10.0.0.1"}),
        )
        .unwrap();
        assert_eq!(argv, vec!["nmap", DEFAULT_NMAP_ARGS, "10.0.0.1"]);

        let blank = build(
            OsFamily::Posix,
            Capability::NmapScan,
            &json!({"target": "10.0.0.1", "custom_args": "   "}),
        )
        .unwrap();
        assert_eq!(blank, argv);
    }

    #[test]
    fn quoted_option_token_stays_one_argument() {
        let argv = build(
            OsFamily::Posix,
            Capability::NmapScan,
            &json!({"target": "10.0.0.1", "custom_args": "--script \"default and safe\""}),
        )
        .unwrap();
        assert_eq!(
            argv,
            vec!["nmap", "--script", "default and safe", "10.0.0.1"]
        );
    }

    #[test]
    fn shell_metacharacters_stay_literal_tokens() {
        // Splitting applies quoting rules only; nothing is re-interpreted.
        let tokens = split_options("-p 80;id $(whoami)").unwrap();
        assert_eq!(tokens, vec!["-p", "80;id", "$(whoami)"]);
    }

    #[test]
    fn unbalanced_quoting_is_rejected() {
        let err = split_options("--script \"unterminated").unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn list_interfaces_argv() {
        let argv = build(OsFamily::Posix, Capability::ListInterfaces, &json!({})).unwrap();
        assert_eq!(argv, vec!["tshark", "-D"]);
    }

    #[test]
    fn sniffer_defaults_omit_the_filter_flag() {
        let argv = build(
            OsFamily::Posix,
            Capability::PacketSniffer,
            &json!({"interface": 7, "packet_count": 10, "filter_expr": ""}),
        )
        .unwrap();
        assert_eq!(argv, vec!["tshark", "-i", "7", "-c", "10"]);

        // Same vector when the caller supplies nothing at all.
        let defaulted = build(OsFamily::Posix, Capability::PacketSniffer, &json!({})).unwrap();
        assert_eq!(defaulted, argv);
    }

    #[test]
    fn sniffer_filter_is_one_argument_to_dash_y() {
        let argv = build(
            OsFamily::Posix,
            Capability::PacketSniffer,
            &json!({"filter_expr": "dns or http"}),
        )
        .unwrap();
        assert_eq!(argv, vec!["tshark", "-i", "7", "-c", "10", "-Y", "dns or http"]);
    }

    #[test]
    fn missing_required_param_is_a_validation_error() {
        let err = build(OsFamily::Posix, Capability::Ping, &json!({})).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn non_numeric_count_is_a_validation_error() {
        let err = build(
            OsFamily::Posix,
            Capability::PacketSniffer,
            &json!({"packet_count": "ten"}),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn remote_command_never_builds_a_local_invocation() {
        let err = build(OsFamily::Posix, Capability::RemoteCommand, &json!({})).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn capability_names_and_locality() {
        assert_eq!(Capability::Ping.name(), "ping_ip");
        assert_eq!(Capability::RemoteCommand.name(), "use_ssh");
        assert!(Capability::RemoteCommand.is_remote());
        assert!(!Capability::NmapScan.is_remote());
    }

    // -- Session lifecycle --------------------------------------------------

    struct ScriptedTransport {
        open_result: Result<(), SessionError>,
        send_result: Result<String, SessionError>,
        opens: usize,
        sends: usize,
        closes: usize,
    }

    impl ScriptedTransport {
        fn new(
            open_result: Result<(), SessionError>,
            send_result: Result<String, SessionError>,
        ) -> Self {
            Self {
                open_result,
                send_result,
                opens: 0,
                sends: 0,
                closes: 0,
            }
        }
    }

    impl DeviceTransport for ScriptedTransport {
        fn open(&mut self) -> Result<(), SessionError> {
            self.opens += 1;
            self.open_result.clone()
        }

        fn send(&mut self, _command: &str) -> Result<String, SessionError> {
            self.sends += 1;
            self.send_result.clone()
        }

        fn close(&mut self) {
            self.closes += 1;
        }
    }

    #[test]
    fn successful_send_closes_exactly_once() {
        let mut transport =
            ScriptedTransport::new(Ok(()), Ok("Cisco IOS XE Software".to_string()));
        let outcome = run_session(&mut transport, "show version");

        assert_eq!(outcome, ExecOutcome::Success("Cisco IOS XE Software".to_string()));
        assert_eq!(transport.opens, 1);
        assert_eq!(transport.sends, 1);
        assert_eq!(transport.closes, 1);
    }

    #[test]
    fn failed_send_still_closes_exactly_once() {
        let mut transport = ScriptedTransport::new(
            Ok(()),
            Err(SessionError::Transport("connection dropped mid-command".to_string())),
        );
        let outcome = run_session(&mut transport, "show version");

        assert_eq!(outcome.kind(), Some(FailureKind::Transport));
        assert_eq!(transport.closes, 1);
    }

    #[test]
    fn failed_open_closes_exactly_once_and_never_sends() {
        let mut transport = ScriptedTransport::new(
            Err(SessionError::Authentication(
                "10.0.0.5 rejected credentials for 'admin'".to_string(),
            )),
            Ok(String::new()),
        );
        let outcome = run_session(&mut transport, "show version");

        assert_eq!(outcome.kind(), Some(FailureKind::Authentication));
        assert_eq!(transport.sends, 0);
        assert_eq!(transport.closes, 1);

        let text = outcome.into_text();
        assert!(text.starts_with(FAILURE_MARKER));
        assert!(text.contains("rejected credentials"));
    }

    // -- Registry -----------------------------------------------------------

    #[test]
    fn registry_register_and_get() {
        let mut registry = ToolRegistry::new();
        netdiag_tools::tools::register_defaults(
            &mut registry,
            OsFamily::Posix,
            std::time::Duration::from_millis(500),
        );

        assert_eq!(registry.count(), 6);
        assert!(registry.get("ping_ip").is_some());
        assert!(registry.get("use_ssh").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn registry_lists_sorted_names() {
        let mut registry = ToolRegistry::new();
        netdiag_tools::tools::register_defaults(
            &mut registry,
            OsFamily::Posix,
            std::time::Duration::from_millis(500),
        );

        let names = registry.list();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"packet_sniffer".to_string()));
    }

    #[test]
    fn registry_schemas_are_mcp_shaped() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PingTool::new(OsFamily::Posix)));

        let schemas = registry.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0]["name"], "ping_ip");
        assert!(schemas[0]["inputSchema"]["properties"]["ip_address"].is_object());
    }
}
