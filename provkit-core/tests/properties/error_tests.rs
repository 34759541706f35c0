//! Property tests for host error types

use proptest::prelude::*;
use provkit_core::host::HostError;

proptest! {
    /// Property: RemoteExec display preserves host, command, status, output
    #[test]
    fn remote_exec_display_preserves_fields(
        host in "[a-z][a-z0-9.-]{0,30}",
        cmdln in "[a-zA-Z0-9 /_-]{1,60}",
        exit_status in 1u32..255,
        output in "[a-zA-Z0-9 \n]{0,80}",
    ) {
        let err = HostError::RemoteExec {
            host: host.clone(),
            cmdln: cmdln.clone(),
            exit_status,
            output: output.clone(),
        };
        let msg = err.to_string();
        prop_assert!(msg.contains(&host));
        prop_assert!(msg.contains(&cmdln));
        prop_assert!(msg.contains(&exit_status.to_string()));
        prop_assert!(msg.contains(&output));
    }

    /// Property: NotADirectory display is host:path prefixed
    #[test]
    fn not_a_directory_display_format(
        host in "[a-z][a-z0-9.-]{0,30}",
        path in "/[a-z0-9/]{0,40}",
    ) {
        let err = HostError::NotADirectory {
            host: host.clone(),
            path: path.clone(),
        };
        prop_assert_eq!(err.to_string(), format!("{host}:{path} is not a directory"));
    }
}
