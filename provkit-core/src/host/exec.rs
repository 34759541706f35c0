//! Process-control options for remote command execution.
//!
//! Callers of the provisioning API describe how a command should be launched
//! with a small JSON object; [`ProcCtrl`] is its deserialized form. The
//! default is blocking execution with full output capture.

use serde::{Deserialize, Serialize};

use super::error::{HostError, HostResult};

/// Controls how a remote command is started and waited for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcCtrl {
    /// Wait for the process to exit and capture its output. A non-zero exit
    /// status is an error.
    pub wait_for_completion: bool,
    /// In non-blocking mode, number of seconds to wait before re-checking
    /// whether the process is still running. A process that has already
    /// exited by then is treated as a failed daemon startup.
    pub daemon_wait: Option<u64>,
}

impl Default for ProcCtrl {
    fn default() -> Self {
        Self {
            wait_for_completion: true,
            daemon_wait: None,
        }
    }
}

impl ProcCtrl {
    /// Blocking execution with output capture (the default).
    pub fn blocking() -> Self {
        Self::default()
    }

    /// Fire-and-forget execution with a bounded wait of `secs` seconds to
    /// distinguish "still running" from "failed immediately".
    pub fn daemon(secs: u64) -> Self {
        Self {
            wait_for_completion: false,
            daemon_wait: Some(secs),
        }
    }
}

/// Joins an argv into a single command line, backslash-escaping spaces in
/// each argument.
pub fn join_cmdv(cmdv: &[String]) -> String {
    cmdv.iter()
        .map(|a| a.replace(' ', "\\ "))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decides the outcome of a command execution from the exit status observed
/// under the wait policy of `ctrl`.
///
/// Blocking mode treats a missing exit status as success with status 0 and
/// a non-zero status as a failure. Non-blocking mode inverts the reading:
/// any observed exit status, zero included, means the command finished when
/// it was expected to outlive the bounded wait, which is a failed daemon
/// startup; no status means it is still running.
pub(crate) fn exec_outcome(
    host: &str,
    cmdln: &str,
    ctrl: &ProcCtrl,
    exit_status: Option<u32>,
    output: String,
) -> HostResult<Option<String>> {
    if ctrl.wait_for_completion {
        let exit_status = exit_status.unwrap_or(0);
        if exit_status != 0 {
            return Err(HostError::RemoteExec {
                host: host.to_string(),
                cmdln: cmdln.to_string(),
                exit_status,
                output,
            });
        }
        Ok(Some(output))
    } else if let Some(exit_status) = exit_status {
        Err(HostError::RemoteExec {
            host: host.to_string(),
            cmdln: cmdln.to_string(),
            exit_status,
            output,
        })
    } else {
        Ok(None)
    }
}
