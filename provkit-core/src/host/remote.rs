//! Remote host implementation over an SSH session with an SFTP sub-channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle, Msg};
use russh::keys::PublicKey;
use russh::{Channel, ChannelMsg, Disconnect};
use russh_sftp::client::SftpSession;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::error::{HostError, HostResult};
use super::exec::{ProcCtrl, exec_outcome, join_cmdv};
use super::fsops;
use super::path::PathStyle;
use super::transfer::{FileStatus, Transfer};
use super::{ClusterHost, SystemTuple};

/// Owner read/write/execute, for uploaded binaries.
const UPLOAD_MODE: u32 = 0o700;

/// Window for draining channel messages when checking whether a
/// non-blocking command has already exited.
const EXIT_POLL_WINDOW: Duration = Duration::from_millis(100);

/// Accepts any server host key.
///
/// Trust-on-first-use: the provisioning frontend has no interactive channel
/// for key confirmation yet, so unknown identities are accepted and logged.
struct TrustOnFirstUse {
    host: String,
}

impl client::Handler for TrustOnFirstUse {
    type Error = russh::Error;

    async fn check_server_key(&mut self, key: &PublicKey) -> Result<bool, Self::Error> {
        debug!(
            "accepting host key for {}: {}",
            self.host,
            key.fingerprint(Default::default())
        );
        Ok(true)
    }
}

/// A host reached over SSH, implementing the [`ClusterHost`] contract.
///
/// The session is lazily established on first use. [`ClusterHost::connect`]
/// replaces any existing connection: the transfer channel is closed first,
/// then the primary connection, then a fresh connection is opened — the
/// host never holds two primary connections, and never a transfer channel
/// without a live primary.
pub struct RemoteHost {
    host: String,
    port: u16,
    username: String,
    password: Option<SecretString>,
    path_style: PathStyle,
    session: Option<Handle<TrustOnFirstUse>>,
    sftp: Option<SftpSession>,
}

impl RemoteHost {
    /// Creates a disconnected remote host. No network traffic happens until
    /// the first operation.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: Option<SecretString>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            password,
            path_style: PathStyle::Posix,
            session: None,
            sftp: None,
        }
    }

    /// Sets the SSH port (default 22).
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Whether a primary connection is currently open.
    pub const fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    async fn close_channels(&mut self) {
        if let Some(sftp) = self.sftp.take() {
            let _ = sftp.close().await;
        }
        if let Some(session) = self.session.take() {
            let _ = session
                .disconnect(Disconnect::ByApplication, "", "en")
                .await;
        }
    }

    async fn session(&mut self) -> HostResult<&mut Handle<TrustOnFirstUse>> {
        if self.session.is_none() {
            ClusterHost::connect(self).await?;
        }
        self.session
            .as_mut()
            .ok_or(HostError::Ssh(russh::Error::Disconnect))
    }

    async fn sftp(&mut self) -> HostResult<&mut SftpSession> {
        if self.sftp.is_none() {
            let session = self.session().await?;
            let channel = session.channel_open_session().await?;
            channel.request_subsystem(true, "sftp").await?;
            let sftp = SftpSession::new(channel.into_stream()).await?;
            self.sftp = Some(sftp);
        }
        self.sftp
            .as_mut()
            .ok_or(HostError::Ssh(russh::Error::Disconnect))
    }

    async fn exec_blocking(&mut self, cmdv: &[&str]) -> HostResult<String> {
        let cmdv: Vec<String> = cmdv.iter().map(ToString::to_string).collect();
        let output = self
            .exec_cmdv(&cmdv, &ProcCtrl::blocking(), None)
            .await?;
        Ok(output.unwrap_or_default())
    }

    /// Executes a complete command line on a fresh command channel.
    ///
    /// Matches the session replacement contract: every execution reconnects,
    /// so a previously opened transfer channel is discarded here.
    async fn exec_cmdln(
        &mut self,
        cmdln: &str,
        ctrl: &ProcCtrl,
        stdin_file: Option<&str>,
    ) -> HostResult<Option<String>> {
        // Stdin contents are fetched over the current transfer channel
        // before the reconnect below tears it down.
        let contents = match stdin_file {
            Some(path) => Some(self.read_file(path).await?),
            None => None,
        };

        ClusterHost::connect(self).await?;
        let session = self.session().await?;
        let mut channel = session.channel_open_session().await?;
        debug!("cmdln={cmdln}");
        channel.exec(true, cmdln).await?;

        if let Some(contents) = contents {
            if let Some(path) = stdin_file {
                let preview_len = contents.len().min(50);
                debug!(
                    "Using supplied stdin from {path}: {}...",
                    String::from_utf8_lossy(&contents[..preview_len])
                );
            }
            channel.data(&contents[..]).await?;
            channel.eof().await?;
        }

        let mut output = Vec::new();
        let mut exit_status = None;
        if ctrl.wait_for_completion {
            debug!("Waiting for command...");
            while let Some(msg) = channel.wait().await {
                collect_msg(msg, &mut output, &mut exit_status);
            }
        } else {
            exit_status = poll_exit(&mut channel, &mut output).await;
            if exit_status.is_none() {
                if let Some(secs) = ctrl.daemon_wait {
                    debug!("Waiting {secs} sec for {cmdln}");
                    tokio::time::sleep(Duration::from_secs(secs)).await;
                    exit_status = poll_exit(&mut channel, &mut output).await;
                }
            }
        }
        exec_outcome(
            &self.host,
            cmdln,
            ctrl,
            exit_status,
            String::from_utf8_lossy(&output).into_owned(),
        )
    }
}

fn collect_msg(msg: ChannelMsg, output: &mut Vec<u8>, exit_status: &mut Option<u32>) {
    match msg {
        // stderr arrives as extended data and is merged into the capture.
        ChannelMsg::Data { ref data } | ChannelMsg::ExtendedData { ref data, .. } => {
            output.extend_from_slice(data);
        }
        ChannelMsg::ExitStatus {
            exit_status: status,
        } => *exit_status = Some(status),
        _ => {}
    }
}

/// Drains pending channel messages within a single bounded window and
/// reports the exit status if one arrived before the window closed.
async fn poll_exit(channel: &mut Channel<Msg>, output: &mut Vec<u8>) -> Option<u32> {
    let mut exit_status = None;
    let drain = async {
        while let Some(msg) = channel.wait().await {
            collect_msg(msg, output, &mut exit_status);
            if exit_status.is_some() {
                break;
            }
        }
    };
    let _ = tokio::time::timeout(EXIT_POLL_WINDOW, drain).await;
    exit_status
}

/// The window bounds the whole drain, not each message: a command that
/// keeps producing output cannot hold the drain open past the deadline.
async fn bounded_drain<F>(mut next: F, output: &mut Vec<u8>) -> Option<u32>
where
    F: AsyncFnMut() -> Option<ChannelMsg>,
{
    let mut exit_status = None;
    let drain = async {
        while let Some(msg) = next().await {
            collect_msg(msg, output, &mut exit_status);
            if exit_status.is_some() {
                break;
            }
        }
    };
    let _ = tokio::time::timeout(EXIT_POLL_WINDOW, drain).await;
    exit_status
}

#[async_trait]
impl ClusterHost for RemoteHost {
    fn name(&self) -> &str {
        &self.host
    }

    fn path_style(&self) -> PathStyle {
        self.path_style
    }

    async fn connect(&mut self) -> HostResult<()> {
        self.close_channels().await;

        // The underlying client handles ~/.ssh key material itself; a
        // supplemental known-hosts file is only noted since unknown
        // identities are accepted regardless.
        if let Some(known_hosts) = dirs::home_dir().map(|h| h.join(".ssh").join("known_hosts")) {
            if known_hosts.exists() {
                debug!("supplemental host keys present at {}", known_hosts.display());
            } else {
                debug!("file {} does not exist here", known_hosts.display());
            }
        }

        let config = Arc::new(client::Config::default());
        let handler = TrustOnFirstUse {
            host: self.host.clone(),
        };
        let mut session = client::connect(config, (self.host.as_str(), self.port), handler)
            .await
            .map_err(|err| HostError::Connect {
                host: self.host.clone(),
                source: err,
            })?;

        let password = self
            .password
            .as_ref()
            .map(|p| p.expose_secret().to_string())
            .unwrap_or_default();
        let auth = session
            .authenticate_password(self.username.clone(), password)
            .await?;
        if !auth.success() {
            return Err(HostError::Auth {
                host: self.host.clone(),
                user: self.username.clone(),
            });
        }

        self.session = Some(session);
        Ok(())
    }

    async fn teardown(&mut self, paths: &[String]) -> HostResult<()> {
        for path in paths {
            self.rm_r(path).await?;
        }
        self.close_channels().await;
        Ok(())
    }

    async fn file_exists(&mut self, path: &str) -> HostResult<FileStatus> {
        let path = self.path_style.sftpify(path);
        let sftp = self.sftp().await?;
        fsops::file_exists(sftp, &path).await
    }

    async fn list_dir(&mut self, path: &str) -> HostResult<Vec<String>> {
        let path = self.path_style.sftpify(path);
        let sftp = self.sftp().await?;
        fsops::list_dir(sftp, &path).await
    }

    async fn mkdir_p(&mut self, path: &str) -> HostResult<()> {
        let host = self.host.clone();
        let style = self.path_style;
        let path = style.sftpify(path);
        let sftp = self.sftp().await?;
        fsops::mkdir_p(sftp, &host, style, &path).await
    }

    async fn rm_r(&mut self, path: &str) -> HostResult<()> {
        let path = self.path_style.sftpify(path);
        let sftp = self.sftp().await?;
        fsops::rm_r(sftp, &path).await
    }

    async fn read_file(&mut self, path: &str) -> HostResult<Vec<u8>> {
        let path = self.path_style.sftpify(path);
        let sftp = self.sftp().await?;
        Transfer::read(sftp, &path).await
    }

    async fn exec_cmdv(
        &mut self,
        cmdv: &[String],
        ctrl: &ProcCtrl,
        stdin_file: Option<&str>,
    ) -> HostResult<Option<String>> {
        self.exec_cmdln(&join_cmdv(cmdv), ctrl, stdin_file).await
    }

    async fn exec_pkg_cmdv(&mut self, cmdv: &[String]) -> HostResult<Option<String>> {
        let Some((binary, rest)) = cmdv.split_first() else {
            return Err(HostError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command vector",
            )));
        };
        let name = std::path::Path::new(binary)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                HostError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{binary} has no file name"),
                ))
            })?;
        let contents = tokio::fs::read(binary).await?;

        let sftp = self.sftp().await?;
        let listing = Transfer::read_dir(sftp, ".").await?;
        debug!("{listing:?}");
        Transfer::write(sftp, &name, &contents).await?;
        Transfer::chmod(sftp, &name, UPLOAD_MODE).await?;

        // The final argument of the incoming vector is a placeholder token
        // not needed once the binary has been uploaded; dropping it is an
        // inherited compatibility quirk of the provisioning wire format.
        let tail = if rest.is_empty() {
            rest
        } else {
            &rest[..rest.len() - 1]
        };
        let mut argv = vec![self.path_style.join(".", &name)];
        argv.extend(tail.iter().cloned());
        self.exec_cmdv(&argv, &ProcCtrl::blocking(), None).await
    }

    async fn system_tuple(&mut self) -> HostResult<SystemTuple> {
        let preamble = match self.exec_blocking(&["#"]).await {
            Ok(preamble) => preamble,
            Err(err) => {
                debug!("executing # failed ({err}) - assuming Windows...");
                let out = self
                    .exec_blocking(&["cmd.exe", "/c", "echo", "%OS%", "%PROCESSOR_ARCHITECTURE%"])
                    .await?;
                let mut tuple = parse_tuple(&self.host, &out)?;
                if tuple.system.contains("Windows") {
                    tuple.system = "Windows".to_string();
                    self.path_style = PathStyle::Windows;
                }
                return Ok(tuple);
            }
        };
        debug!("preamble={preamble}");
        let raw_uname = self.exec_blocking(&["uname", "-sp"]).await?;
        debug!("raw_uname={raw_uname}");
        // The probe shell echoes a preamble before real output; strip one
        // occurrence before splitting.
        let uname = raw_uname.replacen(&preamble, "", 1);
        debug!("uname={uname}");
        let mut tuple = parse_tuple(&self.host, &uname)?;
        if tuple.system.contains("CYGWIN") {
            tuple.system = "CYGWIN".to_string();
        }
        Ok(tuple)
    }
}

fn parse_tuple(host: &str, raw: &str) -> HostResult<SystemTuple> {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let system = parts.next().unwrap_or_default();
    let processor = parts.next().ok_or_else(|| HostError::SystemProbe {
        host: host.to_string(),
        output: raw.to_string(),
    })?;
    Ok(SystemTuple {
        system: system.to_string(),
        processor: processor.trim().to_string(),
    })
}
