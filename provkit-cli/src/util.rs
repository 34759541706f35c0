//! Shared utility functions used across command modules.

use std::io::BufRead;
use std::path::Path;

use provkit_core::host::RemoteHost;
use provkit_core::settings::Settings;
use secrecy::SecretString;

use crate::cli::HostArgs;
use crate::error::CliError;

/// Loads the settings file named on the command line, or the default one.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, CliError> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Settings::default_path()
            .map_err(|e| CliError::Config(format!("Failed to locate settings: {e}")))?,
    };
    Settings::load(&path).map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))
}

/// Builds a `RemoteHost` from host-selection arguments, consulting the
/// settings file when the host refers to a named entry.
pub fn build_remote_host(
    config_path: Option<&Path>,
    target: &HostArgs,
) -> Result<RemoteHost, CliError> {
    let settings = load_settings(config_path)?;
    let entry = settings.host(&target.host);

    let address = entry.map_or(target.host.as_str(), |e| e.host.as_str());
    let port = target.port.or(entry.map(|e| e.port)).unwrap_or(22);
    let username = target
        .user
        .clone()
        .or_else(|| entry.map(|e| e.username.clone()))
        .ok_or_else(|| {
            CliError::Config(format!(
                "No username for {}; pass --user or add the host to the settings file",
                target.host
            ))
        })?;
    let password = resolve_password(target, &username, address)?;

    Ok(RemoteHost::new(address, username, Some(password)).with_port(port))
}

/// Resolves the password from the command line, stdin, or a prompt.
fn resolve_password(
    target: &HostArgs,
    username: &str,
    address: &str,
) -> Result<SecretString, CliError> {
    if let Some(ref password) = target.password {
        return Ok(SecretString::from(password.clone()));
    }
    if target.password_stdin {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        return Ok(SecretString::from(
            line.trim_end_matches(['\r', '\n']).to_string(),
        ));
    }
    let prompt = format!("Password for {username}@{address}: ");
    let password = rpassword::prompt_password(prompt)
        .map_err(|e| CliError::Config(format!("Failed to read password: {e}")))?;
    Ok(SecretString::from(password))
}
