//! Resolution of the GitHub token used for a host.
//!
//! Tokens are looked up, in order, from the `--token` flag (or `GH_TOKEN`), the
//! `GITHUB_TOKEN` environment variable and the system keyring entry written by
//! `hookrule auth github`.

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::errors::Error;

pub const KEY_RING_SERVICE_NAME: &str = "hookrule_cli";
pub const KEY_RING_USER_TOKEN: &str = "github_token";
pub const GITHUB_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

/// Name of the keyring entry holding the token for `hostname`.
pub fn keyring_user(hostname: &str) -> String {
    format!("{}@{}", KEY_RING_USER_TOKEN, hostname)
}

/// Finds the token to use for `hostname`.
///
/// # Errors
///
/// Returns `Error::Auth` if no source provides a token.
pub fn resolve_token(
    explicit: Option<&str>,
    hostname: &str,
    keyring_service: &str,
) -> Result<SecretString, Error> {
    select_token(
        explicit,
        std::env::var(GITHUB_TOKEN_ENV_VAR).ok(),
        hostname,
        || read_keyring_token(keyring_service, hostname),
    )
}

/// Picks the first non-empty token of the flag, the environment and the keyring.
///
/// The keyring is only consulted when neither of the other sources has a token.
pub(crate) fn select_token<F>(
    explicit: Option<&str>,
    env_token: Option<String>,
    hostname: &str,
    keyring_token: F,
) -> Result<SecretString, Error>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!(hostname = hostname, "Using the token passed on the command line");
        return Ok(SecretString::from(token.to_string()));
    }

    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        debug!(
            hostname = hostname,
            "Using the token from {}", GITHUB_TOKEN_ENV_VAR
        );
        return Ok(SecretString::from(token.trim().to_string()));
    }

    if let Some(token) = keyring_token().filter(|t| !t.trim().is_empty()) {
        debug!(hostname = hostname, "Using the token from the keyring");
        return Ok(SecretString::from(token));
    }

    Err(Error::Auth(format!(
        "No GitHub token found for {}. Pass --token, set {} or run 'hookrule auth github'.",
        hostname, GITHUB_TOKEN_ENV_VAR
    )))
}

fn read_keyring_token(service: &str, hostname: &str) -> Option<String> {
    let entry = match Entry::new(service, &keyring_user(hostname)) {
        Ok(entry) => entry,
        Err(e) => {
            warn!(error = %e, "Failed to open the keyring entry");
            return None;
        }
    };

    match entry.get_password() {
        Ok(token) => Some(token),
        Err(keyring::Error::NoEntry) => {
            debug!(hostname = hostname, "No token stored in the keyring");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to read the token from the keyring");
            None
        }
    }
}

/// Stores the token for `hostname` in the keyring.
pub fn store_token(service: &str, hostname: &str, token: &SecretString) -> Result<(), Error> {
    let entry = Entry::new(service, &keyring_user(hostname))
        .map_err(|e| Error::Auth(format!("Failed to create an entry in the keyring: {}", e)))?;
    entry
        .set_password(token.expose_secret())
        .map_err(|e| Error::Auth(format!("Failed to save token to keyring: {}", e)))?;

    debug!(hostname = hostname, "Saved token to keyring");
    Ok(())
}
