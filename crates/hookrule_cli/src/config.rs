//! Configuration file for the HookRule CLI.
//!
//! The configuration is stored in TOML format. It is optional: when no file is given and
//! none exists in the current directory the defaults are used.
//!
//! ```toml
//! [github]
//! hostname = "github.example.com"
//!
//! [authentication]
//! keyring_service = "hookrule_cli"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use github_client::GITHUB_COM_HOST;
use serde::Deserialize;
use tracing::debug;

use crate::credentials::KEY_RING_SERVICE_NAME;
use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "hookrule.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings read from the configuration file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub authentication: AuthenticationConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, `Error::LoadFile` if it cannot
    /// be read and `Error::ParseTomlFile` if it is not valid configuration TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path).map_err(Error::LoadFile)?;
        toml::from_str(&content).map_err(Error::ParseTomlFile)
    }

    /// Loads the configuration named on the command line, or the default file if present.
    ///
    /// An explicitly named file must exist. When no file is named and the default file is
    /// absent, the default configuration is returned.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);
        if config_path.is_none() && !path.exists() {
            debug!("No configuration file found, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct GitHubConfig {
    /// Host of the GitHub instance, `github.com` or a GitHub Enterprise Server hostname
    #[serde(default = "GitHubConfig::default_hostname")]
    pub hostname: String,
}

impl GitHubConfig {
    fn default_hostname() -> String {
        GITHUB_COM_HOST.to_string()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            hostname: Self::default_hostname(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct AuthenticationConfig {
    /// Keyring service under which `hookrule auth github` stores tokens
    #[serde(default = "AuthenticationConfig::default_keyring_service")]
    pub keyring_service: String,
}

impl AuthenticationConfig {
    fn default_keyring_service() -> String {
        KEY_RING_SERVICE_NAME.to_string()
    }
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            keyring_service: Self::default_keyring_service(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./hookrule.toml` in the current directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
