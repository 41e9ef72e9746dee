use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that stop a HookRule command before or while it runs.
///
/// Failures of individual webhooks or rules are not errors; they are reported in the
/// batch report of the command.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable token was found, or the keyring could not be used.
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] hookrule_core::Error),

    /// Failed to create or truncate the report file.
    #[error("Failed to create the report file.")]
    CreateFile(io::Error),

    #[error(transparent)]
    GitHub(#[from] github_client::Error),

    /// Invalid or incompatible command-line arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to open or read an input file.
    #[error("Failed to load file.")]
    LoadFile(io::Error),

    #[error("Failed to parse TOML configuration file.")]
    ParseTomlFile(toml::de::Error),
}
