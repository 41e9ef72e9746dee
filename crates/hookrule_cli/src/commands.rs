//! Command modules for the HookRule CLI.
//!
//! - `auth_cmd`: stores GitHub tokens in the system keyring
//! - `branch_rules_cmd`: lists and updates branch protection rules
//! - `webhooks_cmd`: lists and creates organization webhooks

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use clap::Args;
use github_client::{create_token_client, ApiEndpoints, GitHubClient};
use tracing::{debug, error};

use crate::{config::AppConfig, credentials::resolve_token, errors::Error};

pub mod auth_cmd;
pub mod branch_rules_cmd;
pub mod webhooks_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Connection flags shared by every organization command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// GitHub personal access token for the organization
    #[arg(short = 't', long, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub Enterprise Server hostname [default: github.com]
    #[arg(long)]
    pub hostname: Option<String>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl ConnectionArgs {
    /// The host to talk to: the flag, then the configuration file.
    pub fn hostname(&self, config: &AppConfig) -> String {
        self.hostname
            .clone()
            .unwrap_or_else(|| config.github.hostname.clone())
    }

    /// Builds an authenticated client for the selected host.
    pub fn connect(&self, config: &AppConfig) -> Result<GitHubClient, Error> {
        let hostname = self.hostname(config);
        connect(
            &hostname,
            self.token.as_deref(),
            &config.authentication.keyring_service,
        )
    }
}

/// Builds a client for `hostname`, resolving its token from the usual sources.
pub fn connect(
    hostname: &str,
    token: Option<&str>,
    keyring_service: &str,
) -> Result<GitHubClient, Error> {
    let endpoints = ApiEndpoints::for_host(hostname)?;
    let token = resolve_token(token, hostname, keyring_service)?;

    debug!(hostname = hostname, "Connecting to GitHub");
    Ok(create_token_client(&token, &endpoints)?)
}

/// Name of a report file stamped with `now`, e.g. `WebhookReport-20240131235959.csv`.
pub fn default_report_name(prefix: &str, now: DateTime<Local>) -> String {
    format!("{}-{}.csv", prefix, now.format("%Y%m%d%H%M%S"))
}

/// Returns the report path given on the command line, or a new time stamped one.
pub(crate) fn report_path(output_file: Option<&PathBuf>, prefix: &str) -> PathBuf {
    output_file
        .cloned()
        .unwrap_or_else(|| PathBuf::from(default_report_name(prefix, Local::now())))
}

/// Creates the report file, truncating any existing file of the same name.
pub(crate) fn create_report_file(path: &Path) -> Result<BufWriter<File>, Error> {
    let file = File::create(path).map_err(|e| {
        error!(path = ?path, error = %e, "Failed to create the report file");
        Error::CreateFile(e)
    })?;

    Ok(BufWriter::new(file))
}

/// Opens an input CSV file.
pub(crate) fn open_input_file(path: &Path) -> Result<File, Error> {
    debug!(path = ?path, "Opening input file");
    File::open(path).map_err(|e| {
        error!(path = ?path, error = %e, "Failed to open the input file");
        Error::LoadFile(e)
    })
}
