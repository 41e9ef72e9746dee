//! Authentication command module for GitHub credentials management.
//!
//! Personal access tokens are stored in the system keyring, one entry per host, rather
//! than in configuration files.

use clap::Subcommand;
use github_client::GITHUB_COM_HOST;
use secrecy::SecretString;
use tracing::{debug, error, info, instrument};

use crate::{config::AppConfig, credentials::store_token, errors::Error};

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

/// Asks the user for a token without echoing it, given the message to show.
pub type TokenPrompt<'a> = &'a dyn Fn(&str) -> Result<String, Error>;

/// Authentication subcommands for managing GitHub credentials.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store a GitHub personal access token in the system keyring
    #[command(name = "github")]
    GitHub {
        /// Host the token belongs to
        #[arg(long, default_value = GITHUB_COM_HOST)]
        hostname: String,
    },
}

/// Executes the specified authentication command.
#[instrument(skip(config, prompt))]
pub fn execute(cmd: &AuthCommands, config: &AppConfig, prompt: TokenPrompt<'_>) -> Result<(), Error> {
    match cmd {
        AuthCommands::GitHub { hostname } => {
            let token = ask_for_token(hostname, prompt)?;
            store_token(&config.authentication.keyring_service, hostname, &token)?;

            info!(hostname = %hostname, "Stored GitHub token in the keyring");
            println!("GitHub token for {} stored successfully!", hostname);
            Ok(())
        }
    }
}

fn ask_for_token(hostname: &str, prompt: TokenPrompt<'_>) -> Result<SecretString, Error> {
    let token = prompt(&format!("GitHub personal access token for {}", hostname))?;
    debug!(message = "Read token from the prompt");

    let token = token.trim();
    if token.is_empty() {
        let err = Error::Auth("Token cannot be empty".to_string());
        error!(message = "Token cannot be empty", error = ?err);
        return Err(err);
    }

    Ok(SecretString::from(token.to_string()))
}
