//! `hookrule webhooks` commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use github_client::GITHUB_COM_HOST;
use hookrule_core::{
    webhook_csv::read_webhook_definitions,
    webhooks::{create_webhooks, list_webhooks, load_source_webhooks, SecretPrompt},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use super::{connect, create_report_file, open_input_file, report_path, ConnectionArgs};
use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "webhooks_cmd_tests.rs"]
mod tests;

/// File name prefix of generated webhook reports.
pub const WEBHOOK_REPORT_PREFIX: &str = "WebhookReport";

#[derive(Subcommand, Debug)]
pub enum WebhookCommands {
    /// List the webhooks of an organization to a CSV report
    List(ListWebhooksArgs),

    /// Create webhooks in an organization from a CSV file or another organization
    Create(CreateWebhooksArgs),
}

impl WebhookCommands {
    pub fn connection(&self) -> &ConnectionArgs {
        match self {
            WebhookCommands::List(args) => &args.connection,
            WebhookCommands::Create(args) => &args.connection,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListWebhooksArgs {
    /// Organization to list the webhooks of
    pub org: String,

    /// Name of the report file [default: WebhookReport-<timestamp>.csv]
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct CreateWebhooksArgs {
    /// Organization to create the webhooks in
    pub org: String,

    /// CSV file with the webhooks to create
    #[arg(
        short = 'f',
        long = "from-file",
        conflicts_with = "source_organization",
        required_unless_present = "source_organization"
    )]
    pub from_file: Option<PathBuf>,

    /// Organization to copy the webhooks from
    #[arg(short = 'o', long, requires = "source_token")]
    pub source_organization: Option<String>,

    /// GitHub personal access token for the source organization
    #[arg(short = 's', long, env = "GH_SOURCE_TOKEN", hide_env_values = true)]
    pub source_token: Option<String>,

    /// GitHub Enterprise Server hostname of the source organization [default: github.com]
    #[arg(long)]
    pub source_hostname: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Where the webhooks to create come from.
#[derive(Debug)]
pub enum WebhookSource {
    File(PathBuf),
    Organization {
        org: String,
        token: SecretString,
        hostname: String,
    },
}

impl WebhookSource {
    /// Validates the source flags: exactly one of a file or a source organization, and a
    /// token whenever a source organization is named.
    pub fn from_args(args: &CreateWebhooksArgs) -> Result<Self, Error> {
        match (&args.from_file, &args.source_organization) {
            (Some(_), Some(_)) => Err(Error::InvalidArguments(
                "--from-file and --source-organization cannot be used together".to_string(),
            )),
            (None, None) => Err(Error::InvalidArguments(
                "one of --from-file or --source-organization is required".to_string(),
            )),
            (Some(path), None) => Ok(WebhookSource::File(path.clone())),
            (None, Some(org)) => {
                let token = args
                    .source_token
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        Error::InvalidArguments(
                            "--source-token is required with --source-organization".to_string(),
                        )
                    })?;

                Ok(WebhookSource::Organization {
                    org: org.clone(),
                    token: SecretString::from(token.to_string()),
                    hostname: args
                        .source_hostname
                        .clone()
                        .unwrap_or_else(|| GITHUB_COM_HOST.to_string()),
                })
            }
        }
    }
}

/// Executes a webhook command.
#[instrument(skip_all)]
pub async fn execute(
    cmd: &WebhookCommands,
    config: &AppConfig,
    prompt: SecretPrompt<'_>,
) -> Result<(), Error> {
    match cmd {
        WebhookCommands::List(args) => list(args, config).await,
        WebhookCommands::Create(args) => create(args, config, prompt).await,
    }
}

async fn list(args: &ListWebhooksArgs, config: &AppConfig) -> Result<(), Error> {
    let client = args.connection.connect(config)?;
    let path = report_path(args.output_file.as_ref(), WEBHOOK_REPORT_PREFIX);
    let writer = create_report_file(&path)?;

    let count = list_webhooks(&client, &args.org, writer).await?;
    info!(
        org = %args.org,
        count = count,
        path = ?path,
        "Wrote webhook report"
    );

    println!("Successfully listed organizational webhooks for {}", args.org);
    Ok(())
}

async fn create(
    args: &CreateWebhooksArgs,
    config: &AppConfig,
    prompt: SecretPrompt<'_>,
) -> Result<(), Error> {
    let source = WebhookSource::from_args(args)?;
    let client = args.connection.connect(config)?;

    let definitions = match &source {
        WebhookSource::File(path) => read_webhook_definitions(open_input_file(path)?)?,
        WebhookSource::Organization {
            org,
            token,
            hostname,
        } => {
            let source_client = connect(
                hostname,
                Some(token.expose_secret()),
                &config.authentication.keyring_service,
            )?;
            load_source_webhooks(&source_client, org)
                .await?
                .into_iter()
                .map(Ok)
                .collect()
        }
    };

    info!(
        org = %args.org,
        count = definitions.len(),
        "Creating webhooks"
    );
    let report = create_webhooks(&client, &args.org, definitions, prompt).await;
    if !report.is_success() {
        warn!(
            org = %args.org,
            failed = report.failed(),
            "Not every webhook was created, see the errors above"
        );
    }

    println!("Successfully created webhooks for: {}.", args.org);
    Ok(())
}
