//! Listing and creating organization webhooks.

use std::io::Write;

use github_client::{CreateWebhookPayload, OrganizationClient};
use tracing::{debug, error, info, instrument, warn};

use crate::report::{unreadable_row_label, BatchReport};
use crate::webhook_csv::write_webhook_report;
use crate::Error;

#[cfg(test)]
#[path = "webhooks_tests.rs"]
mod tests;

/// Asks the user for a value, given the message to show.
pub type SecretPrompt<'a> = &'a dyn Fn(&str) -> Result<String, Error>;

/// Writes a report of every webhook of `org` and returns the number of webhooks written.
///
/// # Errors
///
/// Fails before any row is written if the webhooks cannot be fetched.
#[instrument(skip(client, writer))]
pub async fn list_webhooks<W: Write>(
    client: &dyn OrganizationClient,
    org: &str,
    writer: W,
) -> Result<usize, Error> {
    debug!(org = org, "Gathering webhooks");
    let webhooks = client.list_org_webhooks(org).await?;

    debug!(
        org = org,
        count = webhooks.len(),
        "Writing webhooks to the report"
    );
    write_webhook_report(writer, &webhooks)?;
    Ok(webhooks.len())
}

/// Reads every webhook of `source_org` as a create payload for another organization.
#[instrument(skip(source_client))]
pub async fn load_source_webhooks(
    source_client: &dyn OrganizationClient,
    source_org: &str,
) -> Result<Vec<CreateWebhookPayload>, Error> {
    let webhooks = source_client.list_org_webhooks(source_org).await?;
    info!(
        org = source_org,
        count = webhooks.len(),
        "Read webhooks from the source organization"
    );

    Ok(webhooks.iter().map(CreateWebhookPayload::from).collect())
}

/// Creates each webhook in `org`, one call per webhook, in the given order.
///
/// A webhook whose secret is masked needs a new secret, which `prompt` is asked for once
/// before that webhook is submitted. Definitions that could not be read, and webhooks that
/// fail to be created, are recorded in the report and the remaining webhooks are still
/// created. Nothing is rolled back.
#[instrument(skip(client, definitions, prompt), fields(count = definitions.len()))]
pub async fn create_webhooks(
    client: &dyn OrganizationClient,
    org: &str,
    definitions: Vec<Result<CreateWebhookPayload, Error>>,
    prompt: SecretPrompt<'_>,
) -> BatchReport {
    let mut report = BatchReport::new();

    for definition in definitions {
        let mut payload = match definition {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Skipping unreadable webhook definition");
                report.record_failed(unreadable_row_label(&e), e.to_string());
                continue;
            }
        };
        let url = payload.config.url.clone();

        if payload.config.has_masked_secret() {
            debug!(
                url = %url,
                "Webhook has a masked secret and needs a new secret to be entered"
            );
            let message = format!(
                "Please enter the new secret to be created with webhook {}:",
                url
            );
            match prompt(&message) {
                Ok(secret) => payload.config.secret = Some(secret),
                Err(e) => {
                    error!(url = %url, error = %e, "No secret was provided for webhook");
                    report.record_failed(url, e.to_string());
                    continue;
                }
            }
        }

        match client.create_org_webhook(org, &payload).await {
            Ok(created) => {
                debug!(url = %url, id = created.id, "Created webhook");
                report.record_applied(url);
            }
            Err(e) => {
                error!(url = %url, error = %e, "Failed to create webhook");
                report.record_failed(url, e.to_string());
            }
        }
    }

    if !report.is_success() {
        warn!(
            org = org,
            failed = report.failed(),
            succeeded = report.succeeded(),
            "Some webhooks were not created"
        );
    }

    report
}
