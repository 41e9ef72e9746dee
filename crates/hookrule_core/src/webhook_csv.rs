//! CSV projection of organization webhooks.
//!
//! The report written by [`write_webhook_report`] is also the import format read by
//! [`read_webhook_definitions`], so a report taken from one organization can be edited
//! and replayed into another.

use std::io::{Read, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{ReaderBuilder, StringRecord, Writer};
use github_client::{CreateWebhookPayload, Webhook, WebhookConfig};
use tracing::debug;

use crate::fields::{format_bool, parse_bool_lenient};
use crate::Error;

#[cfg(test)]
#[path = "webhook_csv_tests.rs"]
mod tests;

/// Header row of the webhook report.
pub const WEBHOOK_REPORT_HEADERS: [&str; 11] = [
    "Type",
    "ID",
    "Name",
    "Active",
    "Events",
    "Config_ContentType",
    "Config_InsecureSSL",
    "Config_Secret",
    "Config_URL",
    "Updated_At",
    "Created_At",
];

/// Separator between event names in the `Events` column.
pub const EVENT_SEPARATOR: char = ';';

// Columns read back when importing; the remaining ones are informational.
const NAME_COLUMN: usize = 2;
const ACTIVE_COLUMN: usize = 3;
const EVENTS_COLUMN: usize = 4;
const CONTENT_TYPE_COLUMN: usize = 5;
const INSECURE_SSL_COLUMN: usize = 6;
const SECRET_COLUMN: usize = 7;
const URL_COLUMN: usize = 8;

/// Writes the header followed by one row per webhook, in the given order.
pub fn write_webhook_report<W: Write>(writer: W, webhooks: &[Webhook]) -> Result<(), Error> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(WEBHOOK_REPORT_HEADERS)?;

    for webhook in webhooks {
        csv_writer.write_record(webhook_record(webhook))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Projects one webhook onto the report columns.
pub fn webhook_record(webhook: &Webhook) -> Vec<String> {
    vec![
        webhook.hook_type.clone(),
        webhook.id.to_string(),
        webhook.name.clone(),
        format_bool(webhook.active).to_string(),
        webhook.events.join(&EVENT_SEPARATOR.to_string()),
        webhook.config.content_type.clone(),
        if webhook.config.insecure_ssl { "1" } else { "0" }.to_string(),
        webhook.config.secret.clone().unwrap_or_default(),
        webhook.config.url.clone(),
        format_timestamp(&webhook.updated_at),
        format_timestamp(&webhook.created_at),
    ]
}

/// Reads webhook definitions from a report shaped CSV file.
///
/// The first row is always treated as the header. Every following row yields either a
/// create payload or the reason it could not be read; a bad row does not stop the rows
/// after it from loading.
///
/// # Errors
///
/// Returns `Error::Csv` if the underlying reader fails.
pub fn read_webhook_definitions<R: Read>(
    reader: R,
) -> Result<Vec<Result<CreateWebhookPayload, Error>>, Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut definitions = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        // Data rows start on line 2, after the header.
        let row = index + 2;
        match record {
            Ok(record) => definitions.push(webhook_definition(row, &record)),
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => definitions.push(Err(Error::InvalidRow {
                row,
                reason: e.to_string(),
            })),
        }
    }

    debug!(rows = definitions.len(), "Read webhook definitions");
    Ok(definitions)
}

fn webhook_definition(row: usize, record: &StringRecord) -> Result<CreateWebhookPayload, Error> {
    if record.len() <= URL_COLUMN {
        return Err(Error::InvalidRow {
            row,
            reason: format!(
                "expected at least {} columns, found {}",
                URL_COLUMN + 1,
                record.len()
            ),
        });
    }

    let cell = |column: usize| record.get(column).unwrap_or_default();
    let secret = cell(SECRET_COLUMN);

    Ok(CreateWebhookPayload {
        name: cell(NAME_COLUMN).to_string(),
        active: parse_bool_lenient(cell(ACTIVE_COLUMN)),
        events: cell(EVENTS_COLUMN)
            .split(EVENT_SEPARATOR)
            .map(str::trim)
            .filter(|event| !event.is_empty())
            .map(String::from)
            .collect(),
        config: WebhookConfig {
            url: cell(URL_COLUMN).to_string(),
            content_type: cell(CONTENT_TYPE_COLUMN).to_string(),
            insecure_ssl: parse_bool_lenient(cell(INSECURE_SSL_COLUMN)),
            secret: (!secret.is_empty()).then(|| secret.to_string()),
        },
    })
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
