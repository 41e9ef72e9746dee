//! GitHub organization webhook types.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

/// The value GitHub returns in place of a webhook secret.
///
/// Secrets are write-only; once set they can never be read back.
pub const MASKED_SECRET: &str = "********";

/// An organization webhook as returned by `GET /orgs/{org}/hooks`.
///
/// # Examples
///
/// ```rust
/// use github_client::Webhook;
///
/// let webhook_json = r#"{
///     "type": "Organization",
///     "id": 12345,
///     "name": "web",
///     "active": true,
///     "events": ["push", "pull_request"],
///     "config": {
///         "url": "https://example.com/webhook",
///         "content_type": "json",
///         "insecure_ssl": "0",
///         "secret": "********"
///     },
///     "created_at": "2024-01-01T00:00:00Z",
///     "updated_at": "2024-01-02T00:00:00Z"
/// }"#;
///
/// let webhook: Webhook = serde_json::from_str(webhook_json).unwrap();
/// assert_eq!(webhook.id, 12345);
/// assert!(webhook.config.has_masked_secret());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Webhook {
    /// Hook owner type, `Organization` for org level hooks
    #[serde(rename = "type", default)]
    pub hook_type: String,

    /// GitHub-assigned webhook ID
    pub id: u64,

    /// Hook name, always `web` for webhooks delivered over HTTP
    pub name: String,

    /// Whether deliveries are sent when the events fire
    pub active: bool,

    /// Subscribed event names, in the order GitHub lists them
    pub events: Vec<String>,

    pub config: WebhookConfig,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Delivery settings of a webhook.
///
/// # Examples
///
/// ```rust
/// use github_client::WebhookConfig;
///
/// let config = WebhookConfig {
///     url: "https://example.com/webhook".to_string(),
///     content_type: "json".to_string(),
///     insecure_ssl: false,
///     secret: None,
/// };
///
/// assert!(!config.has_masked_secret());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookConfig {
    /// Delivery URL
    pub url: String,

    /// Payload content type (`json` or `form`)
    #[serde(default)]
    pub content_type: String,

    /// Whether to skip SSL certificate verification on delivery
    ///
    /// GitHub uses "0" (verify) or "1" (skip); older servers send a number.
    #[serde(
        default,
        serialize_with = "serialize_insecure_ssl",
        deserialize_with = "deserialize_insecure_ssl"
    )]
    pub insecure_ssl: bool,

    /// Shared secret used to sign deliveries; masked on read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl WebhookConfig {
    /// Returns true when the secret is the masked placeholder GitHub returns on read.
    pub fn has_masked_secret(&self) -> bool {
        self.secret.as_deref() == Some(MASKED_SECRET)
    }
}

/// Request body for `POST /orgs/{org}/hooks`.
///
/// Converting a [`Webhook`] keeps every field as read, so copying a hook between
/// organizations only changes where the payload is sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateWebhookPayload {
    pub name: String,
    pub active: bool,
    pub events: Vec<String>,
    pub config: WebhookConfig,
}

impl From<&Webhook> for CreateWebhookPayload {
    fn from(value: &Webhook) -> Self {
        Self {
            name: value.name.clone(),
            active: value.active,
            events: value.events.clone(),
            config: value.config.clone(),
        }
    }
}

/// Serialize boolean to GitHub API format ("0" or "1").
fn serialize_insecure_ssl<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "1" } else { "0" })
}

/// Deserialize GitHub API format ("0"/"1", or 0/1) to boolean.
fn deserialize_insecure_ssl<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Text(String),
        Number(u64),
        Bool(bool),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Text(s) => match s.as_str() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"\"0\" or \"1\"",
            )),
        },
        Flag::Number(n) => Ok(n != 0),
        Flag::Bool(b) => Ok(b),
    }
}
