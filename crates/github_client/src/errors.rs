//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when talking to the GitHub REST and
//! GraphQL APIs through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_org_webhooks("my-org").await {
///     Ok(hooks) => println!("Found {} webhooks", hooks.len()),
///     Err(Error::NotFound) => eprintln!("Organization not found"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GitHub API request failed.
    ///
    /// The contained string is the message GitHub (or the transport) returned.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// Building an authenticated GitHub client failed.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GraphQL endpoint answered with one or more errors.
    ///
    /// GraphQL reports failures such as unknown repositories with a `200 OK` status and an
    /// `errors` array; the messages are joined with `; `.
    #[error("GraphQL request returned errors: {0}")]
    GraphQl(String),

    /// The configured hostname cannot be turned into an API endpoint.
    #[error("Invalid GitHub hostname: {0}")]
    InvalidHost(String),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
