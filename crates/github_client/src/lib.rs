//! Crate for reading and writing organization level GitHub settings.
//!
//! This crate provides a client, authenticated with a personal access token, for the two
//! organization resources HookRule manages: organization webhooks (REST) and repository
//! branch protection rules (GraphQL). The [`OrganizationClient`] trait is the seam the
//! command runners are written against.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument};

pub mod branch_protection;
pub mod endpoints;
pub mod errors;
mod graphql;
pub mod models;
pub mod pagination;
pub mod webhook;

pub use branch_protection::{
    BranchProtectionPolicy, BranchProtectionRule, UpdateBranchProtectionRuleInput,
};
pub use endpoints::{ApiEndpoints, GITHUB_COM_HOST};
pub use errors::Error;
pub use models::Repository;
pub use pagination::{collect_all_pages, Page, PageInfo, PAGE_SIZE};
pub use webhook::{CreateWebhookPayload, Webhook, WebhookConfig, MASKED_SECRET};

use graphql::{
    BranchProtectionRulesData, GraphQlRequest, GraphQlResponse, OrganizationRepositoriesData,
    RepositoryData, UpdateBranchProtectionRuleData, BRANCH_PROTECTION_RULES_QUERY,
    REPOSITORIES_QUERY, REPOSITORY_QUERY, UPDATE_BRANCH_PROTECTION_RULE_MUTATION,
};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Media type sent in the `Accept` header of every request.
pub const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Organization level operations used by the HookRule commands.
///
/// `list_repositories` and `list_branch_protection_rules` are provided on top of the
/// page level methods and walk the full GraphQL connection with [`collect_all_pages`].
#[async_trait]
pub trait OrganizationClient: Send + Sync {
    /// Lists the webhooks of an organization with a single REST call.
    async fn list_org_webhooks(&self, org: &str) -> Result<Vec<Webhook>, Error>;

    /// Creates one webhook in an organization.
    async fn create_org_webhook(
        &self,
        org: &str,
        payload: &CreateWebhookPayload,
    ) -> Result<Webhook, Error>;

    /// Looks up a single repository of an organization by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::GraphQl` when GitHub reports the repository cannot be resolved.
    async fn get_repository(&self, org: &str, name: &str) -> Result<Repository, Error>;

    /// Fetches one page of an organization's repositories.
    async fn list_repositories_page(
        &self,
        org: &str,
        cursor: Option<String>,
    ) -> Result<Page<Repository>, Error>;

    /// Fetches one page of a repository's branch protection rules.
    async fn list_branch_protection_rules_page(
        &self,
        org: &str,
        repo: &str,
        cursor: Option<String>,
    ) -> Result<Page<BranchProtectionRule>, Error>;

    /// Overwrites the pattern and policy of an existing rule, targeted by its ID.
    async fn update_branch_protection_rule(&self, rule: &BranchProtectionRule)
        -> Result<(), Error>;

    /// Lists every repository of an organization, in the order GitHub returns them.
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, Error> {
        collect_all_pages(|cursor| self.list_repositories_page(org, cursor)).await
    }

    /// Lists every branch protection rule of a repository, in the order GitHub returns them.
    async fn list_branch_protection_rules(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<BranchProtectionRule>, Error> {
        collect_all_pages(|cursor| self.list_branch_protection_rules_page(org, repo, cursor))
            .await
    }
}

#[derive(Debug, Serialize)]
struct ListParams {
    per_page: u32,
}

/// A client for the GitHub REST and GraphQL APIs of one host.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
    endpoints: ApiEndpoints,
}

impl GitHubClient {
    /// Wraps an already configured `Octocrab` instance.
    ///
    /// The instance's base URI must match `endpoints.base_uri()`.
    pub fn new(client: Octocrab, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Posts a GraphQL document and unwraps the `data` member of the response.
    async fn graphql<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T, Error>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let request = GraphQlRequest { query, variables };
        debug!(operation = operation, "Sending GraphQL request");

        let response: OctocrabResult<GraphQlResponse<T>> = self
            .client
            .post(self.endpoints.graphql_path(), Some(&request))
            .await;

        match response {
            Ok(r) => r.into_data().map_err(|e| {
                error!(operation = operation, error = %e, "GraphQL request reported errors");
                e
            }),
            Err(e) => Err(map_octocrab_error(
                &format!("GraphQL request '{}' failed", operation),
                e,
            )),
        }
    }
}

#[async_trait]
impl OrganizationClient for GitHubClient {
    #[instrument(skip(self), fields(org = %org))]
    async fn list_org_webhooks(&self, org: &str) -> Result<Vec<Webhook>, Error> {
        let path = self.endpoints.rest_path(&format!("/orgs/{}/hooks", org));
        let result: OctocrabResult<Vec<Webhook>> = self
            .client
            .get(path, Some(&ListParams { per_page: PAGE_SIZE }))
            .await;

        match result {
            Ok(webhooks) => {
                info!(
                    org = org,
                    count = webhooks.len(),
                    "Retrieved organization webhooks"
                );
                Ok(webhooks)
            }
            Err(e) => Err(map_octocrab_error(
                "Failed to list organization webhooks",
                e,
            )),
        }
    }

    #[instrument(skip(self, payload), fields(org = %org, url = %payload.config.url))]
    async fn create_org_webhook(
        &self,
        org: &str,
        payload: &CreateWebhookPayload,
    ) -> Result<Webhook, Error> {
        let path = self.endpoints.rest_path(&format!("/orgs/{}/hooks", org));
        let result: OctocrabResult<Webhook> = self.client.post(path, Some(payload)).await;

        match result {
            Ok(webhook) => {
                info!(org = org, id = webhook.id, "Created organization webhook");
                Ok(webhook)
            }
            Err(e) => Err(map_octocrab_error(
                "Failed to create organization webhook",
                e,
            )),
        }
    }

    #[instrument(skip(self), fields(org = %org, repository = %name))]
    async fn get_repository(&self, org: &str, name: &str) -> Result<Repository, Error> {
        let data: RepositoryData = self
            .graphql(
                "getRepo",
                REPOSITORY_QUERY,
                json!({ "owner": org, "name": name }),
            )
            .await?;

        data.repository.ok_or(Error::NotFound)
    }

    #[instrument(skip(self), fields(org = %org))]
    async fn list_repositories_page(
        &self,
        org: &str,
        cursor: Option<String>,
    ) -> Result<Page<Repository>, Error> {
        let data: OrganizationRepositoriesData = self
            .graphql(
                "getRepos",
                REPOSITORIES_QUERY,
                json!({ "owner": org, "endCursor": cursor }),
            )
            .await?;

        data.organization
            .map(|o| o.repositories)
            .ok_or(Error::NotFound)
    }

    #[instrument(skip(self), fields(org = %org, repository = %repo))]
    async fn list_branch_protection_rules_page(
        &self,
        org: &str,
        repo: &str,
        cursor: Option<String>,
    ) -> Result<Page<BranchProtectionRule>, Error> {
        let data: BranchProtectionRulesData = self
            .graphql(
                "getBranchProtectionRules",
                BRANCH_PROTECTION_RULES_QUERY,
                json!({ "owner": org, "name": repo, "endCursor": cursor }),
            )
            .await?;

        data.repository
            .map(|r| r.branch_protection_rules)
            .ok_or(Error::NotFound)
    }

    #[instrument(skip(self, rule), fields(rule_id = %rule.id, pattern = %rule.pattern))]
    async fn update_branch_protection_rule(
        &self,
        rule: &BranchProtectionRule,
    ) -> Result<(), Error> {
        let input = UpdateBranchProtectionRuleInput::from(rule);
        let data: UpdateBranchProtectionRuleData = self
            .graphql(
                "updateBranchProtectionRule",
                UPDATE_BRANCH_PROTECTION_RULE_MUTATION,
                json!({ "input": input }),
            )
            .await?;

        if data.update_branch_protection_rule.is_none() {
            return Err(Error::InvalidResponse);
        }

        info!(rule_id = %rule.id, "Updated branch protection rule");
        Ok(())
    }
}

/// Creates a client for `endpoints` authenticated with a personal access token.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is not a valid URI or the underlying
/// HTTP client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, ApiEndpoints, Error, OrganizationClient};
/// use secrecy::SecretString;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     let endpoints = ApiEndpoints::for_host("github.com")?;
///     let token = SecretString::from("ghp_example".to_string());
///     let client = create_token_client(&token, &endpoints)?;
///
///     let hooks = client.list_org_webhooks("my-org").await?;
///     println!("{} webhooks", hooks.len());
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(
    token: &SecretString,
    endpoints: &ApiEndpoints,
) -> Result<GitHubClient, Error> {
    let octocrab = Octocrab::builder()
        .base_uri(endpoints.base_uri())
        .map_err(|e| {
            error!(base_uri = endpoints.base_uri(), error = %e, "Invalid API base URI");
            Error::AuthError(format!("Invalid API base URI: {}", endpoints.base_uri()))
        })?
        .add_header(http::header::ACCEPT, GITHUB_JSON_MEDIA_TYPE.to_string())
        .personal_token(token.expose_secret().to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with a personal token");
            Error::AuthError("Failed to build a token authenticated client.".to_string())
        })?;

    debug!(base_uri = endpoints.base_uri(), "Created token authenticated client");
    Ok(GitHubClient::new(octocrab, endpoints.clone()))
}

/// Logs an octocrab error and classifies it into a client [`Error`].
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code;
            error!(
                error_message = source.message,
                status = status.as_u16(),
                "{message}. Received an error from GitHub"
            );

            if status == http::StatusCode::NOT_FOUND {
                Error::NotFound
            } else if status == http::StatusCode::TOO_MANY_REQUESTS
                || (status == http::StatusCode::FORBIDDEN
                    && source.message.to_ascii_lowercase().contains("rate limit"))
            {
                Error::RateLimitExceeded
            } else {
                Error::ApiError(source.message)
            }
        }
        other => {
            let error_message = other.to_string();
            error!(error_message, "{message}. The request to GitHub failed");
            Error::ApiError(error_message)
        }
    }
}
