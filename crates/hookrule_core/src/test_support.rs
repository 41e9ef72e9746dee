//! An in-memory `OrganizationClient` that records every call made to it.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use github_client::{
    BranchProtectionRule, CreateWebhookPayload, Error as GitHubError, OrganizationClient, Page,
    Repository, Webhook, WebhookConfig,
};

/// A call received by [`FakeOrganizationClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListWebhooks(String),
    CreateWebhook(String, CreateWebhookPayload),
    GetRepository(String, String),
    ListRepositoriesPage(String, Option<String>),
    ListRulesPage(String, String, Option<String>),
    UpdateRule(BranchProtectionRule),
}

#[derive(Default)]
pub struct FakeOrganizationClient {
    pub webhooks: HashMap<String, Vec<Webhook>>,
    /// Pages returned for an organization's repositories, in order.
    pub repository_pages: HashMap<String, Vec<Page<Repository>>>,
    /// Pages returned for a repository's rules, keyed by repository name.
    pub rule_pages: HashMap<String, Vec<Page<BranchProtectionRule>>>,
    /// Webhook URLs whose creation fails.
    pub failing_webhook_urls: Vec<String>,
    /// Rule IDs whose update fails.
    pub failing_rule_ids: Vec<String>,
    /// Repository names whose lookup or rule listing fails.
    pub failing_repositories: Vec<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeOrganizationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Picks the page following `cursor`, where cursors are `"<n>"` page indexes.
    fn page_after<T: Clone>(pages: &[Page<T>], cursor: &Option<String>) -> Page<T> {
        let index = cursor
            .as_deref()
            .map(|c| c.parse::<usize>().unwrap())
            .unwrap_or(0);
        pages.get(index).cloned().unwrap_or_else(|| Page::last(vec![]))
    }
}

#[async_trait]
impl OrganizationClient for FakeOrganizationClient {
    async fn list_org_webhooks(&self, org: &str) -> Result<Vec<Webhook>, GitHubError> {
        self.record(Call::ListWebhooks(org.to_string()));
        self.webhooks.get(org).cloned().ok_or(GitHubError::NotFound)
    }

    async fn create_org_webhook(
        &self,
        org: &str,
        payload: &CreateWebhookPayload,
    ) -> Result<Webhook, GitHubError> {
        self.record(Call::CreateWebhook(org.to_string(), payload.clone()));
        if self.failing_webhook_urls.contains(&payload.config.url) {
            return Err(GitHubError::ApiError("Validation Failed".to_string()));
        }

        Ok(webhook(1000, &payload.config.url, payload.config.secret.as_deref()))
    }

    async fn get_repository(&self, org: &str, name: &str) -> Result<Repository, GitHubError> {
        self.record(Call::GetRepository(org.to_string(), name.to_string()));
        if self.failing_repositories.iter().any(|r| r == name) {
            return Err(GitHubError::GraphQl(format!(
                "Could not resolve to a Repository with the name '{org}/{name}'."
            )));
        }

        Ok(Repository::new(name.len() as u64, name, "PRIVATE"))
    }

    async fn list_repositories_page(
        &self,
        org: &str,
        cursor: Option<String>,
    ) -> Result<Page<Repository>, GitHubError> {
        self.record(Call::ListRepositoriesPage(org.to_string(), cursor.clone()));
        let pages = self.repository_pages.get(org).ok_or(GitHubError::NotFound)?;
        Ok(Self::page_after(pages, &cursor))
    }

    async fn list_branch_protection_rules_page(
        &self,
        org: &str,
        repo: &str,
        cursor: Option<String>,
    ) -> Result<Page<BranchProtectionRule>, GitHubError> {
        self.record(Call::ListRulesPage(
            org.to_string(),
            repo.to_string(),
            cursor.clone(),
        ));
        if self.failing_repositories.iter().any(|r| r == repo) {
            return Err(GitHubError::RateLimitExceeded);
        }

        let pages = self.rule_pages.get(repo).cloned().unwrap_or_default();
        Ok(Self::page_after(&pages, &cursor))
    }

    async fn update_branch_protection_rule(
        &self,
        rule: &BranchProtectionRule,
    ) -> Result<(), GitHubError> {
        self.record(Call::UpdateRule(rule.clone()));
        if self.failing_rule_ids.contains(&rule.id) {
            return Err(GitHubError::GraphQl(format!(
                "Could not resolve to a node with the global id of '{}'",
                rule.id
            )));
        }
        Ok(())
    }
}

pub fn webhook(id: u64, url: &str, secret: Option<&str>) -> Webhook {
    Webhook {
        hook_type: "Organization".to_string(),
        id,
        name: "web".to_string(),
        active: true,
        events: vec!["push".to_string()],
        config: WebhookConfig {
            url: url.to_string(),
            content_type: "json".to_string(),
            insecure_ssl: false,
            secret: secret.map(String::from),
        },
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    }
}

pub fn rule(id: &str, pattern: &str) -> BranchProtectionRule {
    BranchProtectionRule {
        id: id.to_string(),
        pattern: pattern.to_string(),
        ..Default::default()
    }
}
