//! Listing and updating branch protection rules across an organization.

use std::io::Write;

use github_client::{BranchProtectionRule, OrganizationClient, Repository};
use tracing::{debug, error, info, instrument, warn};

use crate::branch_rule_csv::{write_branch_rule_report, BranchRuleRow};
use crate::report::{unreadable_row_label, BatchReport};
use crate::Error;

#[cfg(test)]
#[path = "branch_rules_tests.rs"]
mod tests;

/// Writes a report of the branch protection rules of `org` and returns the number of rules.
///
/// When `repositories` is empty every repository of the organization is included,
/// otherwise only the named ones, looked up one at a time in the given order.
/// Repositories without rules add no rows.
///
/// # Errors
///
/// Fails before any row is written if a repository or any page of rules cannot be fetched.
#[instrument(skip(client, writer))]
pub async fn list_branch_rules<W: Write>(
    client: &dyn OrganizationClient,
    org: &str,
    repositories: &[String],
    writer: W,
) -> Result<usize, Error> {
    let repos = resolve_repositories(client, org, repositories).await?;

    let mut rows = Vec::new();
    for repository in repos {
        let rules = client
            .list_branch_protection_rules(org, &repository.name)
            .await?;
        debug!(
            repository = %repository.name,
            count = rules.len(),
            "Gathered branch protection rules"
        );

        rows.extend(rules.into_iter().map(|rule| BranchRuleRow {
            repository: repository.clone(),
            rule,
        }));
    }

    write_branch_rule_report(writer, &rows)?;
    Ok(rows.len())
}

async fn resolve_repositories(
    client: &dyn OrganizationClient,
    org: &str,
    names: &[String],
) -> Result<Vec<Repository>, Error> {
    if names.is_empty() {
        let repos = client.list_repositories(org).await?;
        info!(org = org, count = repos.len(), "Gathered organization repositories");
        return Ok(repos);
    }

    let mut repos = Vec::with_capacity(names.len());
    for name in names {
        repos.push(client.get_repository(org, name).await?);
    }
    Ok(repos)
}

/// Applies each rule with one update call per rule, in the given order.
///
/// Rows that could not be read are recorded as failed without a call. A failed update is
/// recorded and the remaining rules are still applied.
#[instrument(skip(client, rows), fields(count = rows.len()))]
pub async fn update_branch_rules(
    client: &dyn OrganizationClient,
    rows: Vec<Result<BranchProtectionRule, Error>>,
) -> BatchReport {
    let mut report = BatchReport::new();

    for row in rows {
        let rule = match row {
            Ok(rule) => rule,
            Err(e) => {
                error!(error = %e, "Skipping unreadable branch protection rule row");
                report.record_failed(unreadable_row_label(&e), e.to_string());
                continue;
            }
        };

        debug!(
            rule_id = %rule.id,
            pattern = %rule.pattern,
            "Updating branch protection rule"
        );
        match client.update_branch_protection_rule(&rule).await {
            Ok(()) => report.record_applied(rule.id),
            Err(e) => {
                error!(
                    rule_id = %rule.id,
                    pattern = %rule.pattern,
                    error = %e,
                    "Failed to update branch protection rule"
                );
                report.record_failed(rule.id, e.to_string());
            }
        }
    }

    if !report.is_success() {
        warn!(
            failed = report.failed(),
            succeeded = report.succeeded(),
            "Some branch protection rules were not updated"
        );
    }

    report
}
