//! GraphQL documents and response envelopes.

use serde::{Deserialize, Serialize};

use crate::{models::Repository, BranchProtectionRule, Error, Page};

#[cfg(test)]
#[path = "graphql_tests.rs"]
mod tests;

pub(crate) const REPOSITORIES_QUERY: &str = r#"query getRepos($owner: String!, $endCursor: String) {
  organization(login: $owner) {
    repositories(first: 100, after: $endCursor) {
      nodes { databaseId name visibility }
      pageInfo { endCursor hasNextPage }
    }
  }
}"#;

pub(crate) const REPOSITORY_QUERY: &str = r#"query getRepo($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) { databaseId name visibility }
}"#;

pub(crate) const BRANCH_PROTECTION_RULES_QUERY: &str = r#"query getBranchProtectionRules($owner: String!, $name: String!, $endCursor: String) {
  repository(owner: $owner, name: $name) {
    branchProtectionRules(first: 100, after: $endCursor) {
      nodes {
        id
        pattern
        allowsDeletions
        allowsForcePushes
        blocksCreations
        dismissesStaleReviews
        isAdminEnforced
        lockAllowsFetchAndMerge
        lockBranch
        requireLastPushApproval
        requiredApprovingReviewCount
        requiresApprovingReviews
        requiresCodeOwnerReviews
        requiresCommitSignatures
        requiresConversationResolution
        requiresDeployments
        requiresLinearHistory
        requiresStatusChecks
        requiresStrictStatusChecks
        restrictsPushes
        restrictsReviewDismissals
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}"#;

pub(crate) const UPDATE_BRANCH_PROTECTION_RULE_MUTATION: &str = r#"mutation updateBranchProtectionRule($input: UpdateBranchProtectionRuleInput!) {
  updateBranchProtectionRule(input: $input) { clientMutationId }
}"#;

/// Request body posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Returns the data of a response, or the reported errors joined into one.
    pub(crate) fn into_data(self) -> Result<T, Error> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }

        self.data.ok_or(Error::InvalidResponse)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationRepositoriesData {
    pub organization: Option<OrganizationRepositories>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationRepositories {
    pub repositories: Page<Repository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryData {
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BranchProtectionRulesData {
    pub repository: Option<RepositoryBranchProtectionRules>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryBranchProtectionRules {
    pub branch_protection_rules: Page<BranchProtectionRule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBranchProtectionRuleData {
    pub update_branch_protection_rule: Option<serde_json::Value>,
}
