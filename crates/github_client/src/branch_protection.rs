//! Branch protection rule types.
//!
//! This module contains the GraphQL shape of a repository's branch protection rules and
//! the input of the `updateBranchProtectionRule` mutation.

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// A branch protection rule of a single repository.
///
/// The `id` is the opaque GraphQL node ID of the rule. It is the only handle used to
/// target updates and must be passed back unchanged.
///
/// # Examples
///
/// ```rust
/// use github_client::{BranchProtectionPolicy, BranchProtectionRule};
///
/// let rule = BranchProtectionRule {
///     id: "BPR_kwDOAbc123".to_string(),
///     pattern: "release/*".to_string(),
///     policy: BranchProtectionPolicy {
///         requires_approving_reviews: true,
///         required_approving_review_count: 2,
///         ..Default::default()
///     },
/// };
///
/// assert_eq!(rule.policy.required_approving_review_count, 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchProtectionRule {
    pub id: String,
    pub pattern: String,
    #[serde(flatten)]
    pub policy: BranchProtectionPolicy,
}

/// The policy toggles of a branch protection rule.
///
/// Field order follows the column order of the branch rule CSV report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BranchProtectionPolicy {
    pub allows_deletions: bool,
    pub allows_force_pushes: bool,
    pub blocks_creations: bool,
    pub dismisses_stale_reviews: bool,
    pub is_admin_enforced: bool,
    pub lock_allows_fetch_and_merge: bool,
    pub lock_branch: bool,
    pub require_last_push_approval: bool,
    /// Number of approving reviews needed; GitHub returns null when reviews are off
    #[serde(default, deserialize_with = "deserialize_review_count")]
    pub required_approving_review_count: u32,
    pub requires_approving_reviews: bool,
    pub requires_code_owner_reviews: bool,
    pub requires_commit_signatures: bool,
    pub requires_conversation_resolution: bool,
    pub requires_deployments: bool,
    pub requires_linear_history: bool,
    pub requires_status_checks: bool,
    pub requires_strict_status_checks: bool,
    pub restricts_pushes: bool,
    pub restricts_review_dismissals: bool,
}

/// Input of the `updateBranchProtectionRule` GraphQL mutation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchProtectionRuleInput {
    pub branch_protection_rule_id: String,
    pub pattern: String,
    #[serde(flatten)]
    pub policy: BranchProtectionPolicy,
}

impl From<&BranchProtectionRule> for UpdateBranchProtectionRuleInput {
    fn from(rule: &BranchProtectionRule) -> Self {
        Self {
            branch_protection_rule_id: rule.id.clone(),
            pattern: rule.pattern.clone(),
            policy: rule.policy.clone(),
        }
    }
}

fn deserialize_review_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}
