//! CSV projection of branch protection rules.
//!
//! Each row pairs a rule with the repository it belongs to. Import is positional: the
//! repository columns are informational and the rule is targeted by its ID alone.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Writer};
use github_client::{BranchProtectionPolicy, BranchProtectionRule, Repository};
use tracing::debug;

use crate::fields::{format_bool, parse_bool_lenient, parse_count_lenient};
use crate::Error;

#[cfg(test)]
#[path = "branch_rule_csv_tests.rs"]
mod tests;

/// Header row of the branch protection rule report.
pub const BRANCH_RULE_REPORT_HEADERS: [&str; 23] = [
    "RepositoryName",
    "RepositoryID",
    "BranchProtectionRulePattern",
    "BranchProtectionRuleId",
    "AllowsDeletions",
    "AllowsForcePushes",
    "BlockCreations",
    "DismissesStaleReviews",
    "IsAdminEnforced",
    "LockAllowsFetchAndMerge",
    "LockBranch",
    "RequireLastPushApproval",
    "RequiredApprovingReviewCount",
    "RequiresApprovingReviews",
    "RequiresCodeOwnerReviews",
    "RequiresCommitSignatures",
    "RequiresConversationResolution",
    "RequiresDeployments",
    "RequiresLinearHistory",
    "RequiresStatusChecks",
    "RequiresStrictStatusChecks",
    "RestrictsPushes",
    "RestrictsReviewDismissals",
];

const PATTERN_COLUMN: usize = 2;
const RULE_ID_COLUMN: usize = 3;
const FIRST_POLICY_COLUMN: usize = 4;

/// A rule together with the repository it protects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRuleRow {
    pub repository: Repository,
    pub rule: BranchProtectionRule,
}

/// Writes the header followed by one row per rule, in the given order.
pub fn write_branch_rule_report<W: Write>(writer: W, rows: &[BranchRuleRow]) -> Result<(), Error> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(BRANCH_RULE_REPORT_HEADERS)?;

    for row in rows {
        csv_writer.write_record(branch_rule_record(&row.repository, &row.rule))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Projects a rule of `repository` onto the report columns.
pub fn branch_rule_record(repository: &Repository, rule: &BranchProtectionRule) -> Vec<String> {
    let p = &rule.policy;
    let mut record = vec![
        repository.name.clone(),
        repository.database_id.to_string(),
        rule.pattern.clone(),
        rule.id.clone(),
    ];

    record.extend(
        [
            p.allows_deletions,
            p.allows_force_pushes,
            p.blocks_creations,
            p.dismisses_stale_reviews,
            p.is_admin_enforced,
            p.lock_allows_fetch_and_merge,
            p.lock_branch,
            p.require_last_push_approval,
        ]
        .into_iter()
        .map(|v| format_bool(v).to_string()),
    );
    record.push(p.required_approving_review_count.to_string());
    record.extend(
        [
            p.requires_approving_reviews,
            p.requires_code_owner_reviews,
            p.requires_commit_signatures,
            p.requires_conversation_resolution,
            p.requires_deployments,
            p.requires_linear_history,
            p.requires_status_checks,
            p.requires_strict_status_checks,
            p.restricts_pushes,
            p.restricts_review_dismissals,
        ]
        .into_iter()
        .map(|v| format_bool(v).to_string()),
    );

    record
}

/// Reads rule updates from a report shaped CSV file.
///
/// The first row is always skipped. Every following row yields either the rule to apply
/// or the reason the row could not be read. Cells that are not valid booleans or counts
/// are read as `false` and `0`.
///
/// # Errors
///
/// Returns `Error::Csv` if the underlying reader fails.
pub fn read_branch_rule_updates<R: Read>(
    reader: R,
) -> Result<Vec<Result<BranchProtectionRule, Error>>, Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut updates = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 2;
        match record {
            Ok(record) => updates.push(branch_rule_update(row, &record)),
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => updates.push(Err(Error::InvalidRow {
                row,
                reason: e.to_string(),
            })),
        }
    }

    debug!(rows = updates.len(), "Read branch protection rule updates");
    Ok(updates)
}

fn branch_rule_update(row: usize, record: &StringRecord) -> Result<BranchProtectionRule, Error> {
    if record.len() < BRANCH_RULE_REPORT_HEADERS.len() {
        return Err(Error::InvalidRow {
            row,
            reason: format!(
                "expected {} columns, found {}",
                BRANCH_RULE_REPORT_HEADERS.len(),
                record.len()
            ),
        });
    }

    let cell = |column: usize| record.get(column).unwrap_or_default();
    let flag = |offset: usize| parse_bool_lenient(cell(FIRST_POLICY_COLUMN + offset));

    Ok(BranchProtectionRule {
        id: cell(RULE_ID_COLUMN).to_string(),
        pattern: cell(PATTERN_COLUMN).to_string(),
        policy: BranchProtectionPolicy {
            allows_deletions: flag(0),
            allows_force_pushes: flag(1),
            blocks_creations: flag(2),
            dismisses_stale_reviews: flag(3),
            is_admin_enforced: flag(4),
            lock_allows_fetch_and_merge: flag(5),
            lock_branch: flag(6),
            require_last_push_approval: flag(7),
            required_approving_review_count: parse_count_lenient(cell(FIRST_POLICY_COLUMN + 8)),
            requires_approving_reviews: flag(9),
            requires_code_owner_reviews: flag(10),
            requires_commit_signatures: flag(11),
            requires_conversation_resolution: flag(12),
            requires_deployments: flag(13),
            requires_linear_history: flag(14),
            requires_status_checks: flag(15),
            requires_strict_status_checks: flag(16),
            restricts_pushes: flag(17),
            restricts_review_dismissals: flag(18),
        },
    })
}
