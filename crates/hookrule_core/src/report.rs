//! Per-item outcomes of a batch of remote changes.

use crate::Error;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Outcome of applying a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Applied,
    Failed(String),
}

/// One attempted item of a batch, identified by a human readable label
/// such as a webhook URL or a rule ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub label: String,
    pub status: ItemStatus,
}

/// Result of a best-effort batch in which every item is attempted independently.
///
/// Outcomes are kept in the order the items were attempted. A batch with failed items
/// still ran to completion; callers decide how to surface the failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_applied(&mut self, label: impl Into<String>) {
        self.outcomes.push(ItemOutcome {
            label: label.into(),
            status: ItemStatus::Applied,
        });
    }

    pub fn record_failed(&mut self, label: impl Into<String>, reason: impl Into<String>) {
        self.outcomes.push(ItemOutcome {
            label: label.into(),
            status: ItemStatus::Failed(reason.into()),
        });
    }

    /// Number of items that were applied.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ItemStatus::Applied)
            .count()
    }

    /// Number of items that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Returns true if no item failed. An empty batch is a success.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Iterates over the failed items as `(label, reason)` pairs.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            ItemStatus::Failed(reason) => Some((o.label.as_str(), reason.as_str())),
            ItemStatus::Applied => None,
        })
    }
}

/// Label of an input row that could not be read.
pub(crate) fn unreadable_row_label(error: &Error) -> String {
    match error {
        Error::InvalidRow { row, .. } => format!("row {}", row),
        _ => "unreadable row".to_string(),
    }
}
