//! # Models
//!
//! Organization level data models shared by the REST and GraphQL operations.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A repository as returned by the GraphQL `repository` and `repositories` fields.
///
/// Only the identity of the repository is read; it serves as the key for enumerating
/// its branch protection rules.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Repository;
///
/// let repo: Repository = serde_json::from_str(
///     r#"{"databaseId": 42, "name": "widgets", "visibility": "PRIVATE"}"#,
/// ).unwrap();
///
/// assert_eq!(repo.database_id, 42);
/// assert_eq!(repo.name, "widgets");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// The numeric (REST) ID of the repository
    pub database_id: u64,
    /// The name of the repository, without the owner
    pub name: String,
    /// `PUBLIC`, `PRIVATE` or `INTERNAL`
    pub visibility: String,
}

impl Repository {
    pub fn new(database_id: u64, name: impl Into<String>, visibility: impl Into<String>) -> Self {
        Self {
            database_id,
            name: name.into(),
            visibility: visibility.into(),
        }
    }
}
