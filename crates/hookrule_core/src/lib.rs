//! # HookRule Core
//!
//! The commands of HookRule, written against the [`OrganizationClient`] trait so they can
//! run against GitHub or an in-memory double.
//!
//! - [`webhooks::list_webhooks`] and [`branch_rules::list_branch_rules`] write CSV reports.
//! - [`webhooks::create_webhooks`] creates webhooks read from a report or copied from
//!   another organization.
//! - [`branch_rules::update_branch_rules`] applies an edited branch rule report.
//!
//! The bulk commands attempt every item and return a [`BatchReport`] describing what
//! happened to each one, instead of stopping at the first failure.
//!
//! ## Examples
//!
//! ```no_run
//! use github_client::{create_token_client, ApiEndpoints};
//! use hookrule_core::{branch_rule_csv::read_branch_rule_updates, branch_rules};
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoints = ApiEndpoints::for_host("github.com")?;
//! let client = create_token_client(&SecretString::from("ghp_example".to_string()), &endpoints)?;
//!
//! let rows = read_branch_rule_updates(std::fs::File::open("rules.csv")?)?;
//! let report = branch_rules::update_branch_rules(&client, rows).await;
//! println!("{} updated, {} failed", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```
//!
//! [`OrganizationClient`]: github_client::OrganizationClient

pub mod branch_rule_csv;
pub mod branch_rules;
pub mod errors;
pub mod fields;
pub mod report;
pub mod webhook_csv;
pub mod webhooks;

pub use errors::Error;
pub use report::{BatchReport, ItemOutcome, ItemStatus};

#[cfg(test)]
mod test_support;
