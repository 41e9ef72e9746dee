//! `hookrule branch-rules` commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use hookrule_core::{
    branch_rule_csv::read_branch_rule_updates,
    branch_rules::{list_branch_rules, update_branch_rules},
};
use tracing::{info, instrument, warn};

use super::{create_report_file, open_input_file, report_path, ConnectionArgs};
use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "branch_rules_cmd_tests.rs"]
mod tests;

/// File name prefix of generated branch protection rule reports.
pub const BRANCH_RULE_REPORT_PREFIX: &str = "BranchRulesReport";

#[derive(Subcommand, Debug)]
pub enum BranchRuleCommands {
    /// List the branch protection rules of an organization's repositories to a CSV report
    List(ListBranchRulesArgs),

    /// Update existing branch protection rules from a CSV report
    Update(UpdateBranchRulesArgs),
}

impl BranchRuleCommands {
    pub fn connection(&self) -> &ConnectionArgs {
        match self {
            BranchRuleCommands::List(args) => &args.connection,
            BranchRuleCommands::Update(args) => &args.connection,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListBranchRulesArgs {
    /// Organization to list the branch protection rules of
    pub org: String,

    /// Only list these repositories (comma separated) instead of every repository
    #[arg(short = 'r', long = "repos", value_delimiter = ',')]
    pub repositories: Vec<String>,

    /// Name of the report file [default: BranchRulesReport-<timestamp>.csv]
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct UpdateBranchRulesArgs {
    /// Organization the rules belong to
    pub org: String,

    /// CSV file with the rules to update
    #[arg(short = 'f', long = "from-file")]
    pub from_file: PathBuf,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Executes a branch protection rule command.
#[instrument(skip_all)]
pub async fn execute(cmd: &BranchRuleCommands, config: &AppConfig) -> Result<(), Error> {
    match cmd {
        BranchRuleCommands::List(args) => list(args, config).await,
        BranchRuleCommands::Update(args) => update(args, config).await,
    }
}

async fn list(args: &ListBranchRulesArgs, config: &AppConfig) -> Result<(), Error> {
    let client = args.connection.connect(config)?;
    let path = report_path(args.output_file.as_ref(), BRANCH_RULE_REPORT_PREFIX);
    let writer = create_report_file(&path)?;

    let count = list_branch_rules(&client, &args.org, &args.repositories, writer).await?;
    info!(
        org = %args.org,
        count = count,
        path = ?path,
        "Wrote branch protection rule report"
    );

    println!("Successfully listed branch protection rules for {}", args.org);
    Ok(())
}

async fn update(args: &UpdateBranchRulesArgs, config: &AppConfig) -> Result<(), Error> {
    let client = args.connection.connect(config)?;
    let rows = read_branch_rule_updates(open_input_file(&args.from_file)?)?;

    info!(
        org = %args.org,
        file = ?args.from_file,
        rows = rows.len(),
        "Updating branch protection rules"
    );
    let report = update_branch_rules(&client, rows).await;
    if !report.is_success() {
        warn!(
            org = %args.org,
            failed = report.failed(),
            "Not every branch protection rule was updated, see the errors above"
        );
    }

    println!(
        "Successfully updated branch protection policies from {} in org {}",
        args.from_file.display(),
        args.org
    );
    Ok(())
}
