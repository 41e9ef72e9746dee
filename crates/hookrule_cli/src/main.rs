use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Password};
use tracing::instrument::WithSubscriber;

use hookrule_cli::{
    commands::{
        auth_cmd::{self, AuthCommands},
        branch_rules_cmd::{self, BranchRuleCommands},
        webhooks_cmd::{self, WebhookCommands},
    },
    config::AppConfig,
    errors::Error,
    logging,
};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// HookRule CLI: Manage organization webhooks and branch protection rules with CSV files
#[derive(Parser, Debug)]
#[command(name = "hookrule")]
#[command(
    about = "Manage GitHub organization webhooks and branch protection rules with CSV files",
    long_about = None
)]
struct Cli {
    /// Path to the configuration file [default: ./hookrule.toml]
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List and create organization webhooks
    #[command(subcommand)]
    Webhooks(WebhookCommands),

    /// List and update repository branch protection rules
    #[command(subcommand)]
    BranchRules(BranchRuleCommands),

    #[command(subcommand)]
    Auth(AuthCommands),

    /// Show the CLI version
    Version,
}

impl Commands {
    fn debug_enabled(&self) -> bool {
        match self {
            Commands::Webhooks(cmd) => cmd.connection().debug,
            Commands::BranchRules(cmd) => cmd.connection().debug,
            Commands::Auth(_) | Commands::Version => false,
        }
    }
}

fn ask_user_for_secret(request: &str) -> Result<String, hookrule_core::Error> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(request.trim_end_matches(':'))
        .interact()
        .map_err(|e| hookrule_core::Error::Prompt(e.to_string()))
}

fn ask_user_for_token(request: &str) -> Result<String, Error> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(request)
        .interact()
        .map_err(|e| Error::Auth(format!("Failed to read input: {}", e)))
}

async fn run(cli: Cli) -> Result<(), Error> {
    if let Commands::Version = cli.command {
        println!(
            "hookrule version {}",
            option_env!("HOOKRULE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
        );
        return Ok(());
    }

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    match &cli.command {
        Commands::Webhooks(cmd) => webhooks_cmd::execute(cmd, &config, &ask_user_for_secret).await,
        Commands::BranchRules(cmd) => branch_rules_cmd::execute(cmd, &config).await,
        Commands::Auth(cmd) => auth_cmd::execute(cmd, &config, &ask_user_for_token),
        Commands::Version => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    let subscriber = logging::build_subscriber(cli.command.debug_enabled());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start the async runtime: {e}");
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(cli).with_subscriber(subscriber)) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
