//! Log output of the CLI.
//!
//! The subscriber is built once per run and attached to the command future, so nothing
//! is installed as the process-wide default.

use tracing::Subscriber;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive that overrides the defaults.
pub const LOG_ENV_VAR: &str = "HOOKRULE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";
const DEBUG_DIRECTIVES: &str = "info,hookrule_cli=debug,hookrule_core=debug,github_client=debug";

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Chooses the filter directives: the environment value if set, otherwise the defaults
/// for the requested verbosity.
pub fn filter_directives(debug: bool, env_value: Option<String>) -> String {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(directives) => directives,
        None if debug => DEBUG_DIRECTIVES.to_string(),
        None => DEFAULT_DIRECTIVES.to_string(),
    }
}

/// Builds the subscriber that writes log lines to stderr.
pub fn build_subscriber(debug: bool) -> impl Subscriber + Send + Sync {
    let directives = filter_directives(debug, std::env::var(LOG_ENV_VAR).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!(
            "Ignoring invalid {} value '{}': {}",
            LOG_ENV_VAR, directives, e
        );
        EnvFilter::new(DEFAULT_DIRECTIVES)
    });

    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(debug),
    )
}
