use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while running a HookRule command.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read or write CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    GitHub(#[from] github_client::Error),

    #[error("Failed to access the report file: {0}")]
    Io(#[from] std::io::Error),

    /// A data row that cannot be mapped onto a record. `row` counts from 1 and includes the header.
    #[error("Row {row} is invalid: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Failed to read a replacement secret: {0}")]
    Prompt(String),
}
