//! Error types for REPL commands

use thiserror::Error;

/// Errors from a single REPL command. The loop reports them and carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no widget {index} (have {count})")]
    UnknownWidget { index: usize, count: usize },

    #[error("invalid duration '{input}': expected e.g. 250ms, 2s or 40")]
    InvalidDuration { input: String },
}
