//! Top-level error types for the command line tool.
//!
//! Wraps installer errors with CLI failures and maps them to actionable hints.

use crate::bundler::ErrorKind;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Main error type surfaced by the binary
#[derive(Error, Debug)]
pub enum InstallerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Installer errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl InstallerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let Self::Bundler(error) = self else {
            return vec!["Run with --help to see the accepted arguments".to_string()];
        };

        match error.kind() {
            ErrorKind::Validation => vec![
                "Pass --app-directory or set \"appDirectory\" in the options file".to_string(),
            ],
            ErrorKind::MetadataNotFound => vec![
                "Point --app-directory at the packaged app (the folder containing resources/)"
                    .to_string(),
            ],
            ErrorKind::Execution => vec![
                "Check that --vendor-directory contains nuget.exe, Update.com and Update.exe"
                    .to_string(),
                "On Linux and macOS the tools need wine on PATH".to_string(),
            ],
            ErrorKind::Template => {
                vec!["Check the handlebars syntax of the nuspec template".to_string()]
            }
            ErrorKind::Filesystem => {
                vec!["Make sure no running process holds the files open".to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Exit code for this error: 2 for usage problems, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cli(_) => 2,
            Self::Bundler(e) if e.kind() == ErrorKind::Validation => 2,
            _ => 1,
        }
    }
}
