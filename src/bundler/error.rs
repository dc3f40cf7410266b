//! Error types for installer operations.
//!
//! Provides contextual error chaining, filesystem errors that carry the
//! offending path, and the external command failures the pipeline reports.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//! - **ErrorKind**: Coarse classification used by callers and tests
//!
//! # Example
//!
//! ```no_run
//! use squirrel_installer::bundler::error::{ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_template(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).fs_context("reading manifest template", path)
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::PathBuf,
    time::Duration,
};
use thiserror::Error as DeriveError;

/// Errors returned by the installer.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Required configuration is missing or unusable.
    #[error("{0}")]
    Validation(String),

    /// Neither metadata layout exists or parses under the application directory.
    #[error(
        "Neither resources/app folder nor resources/app.asar package were found in {}",
        app_directory.display()
    )]
    MetadataNotFound {
        /// Application directory that was searched
        app_directory: PathBuf,
    },

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// Context describing the operation (e.g., "copying helper executable")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// External command could not be started.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// External command ran and reported failure.
    #[error("command {command} returned non-zero code ({status}) with error output {stderr}")]
    CommandExit {
        /// Command that failed
        command: String,
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// External command exceeded the configured timeout and was killed.
    #[error("command {command} timed out after {}s", timeout.as_secs_f64())]
    CommandTimeout {
        /// Command that timed out
        command: String,
        /// Configured limit
        timeout: Duration,
    },

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    Render(#[from] handlebars::RenderError),

    /// Malformed asar archive.
    #[error("invalid asar archive {}: {reason}", path.display())]
    InvalidArchive {
        /// Archive path
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// JSON deserialization error (option files, package.json, asar headers).
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing required configuration
    Validation,
    /// No metadata layout found or parseable
    MetadataNotFound,
    /// External process failed to start, exited non-zero, or timed out
    Execution,
    /// Manifest template malformed or failed to render
    Template,
    /// Copy, write or rename failure
    Filesystem,
    /// Anything else
    Other,
}

impl Error {
    /// Classify this error, looking through [`Error::Context`] wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context(_, inner) => inner.kind(),
            Self::Validation(_) => ErrorKind::Validation,
            Self::MetadataNotFound { .. } => ErrorKind::MetadataNotFound,
            Self::CommandFailed { .. } | Self::CommandExit { .. } | Self::CommandTimeout { .. } => {
                ErrorKind::Execution
            }
            Self::Template(_) | Self::Render(_) => ErrorKind::Template,
            Self::Fs { .. } | Self::IoError(_) => ErrorKind::Filesystem,
            _ => ErrorKind::Other,
        }
    }

    /// Captured standard error of a failed command, if this is one.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Context(_, inner) => inner.stderr(),
            Self::CommandExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the installer's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying helper executable".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("{} is not a file", path.display());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sees_through_context() {
        let err: Result<()> = Err(Error::CommandExit {
            command: "nuget.exe".into(),
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        });
        let err = err.context("packaging").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.stderr(), Some("boom"));
        assert!(err.to_string().starts_with("packaging: "));
    }

    #[test]
    fn test_fs_context_keeps_path() {
        let err = std::fs::read("/definitely/not/here/Setup.exe")
            .fs_context("renaming setup executable", "/definitely/not/here/Setup.exe")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert!(err.to_string().contains("/definitely/not/here/Setup.exe"));
    }

    #[test]
    fn test_option_context() {
        let missing: Option<u8> = None;
        let err = missing.context("no nupkg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.to_string(), "no nupkg");
    }

    #[test]
    fn test_with_context_is_lazy() {
        let ok: Result<u8> = Ok(1);
        let value = ok
            .with_context(|| -> String { unreachable!("context built on success") })
            .unwrap();
        assert_eq!(value, 1);

        let failed: Result<()> = Err(Error::Validation("no app".into()));
        let err = failed
            .with_context(|| format!("step {}", "package"))
            .unwrap_err();
        assert_eq!(err.to_string(), "step package: no app");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    fn bail_when(fail: bool) -> Result<u8> {
        if fail {
            crate::bail!("{} is not a file", "Update.exe");
        }
        Ok(7)
    }

    #[test]
    fn test_bail_returns_generic_error() {
        assert_eq!(bail_when(false).unwrap(), 7);
        let err = bail_when(true).unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "Update.exe is not a file"));
    }
}
