//! External command execution.
//!
//! Every tool the installer drives (nuget, SyncReleases, Update.com) goes
//! through a [`CommandRunner`]. [`ProcessRunner`] is the real implementation;
//! tests substitute a recorder.

use crate::bundler::error::{Error, Result};
use std::{
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

/// A fully described external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    current_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CommandSpec {
    /// Start describing an invocation of `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
            timeout: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child (the rest is inherited).
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Run the child in `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Kill the child if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Extra environment variables.
    pub fn get_envs(&self) -> &[(String, String)] {
        &self.envs
    }

    /// Working directory, if overridden.
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Timeout, if any.
    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Human-readable command line for logs and errors.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Executes external commands.
///
/// Implementations resolve to the captured standard output on success and
/// fail with one of the execution errors ([`Error::CommandFailed`],
/// [`Error::CommandExit`], [`Error::CommandTimeout`]) otherwise. No retries.
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion.
    fn run(&self, spec: &CommandSpec) -> impl Future<Output = Result<String>> + Send;
}

/// Runs commands as child processes via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<String> {
        let command_name = spec.program().display().to_string();
        log::debug!("Running: {}", spec.display());

        let mut command = tokio::process::Command::new(spec.program());
        command
            .args(spec.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (key, value) in spec.get_envs() {
            command.env(key, value);
        }
        if let Some(dir) = spec.get_current_dir() {
            command.current_dir(dir);
        }

        let output = match spec.get_timeout() {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| Error::CommandTimeout {
                    command: command_name.clone(),
                    timeout: limit,
                })?,
            None => command.output().await,
        }
        .map_err(|error| Error::CommandFailed {
            command: command_name.clone(),
            error,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(Error::CommandExit {
                command: command_name,
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            log::debug!("{} stderr: {}", command_name, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
