//! Installer pipeline orchestration.
//!
//! This module provides the [`Installer`] that runs the Squirrel steps in
//! order against a resolved [`Configuration`].

use crate::bundler::{
    Configuration, Result,
    error::Context,
    platform::windows::squirrel::{self, Toolset},
    utils::process::{CommandRunner, ProcessRunner},
};
use std::{fmt, path::PathBuf};

/// One stage of the installer pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Copy Update.exe into the application directory
    StageHelper,
    /// Render the nuspec into a temporary directory
    RenderManifest,
    /// Run nuget to produce `<name>.<version>.nupkg`
    Package,
    /// Pull previous releases from the remote feed, if one is configured
    SyncReleases,
    /// Run Update.com to produce Setup.exe and the release files
    Releasify,
    /// Rename Setup.exe after the product name, if one is declared
    FinalizeSetup,
}

impl Step {
    /// Every step, in the order the pipeline runs them.
    pub const ALL: [Step; 6] = [
        Step::StageHelper,
        Step::RenderManifest,
        Step::Package,
        Step::SyncReleases,
        Step::Releasify,
        Step::FinalizeSetup,
    ];

    fn description(self) -> &'static str {
        match self {
            Step::StageHelper => "Staging Update.exe",
            Step::RenderManifest => "Rendering nuspec",
            Step::Package => "Packing with nuget",
            Step::SyncReleases => "Syncing remote releases",
            Step::Releasify => "Releasifying",
            Step::FinalizeSetup => "Finalizing Setup.exe",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::StageHelper => "stage-helper",
            Step::RenderManifest => "render-manifest",
            Step::Package => "package",
            Step::SyncReleases => "sync-releases",
            Step::Releasify => "releasify",
            Step::FinalizeSetup => "finalize-setup",
        };
        f.write_str(name)
    }
}

/// Paths handed from one step to the next.
#[derive(Debug, Default)]
struct RunState {
    nuspec: Option<PathBuf>,
    nuget_output: Option<PathBuf>,
}

/// Installer pipeline.
///
/// Runs [`Step::ALL`] in order, stopping at the first failure. The error of
/// the failing step is returned as is.
///
/// # Examples
///
/// ```no_run
/// use squirrel_installer::bundler::{ConfigurationBuilder, Installer};
///
/// # async fn example() -> squirrel_installer::bundler::Result<()> {
/// let config = ConfigurationBuilder::new()
///     .app_directory("dist/win-unpacked")
///     .build()?;
///
/// Installer::new(config).create_installer().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Installer<R = ProcessRunner> {
    config: Configuration,
    toolset: Toolset,
    runner: R,
}

impl Installer<ProcessRunner> {
    /// Creates an installer that runs the real tools from the configured vendor directory.
    pub fn new(config: Configuration) -> Self {
        let toolset = Toolset::detect(config.vendor_directory());
        Self::with_runner(config, toolset, ProcessRunner::new())
    }
}

impl<R: CommandRunner> Installer<R> {
    /// Creates an installer with an explicit toolset and command runner.
    pub fn with_runner(config: Configuration, toolset: Toolset, runner: R) -> Self {
        Self {
            config,
            toolset,
            runner,
        }
    }

    /// Runs the whole pipeline.
    ///
    /// On success `Setup.exe` (or `<productName>Setup.exe`), `RELEASES` and
    /// the full nupkg are in the output directory.
    pub async fn create_installer(&self) -> Result<()> {
        let mut state = RunState::default();

        for step in Step::ALL {
            log::info!("{}", step.description());
            if let Err(e) = self.run_step(step, &mut state).await {
                log::error!("Step {} failed: {}", step, e);
                return Err(e);
            }
        }

        log::info!(
            "Installer for {} {} written to {}",
            self.config.name(),
            self.config.version(),
            self.config.output_directory().display()
        );
        Ok(())
    }

    async fn run_step(&self, step: Step, state: &mut RunState) -> Result<()> {
        let config = &self.config;
        let toolset = &self.toolset;

        match step {
            Step::StageHelper => {
                let helper = squirrel::stage_helper(config, toolset).await?;
                log::debug!("Staged {}", helper.display());
            }
            Step::RenderManifest => {
                state.nuspec = Some(squirrel::render_manifest(config).await?);
            }
            Step::Package => {
                let nuspec = state
                    .nuspec
                    .as_deref()
                    .with_context(|| format!("step {step} requires a rendered nuspec"))?;
                let nupkg = squirrel::package(config, toolset, &self.runner, nuspec).await?;
                log::debug!("Packed {}", nupkg.display());
                state.nuget_output = nupkg.parent().map(PathBuf::from);
            }
            Step::SyncReleases => {
                squirrel::sync_releases(config, toolset, &self.runner).await?;
            }
            Step::Releasify => {
                let nuget_output = state
                    .nuget_output
                    .as_deref()
                    .with_context(|| format!("step {step} requires a nuget package"))?;
                squirrel::releasify(config, toolset, &self.runner, nuget_output).await?;
            }
            Step::FinalizeSetup => {
                if let Some(setup) = squirrel::finalize_setup(config).await? {
                    log::info!("Renamed installer to {}", setup.display());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(Step::ALL.first(), Some(&Step::StageHelper));
        assert_eq!(Step::ALL.last(), Some(&Step::FinalizeSetup));
        let package = Step::ALL.iter().position(|s| *s == Step::Package);
        let sync = Step::ALL.iter().position(|s| *s == Step::SyncReleases);
        assert!(package < sync);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::SyncReleases.to_string(), "sync-releases");
        assert_eq!(Step::Releasify.to_string(), "releasify");
    }
}
