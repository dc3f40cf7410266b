//! Command line interface for the installer builder.
//!
//! Parses flags, merges them over an optional options file, runs the
//! pipeline and reports what ended up in the output directory.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{ConfigurationBuilder, Installer, InstallerOptions, collect_artifacts},
    error::{CliError, InstallerError, Result},
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);

    match execute(&args, &runtime).await {
        Ok(()) => Ok(0),
        Err(e) => {
            runtime.output().error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                runtime.output().indent(&suggestion)?;
            }
            Ok(e.exit_code())
        }
    }
}

async fn execute(args: &Args, runtime: &RuntimeConfig) -> Result<()> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let options = resolve_options(args)?;
    let config = ConfigurationBuilder::from(options).build()?;
    let output = runtime.output();

    output.section(&format!("{} {}", config.title(), config.version()))?;
    output.verbose(&format!("Application: {}", config.app_directory().display()))?;
    output.verbose(&format!("Vendor tools: {}", config.vendor_directory().display()))?;
    output.progress(&format!(
        "Building installer into {}",
        config.output_directory().display()
    ))?;

    let output_directory = config.output_directory().to_path_buf();
    Installer::new(config).create_installer().await?;

    let artifacts = collect_artifacts(&output_directory).await?;
    if artifacts.is_empty() {
        output.warn("Output directory is empty")?;
    }
    for artifact in &artifacts {
        output.artifact(artifact)?;
    }

    Ok(())
}

/// Flags win over the options file.
fn resolve_options(args: &Args) -> Result<InstallerOptions> {
    let flags = args.to_options();
    match &args.config {
        Some(path) => Ok(InstallerOptions::from_file(path)
            .map_err(InstallerError::from)?
            .merge(flags)),
        None => Ok(flags),
    }
}
