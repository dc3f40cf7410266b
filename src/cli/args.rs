//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap and maps the flags
//! onto [`InstallerOptions`].

use crate::bundler::InstallerOptions;
use clap::Parser;
use std::path::PathBuf;

/// Squirrel.Windows installer builder
#[derive(Parser, Debug)]
#[command(
    name = "squirrel_installer",
    version,
    about = "Builds a Squirrel.Windows installer for a packaged Electron app",
    long_about = "Builds Setup.exe, RELEASES and a full nupkg from a packaged Electron application.

Metadata (name, version, description, author, productName) is read from
resources/app/package.json or from package.json inside resources/app.asar.
Flags override values from --config, which override the metadata.

Usage:
  squirrel_installer --app-directory dist/win-unpacked
  squirrel_installer -a dist/win-unpacked -o dist/installer --exe myapp.exe
  squirrel_installer --config installer.json --remote-releases https://updates.example.com/myapp

Exit code 0 = Setup.exe and the release files exist in the output directory."
)]
pub struct Args {
    /// Packaged application directory
    #[arg(short = 'a', long, value_name = "DIR")]
    pub app_directory: Option<PathBuf>,

    /// Directory receiving Setup.exe and the release files [default: installer]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// Animation shown while installing
    #[arg(long, value_name = "GIF")]
    pub loading_gif: Option<PathBuf>,

    #[arg(long)]
    pub authors: Option<String>,

    #[arg(long)]
    pub owners: Option<String>,

    /// Main executable inside the application directory
    #[arg(long, value_name = "NAME")]
    pub exe: Option<String>,

    #[arg(long, value_name = "URL")]
    pub icon_url: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Version to release instead of the one in package.json
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Authenticode certificate (.pfx)
    #[arg(long, value_name = "PFX")]
    pub certificate_file: Option<PathBuf>,

    #[arg(long, env = "SQUIRREL_CERTIFICATE_PASSWORD", hide_env_values = true)]
    pub certificate_password: Option<String>,

    /// Raw signtool parameters, used instead of the certificate pair
    #[arg(long, value_name = "PARAMS")]
    pub sign_with_params: Option<String>,

    /// Icon embedded into Setup.exe
    #[arg(long, value_name = "ICO")]
    pub setup_icon: Option<PathBuf>,

    /// Release feed to sync previous releases from
    #[arg(long, value_name = "URL")]
    pub remote_releases: Option<String>,

    /// Handlebars nuspec template replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub nuspec_template: Option<PathBuf>,

    /// Directory holding nuget.exe and the Squirrel tools [default: vendor]
    #[arg(long, env = "SQUIRREL_VENDOR_DIR", value_name = "DIR")]
    pub vendor_directory: Option<PathBuf>,

    /// Kill any external tool running longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// JSON options file (camelCase keys)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print per-step details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == Some(0) {
            return Err("--timeout must be greater than zero".to_string());
        }

        if let Some(config) = &self.config
            && !config.is_file()
        {
            return Err(format!("Options file not found: {}", config.display()));
        }

        Ok(())
    }

    /// The options given as flags; unset flags stay `None`.
    pub fn to_options(&self) -> InstallerOptions {
        InstallerOptions {
            app_directory: self.app_directory.clone(),
            output_directory: self.output_directory.clone(),
            loading_gif: self.loading_gif.clone(),
            authors: self.authors.clone(),
            owners: self.owners.clone(),
            exe: self.exe.clone(),
            icon_url: self.icon_url.clone(),
            description: self.description.clone(),
            version: self.app_version.clone(),
            title: self.title.clone(),
            certificate_file: self.certificate_file.clone(),
            certificate_password: self.certificate_password.clone(),
            sign_with_params: self.sign_with_params.clone(),
            setup_icon: self.setup_icon.clone(),
            remote_releases: self.remote_releases.clone(),
            nuspec_template: self.nuspec_template.clone(),
            vendor_directory: self.vendor_directory.clone(),
            command_timeout_secs: self.timeout,
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("squirrel_installer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = parse(&[
            "-a",
            "app",
            "--app-version",
            "2.0.0",
            "--remote-releases",
            "https://example.com/feed",
            "--timeout",
            "30",
        ]);
        let options = args.to_options();

        assert_eq!(options.app_directory, Some(PathBuf::from("app")));
        assert_eq!(options.version.as_deref(), Some("2.0.0"));
        assert_eq!(options.remote_releases.as_deref(), Some("https://example.com/feed"));
        assert_eq!(options.command_timeout_secs, Some(30));
        assert_eq!(options.exe, None);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = parse(&["-a", "app", "--timeout", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_missing_options_file_rejected() {
        let args = parse(&["--config", "/definitely/not/here.json"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Args::try_parse_from(["squirrel_installer", "-v", "-q"]);
        assert!(result.is_err());
    }
}
