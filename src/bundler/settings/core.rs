//! The resolved, immutable installer configuration.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "installer";

/// Loading animation used when none is given, relative to the working directory.
pub const DEFAULT_LOADING_GIF: &str = "resources/install-spinner.gif";

/// Icon URL used when none is given.
pub const DEFAULT_ICON_URL: &str =
    "https://raw.githubusercontent.com/atom/atom-shell/master/atom/browser/resources/win/atom.ico";

/// Directory holding the Squirrel and NuGet tools when none is given.
pub const DEFAULT_VENDOR_DIRECTORY: &str = "vendor";

/// Fully resolved configuration for one installer build.
///
/// Constructed via [`ConfigurationBuilder`](super::ConfigurationBuilder); never
/// mutated afterwards. All paths are absolute.
///
/// # Examples
///
/// ```no_run
/// use squirrel_installer::bundler::ConfigurationBuilder;
///
/// # fn example() -> squirrel_installer::bundler::Result<()> {
/// let config = ConfigurationBuilder::new()
///     .app_directory("dist/win-unpacked")
///     .exe("myapp.exe")
///     .build()?;
/// println!("{} {}", config.name(), config.version());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub(super) app_directory: PathBuf,
    pub(super) output_directory: PathBuf,
    pub(super) loading_gif: PathBuf,
    pub(super) authors: String,
    pub(super) owners: String,
    pub(super) name: String,
    pub(super) exe: String,
    pub(super) icon_url: String,
    pub(super) description: String,
    pub(super) version: String,
    pub(super) title: String,
    pub(super) product_name: Option<String>,
    pub(super) certificate_file: Option<PathBuf>,
    pub(super) certificate_password: Option<String>,
    pub(super) sign_with_params: Option<String>,
    pub(super) setup_icon: Option<PathBuf>,
    pub(super) remote_releases: Option<String>,
    pub(super) nuspec_template: Option<PathBuf>,
    pub(super) vendor_directory: PathBuf,
    pub(super) command_timeout: Option<Duration>,
}

impl Configuration {
    /// Packaged application directory.
    pub fn app_directory(&self) -> &Path {
        &self.app_directory
    }

    /// Directory receiving Setup.exe, RELEASES and the full nupkg.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Animation shown by Setup.exe.
    pub fn loading_gif(&self) -> &Path {
        &self.loading_gif
    }

    pub fn authors(&self) -> &str {
        &self.authors
    }

    pub fn owners(&self) -> &str {
        &self.owners
    }

    /// Package id, always from the application metadata.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exe(&self) -> &str {
        &self.exe
    }

    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `productName` from the application metadata, if declared.
    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn certificate_file(&self) -> Option<&Path> {
        self.certificate_file.as_deref()
    }

    pub fn certificate_password(&self) -> Option<&str> {
        self.certificate_password.as_deref()
    }

    pub fn sign_with_params(&self) -> Option<&str> {
        self.sign_with_params.as_deref()
    }

    pub fn setup_icon(&self) -> Option<&Path> {
        self.setup_icon.as_deref()
    }

    /// Release feed URL to sync from before releasifying.
    pub fn remote_releases(&self) -> Option<&str> {
        self.remote_releases.as_deref()
    }

    /// Custom nuspec template, if one replaces the built-in template.
    pub fn nuspec_template(&self) -> Option<&Path> {
        self.nuspec_template.as_deref()
    }

    /// Directory holding nuget.exe and the Squirrel tools.
    pub fn vendor_directory(&self) -> &Path {
        &self.vendor_directory
    }

    /// Limit applied to every external tool invocation.
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout
    }

    /// File name of the package nuget produces: `<name>.<version>.nupkg`.
    pub fn nupkg_file_name(&self) -> String {
        format!("{}.{}.nupkg", self.name, self.version)
    }

    /// File name of the rendered manifest: `<name>.nuspec`.
    pub fn nuspec_file_name(&self) -> String {
        format!("{}.nuspec", self.name)
    }
}
