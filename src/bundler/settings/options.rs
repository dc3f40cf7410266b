//! User-supplied installer options.

use crate::bundler::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw installer options, before metadata defaults are applied.
///
/// Every field is optional here; [`ConfigurationBuilder`](super::ConfigurationBuilder)
/// enforces what is required. Option files use the camelCase keys below:
///
/// ```json
/// {
///   "appDirectory": "dist/win-unpacked",
///   "outputDirectory": "installer",
///   "exe": "myapp.exe",
///   "remoteReleases": "https://updates.example.com/myapp"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InstallerOptions {
    /// Packaged application directory. Required.
    pub app_directory: Option<PathBuf>,

    /// Where Setup.exe and the release files go.
    ///
    /// Default: `installer`
    pub output_directory: Option<PathBuf>,

    /// Animation shown while Setup.exe installs.
    ///
    /// Default: `resources/install-spinner.gif`
    pub loading_gif: Option<PathBuf>,

    /// Default: metadata `author`, else empty
    pub authors: Option<String>,

    /// Default: resolved authors
    pub owners: Option<String>,

    /// Main executable inside the app directory.
    ///
    /// Default: metadata `name`
    pub exe: Option<String>,

    /// Icon shown in Programs and Features.
    pub icon_url: Option<String>,

    /// Default: metadata `description`
    pub description: Option<String>,

    /// Default: metadata `version`
    pub version: Option<String>,

    /// Default: metadata `productName`, else metadata `name`
    pub title: Option<String>,

    /// Authenticode certificate (.pfx). Needs `certificate_password`.
    pub certificate_file: Option<PathBuf>,

    /// Password for `certificate_file`.
    pub certificate_password: Option<String>,

    /// Raw signtool parameters; wins over the certificate pair.
    pub sign_with_params: Option<String>,

    /// Icon embedded into Setup.exe.
    pub setup_icon: Option<PathBuf>,

    /// Release feed to sync previous releases from, for delta packages.
    pub remote_releases: Option<String>,

    /// Replacement for the built-in nuspec template.
    pub nuspec_template: Option<PathBuf>,

    /// Directory holding nuget.exe, Update.exe, Update.com and SyncReleases.exe.
    ///
    /// Default: `vendor`
    pub vendor_directory: Option<PathBuf>,

    /// Kill any external tool running longer than this.
    ///
    /// Default: no limit
    pub command_timeout_secs: Option<u64>,
}

impl InstallerOptions {
    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).fs_context("reading options file", path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Field-wise merge where values present in `overrides` win.
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            app_directory: overrides.app_directory.or(self.app_directory),
            output_directory: overrides.output_directory.or(self.output_directory),
            loading_gif: overrides.loading_gif.or(self.loading_gif),
            authors: overrides.authors.or(self.authors),
            owners: overrides.owners.or(self.owners),
            exe: overrides.exe.or(self.exe),
            icon_url: overrides.icon_url.or(self.icon_url),
            description: overrides.description.or(self.description),
            version: overrides.version.or(self.version),
            title: overrides.title.or(self.title),
            certificate_file: overrides.certificate_file.or(self.certificate_file),
            certificate_password: overrides.certificate_password.or(self.certificate_password),
            sign_with_params: overrides.sign_with_params.or(self.sign_with_params),
            setup_icon: overrides.setup_icon.or(self.setup_icon),
            remote_releases: overrides.remote_releases.or(self.remote_releases),
            nuspec_template: overrides.nuspec_template.or(self.nuspec_template),
            vendor_directory: overrides.vendor_directory.or(self.vendor_directory),
            command_timeout_secs: overrides.command_timeout_secs.or(self.command_timeout_secs),
        }
    }
}
