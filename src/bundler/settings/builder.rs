//! Builder for constructing [`Configuration`].

use super::{
    Configuration, InstallerOptions,
    core::{DEFAULT_ICON_URL, DEFAULT_LOADING_GIF, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_VENDOR_DIRECTORY},
};
use crate::{
    bundler::error::{Error, ErrorExt, Result},
    metadata::{self, AppMetadata},
};
use path_absolutize::Absolutize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Builder for constructing a [`Configuration`].
///
/// Explicit values always win; unset fields fall back to the application
/// metadata and then to built-in defaults:
///
/// | Field | Fallback |
/// |---|---|
/// | output directory | `installer` |
/// | loading gif | `resources/install-spinner.gif` |
/// | authors | metadata `author`, else empty |
/// | owners | authors |
/// | exe | metadata `name` |
/// | icon url | [`DEFAULT_ICON_URL`] |
/// | description | metadata `description` |
/// | version | metadata `version` |
/// | title | metadata `productName`, else metadata `name` |
///
/// Empty strings count as unset.
///
/// # Examples
///
/// ```no_run
/// use squirrel_installer::bundler::ConfigurationBuilder;
///
/// # fn example() -> squirrel_installer::bundler::Result<()> {
/// let config = ConfigurationBuilder::new()
///     .app_directory("dist/win-unpacked")
///     .output_directory("dist/installer")
///     .remote_releases("https://updates.example.com/myapp")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    options: InstallerOptions,
}

impl From<InstallerOptions> for ConfigurationBuilder {
    fn from(options: InstallerOptions) -> Self {
        Self { options }
    }
}

impl ConfigurationBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the packaged application directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn app_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.options.app_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.options.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn loading_gif<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.options.loading_gif = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.options.authors = Some(authors.into());
        self
    }

    pub fn owners(mut self, owners: impl Into<String>) -> Self {
        self.options.owners = Some(owners.into());
        self
    }

    pub fn exe(mut self, exe: impl Into<String>) -> Self {
        self.options.exe = Some(exe.into());
        self
    }

    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.options.icon_url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.options.description = Some(description.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.options.version = Some(version.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// Sets the Authenticode certificate used to sign Setup.exe.
    pub fn certificate<P: AsRef<Path>>(mut self, file: P, password: impl Into<String>) -> Self {
        self.options.certificate_file = Some(file.as_ref().to_path_buf());
        self.options.certificate_password = Some(password.into());
        self
    }

    /// Sets raw signing parameters, taking precedence over [`certificate`](Self::certificate).
    pub fn sign_with_params(mut self, params: impl Into<String>) -> Self {
        self.options.sign_with_params = Some(params.into());
        self
    }

    pub fn setup_icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.options.setup_icon = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn remote_releases(mut self, url: impl Into<String>) -> Self {
        self.options.remote_releases = Some(url.into());
        self
    }

    pub fn nuspec_template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.options.nuspec_template = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn vendor_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.options.vendor_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.options.command_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Builds the configuration, reading metadata from the application directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the application directory is missing or empty
    /// - whatever [`metadata::resolve`] fails with, unchanged
    /// - [`Error::Validation`] if name, version or description cannot be resolved
    pub fn build(self) -> Result<Configuration> {
        let app_directory = required_app_directory(&self.options)?.to_path_buf();
        let metadata = metadata::resolve(&app_directory)?;
        self.build_with_metadata(metadata)
    }

    /// Builds the configuration from already resolved metadata.
    pub fn build_with_metadata(self, metadata: AppMetadata) -> Result<Configuration> {
        let app_directory = absolute(required_app_directory(&self.options)?)?;
        let options = self.options;

        let name = non_empty(metadata.name).ok_or_else(|| {
            Error::Validation("application metadata does not declare a \"name\"".into())
        })?;
        let version = non_empty(options.version)
            .or(non_empty(metadata.version))
            .ok_or_else(|| missing("version"))?;
        let description = non_empty(options.description)
            .or(non_empty(metadata.description))
            .ok_or_else(|| missing("description"))?;
        let authors = non_empty(options.authors)
            .or(non_empty(metadata.author))
            .unwrap_or_default();
        let owners = non_empty(options.owners).unwrap_or_else(|| authors.clone());
        let exe = non_empty(options.exe).unwrap_or_else(|| name.clone());
        let product_name = non_empty(metadata.product_name);
        let title = non_empty(options.title)
            .or_else(|| product_name.clone())
            .unwrap_or_else(|| name.clone());

        if semver::Version::parse(&version).is_err() {
            log::warn!(
                "Version {} is not valid SemVer; Squirrel may refuse to releasify it",
                version
            );
        }

        let certificate_file = options.certificate_file.as_deref().map(absolute).transpose()?;
        let certificate_password = non_empty(options.certificate_password);
        if certificate_file.is_some() != certificate_password.is_some()
            && options.sign_with_params.is_none()
        {
            log::warn!("Certificate file and password must both be set; Setup.exe will be unsigned");
        }

        Ok(Configuration {
            app_directory,
            output_directory: absolute(
                options
                    .output_directory
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_OUTPUT_DIRECTORY)),
            )?,
            loading_gif: absolute(
                options
                    .loading_gif
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_LOADING_GIF)),
            )?,
            authors,
            owners,
            name,
            exe,
            icon_url: non_empty(options.icon_url).unwrap_or_else(|| DEFAULT_ICON_URL.to_string()),
            description,
            version,
            title,
            product_name,
            certificate_file,
            certificate_password,
            sign_with_params: non_empty(options.sign_with_params),
            setup_icon: options.setup_icon.as_deref().map(absolute).transpose()?,
            remote_releases: non_empty(options.remote_releases),
            nuspec_template: options.nuspec_template.as_deref().map(absolute).transpose()?,
            vendor_directory: absolute(
                options
                    .vendor_directory
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_VENDOR_DIRECTORY)),
            )?,
            command_timeout: options.command_timeout_secs.map(Duration::from_secs),
        })
    }
}

fn required_app_directory(options: &InstallerOptions) -> Result<&Path> {
    match options.app_directory.as_deref() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir),
        _ => Err(Error::Validation(
            "Please provide \"appDirectory\" config parameter.".into(),
        )),
    }
}

fn missing(field: &str) -> Error {
    Error::Validation(format!(
        "no \"{field}\" given and the application metadata does not declare one"
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}
