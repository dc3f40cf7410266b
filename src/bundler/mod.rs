//! Squirrel.Windows installer builder.
//!
//! Turns a packaged Electron application directory into `Setup.exe`, the
//! `RELEASES` file and a full nupkg ready to publish to an update feed.
//!
//! # Configuration
//!
//! Options come from [`InstallerOptions`] (CLI flags or a JSON option file)
//! and are resolved against the application's `package.json` by
//! [`ConfigurationBuilder`]:
//!
//! ```json
//! {
//!   "appDirectory": "dist/win-unpacked",
//!   "outputDirectory": "dist/installer",
//!   "exe": "myapp.exe",
//!   "remoteReleases": "https://updates.example.com/myapp"
//! }
//! ```
//!
//! # Pipeline
//!
//! | Step | Tool | Notes |
//! |------|------|-------|
//! | stage helper | - | copies Update.exe into the app |
//! | render manifest | - | `<name>.nuspec` in a temp dir |
//! | package | `nuget.exe` | `<name>.<version>.nupkg` |
//! | sync releases | `SyncReleases.exe` | only with a remote feed |
//! | releasify | `Update.com` | optional signing and setup icon |
//! | finalize | - | `<productName>Setup.exe` |
//!
//! # Integration
//!
//! ```no_run
//! use squirrel_installer::bundler::{InstallerOptions, create_windows_installer};
//!
//! # async fn example() -> squirrel_installer::bundler::Result<()> {
//! let options = InstallerOptions {
//!     app_directory: Some("dist/win-unpacked".into()),
//!     ..Default::default()
//! };
//! create_windows_installer(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{Installer, InstallerArtifact, Step, calculate_sha256, collect_artifacts};
pub use error::{Error, ErrorKind, Result};
pub use platform::windows::squirrel::Toolset;
pub use settings::{Configuration, ConfigurationBuilder, InstallerOptions};
pub use utils::process::{CommandRunner, CommandSpec, ProcessRunner};

/// Builds the configuration from `options` and runs the whole pipeline with
/// the real tools.
///
/// # Errors
///
/// Configuration errors and the first failing step's error, unchanged.
pub async fn create_windows_installer(options: InstallerOptions) -> Result<()> {
    let config = ConfigurationBuilder::from(options).build()?;
    Installer::new(config).create_installer().await
}
