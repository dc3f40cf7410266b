//! Squirrel.Windows installer builder library
//!
//! This library turns a packaged Electron application directory into a
//! Squirrel.Windows installer:
//! - reads application metadata from `resources/app` or `resources/app.asar`
//! - packs the application with nuget
//! - releasifies the package into `Setup.exe` with Squirrel's tools
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use bundler::create_windows_installer;
pub use error::{CliError, InstallerError, Result};
