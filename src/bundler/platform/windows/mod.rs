//! Windows installer support.
//!
//! # Supported Formats
//!
//! - **Squirrel Setup.exe**: via [`squirrel`] using nuget and Squirrel.Windows
//!
//! # Build Requirements
//!
//! | Tool | Location |
//! |------|----------|
//! | `nuget.exe` | vendor directory |
//! | `Update.com`, `Update.exe` | vendor directory |
//! | `SyncReleases.exe` | vendor directory, only with a remote feed |
//! | `wine` | PATH, non-Windows hosts only |
//!
//! # Output Location
//!
//! Everything lands in the configured output directory:
//! - `Setup.exe` or `<productName>Setup.exe`
//! - `RELEASES`
//! - `<name>-<version>-full.nupkg`

pub mod squirrel;
