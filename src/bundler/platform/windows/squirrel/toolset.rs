//! Squirrel toolset location.
//!
//! The tools ship prebuilt in a vendor directory. They are Windows
//! executables, so on other hosts each invocation goes through a launcher
//! (wine) when one is on PATH.

use crate::bundler::{
    error::{Error, Result},
    utils::process::CommandSpec,
};
use std::path::{Path, PathBuf};

/// Packaging tool.
pub const NUGET: &str = "nuget.exe";
/// Release-feed sync tool.
pub const SYNC_RELEASES: &str = "SyncReleases.exe";
/// Release-generation tool (console build of Update.exe).
pub const UPDATE_COM: &str = "Update.com";
/// Helper staged into the app directory.
pub const UPDATE_EXE: &str = "Update.exe";

/// Locations of the external tools the pipeline drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolset {
    vendor_directory: PathBuf,
    launcher: Option<PathBuf>,
}

impl Toolset {
    /// Tools in `vendor_directory`, executed directly.
    pub fn new(vendor_directory: impl Into<PathBuf>) -> Self {
        Self {
            vendor_directory: vendor_directory.into(),
            launcher: None,
        }
    }

    /// Tools in `vendor_directory`, with a launcher detected for the host.
    pub fn detect(vendor_directory: impl Into<PathBuf>) -> Self {
        Self::new(vendor_directory).with_launcher(detect_launcher())
    }

    /// Run every tool through `launcher` (e.g. `wine`).
    pub fn with_launcher(mut self, launcher: Option<PathBuf>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn vendor_directory(&self) -> &Path {
        &self.vendor_directory
    }

    pub fn launcher(&self) -> Option<&Path> {
        self.launcher.as_deref()
    }

    pub fn nuget(&self) -> PathBuf {
        self.vendor_directory.join(NUGET)
    }

    pub fn sync_releases(&self) -> PathBuf {
        self.vendor_directory.join(SYNC_RELEASES)
    }

    pub fn update_com(&self) -> PathBuf {
        self.vendor_directory.join(UPDATE_COM)
    }

    pub fn update_exe(&self) -> PathBuf {
        self.vendor_directory.join(UPDATE_EXE)
    }

    /// Build the invocation of `tool` with `args`.
    ///
    /// With a launcher the tool path becomes the launcher's first argument;
    /// `args` follow unchanged either way.
    pub fn command<I, S>(&self, tool: &Path, args: I) -> Result<CommandSpec>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = match &self.launcher {
            Some(launcher) => CommandSpec::new(launcher).arg(path_arg(tool)?),
            None => CommandSpec::new(tool),
        };
        Ok(spec.args(args))
    }
}

/// Convert a path into a command argument.
pub fn path_arg(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::GenericError(format!("{} is not valid UTF-8", path.display())))
}

fn detect_launcher() -> Option<PathBuf> {
    if cfg!(windows) {
        return None;
    }

    match which::which("wine") {
        Ok(path) => {
            log::debug!("Running Squirrel tools through {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::warn!(
                "wine not found in PATH ({}); Squirrel tools will be executed directly",
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_paths() {
        let toolset = Toolset::new("/opt/vendor");
        assert_eq!(toolset.nuget(), Path::new("/opt/vendor/nuget.exe"));
        assert_eq!(toolset.sync_releases(), Path::new("/opt/vendor/SyncReleases.exe"));
        assert_eq!(toolset.update_com(), Path::new("/opt/vendor/Update.com"));
        assert_eq!(toolset.update_exe(), Path::new("/opt/vendor/Update.exe"));
    }

    #[test]
    fn test_direct_command() {
        let toolset = Toolset::new("/opt/vendor");
        let spec = toolset.command(&toolset.nuget(), ["pack", "a.nuspec"]).unwrap();
        assert_eq!(spec.program(), Path::new("/opt/vendor/nuget.exe"));
        assert_eq!(spec.get_args(), ["pack", "a.nuspec"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_launcher_prepends_tool() {
        let toolset = Toolset::new("/opt/vendor").with_launcher(Some("/usr/bin/wine".into()));
        let spec = toolset.command(&toolset.update_com(), ["--releasify", "x.nupkg"]).unwrap();
        assert_eq!(spec.program(), Path::new("/usr/bin/wine"));
        assert_eq!(
            spec.get_args(),
            ["/opt/vendor/Update.com", "--releasify", "x.nupkg"]
        );
    }
}
