//! Installer configuration.
//!
//! [`InstallerOptions`] is what the user supplies (CLI flags, option files);
//! [`ConfigurationBuilder`] merges it with the application metadata into an
//! immutable [`Configuration`].

mod builder;
mod core;
mod options;

pub use builder::ConfigurationBuilder;
pub use core::{
    Configuration, DEFAULT_ICON_URL, DEFAULT_LOADING_GIF, DEFAULT_OUTPUT_DIRECTORY,
    DEFAULT_VENDOR_DIRECTORY,
};
pub use options::InstallerOptions;
