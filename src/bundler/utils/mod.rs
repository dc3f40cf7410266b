//! Filesystem and process helpers shared by the installer steps.

pub mod fs;
pub mod process;
