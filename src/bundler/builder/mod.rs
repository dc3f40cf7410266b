//! Installer orchestration.
//!
//! This module provides the [`Installer`] that drives the Squirrel steps to
//! turn a packaged application directory into `Setup.exe`.
//!
//! # Overview
//!
//! The installer:
//! 1. Takes a resolved [`Configuration`](crate::bundler::Configuration)
//! 2. Locates the vendor tools through a [`Toolset`](crate::bundler::Toolset)
//! 3. Runs each [`Step`] in order through a [`CommandRunner`](crate::bundler::CommandRunner)
//! 4. Stops at the first failing step
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksums of the produced files
//! - [`orchestrator`] - [`Installer`] and [`Step`]

mod checksum;
mod orchestrator;

pub use checksum::{InstallerArtifact, calculate_sha256, collect_artifacts};
pub use orchestrator::{Installer, Step};
