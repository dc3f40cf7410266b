//! Platform-specific installer implementations.
//!
//! | Platform | Installer | Module |
//! |----------|-----------|--------|
//! | Windows | Squirrel Setup.exe | [`windows`] |
//!
//! The Windows module is compiled on every host. The Squirrel tools are
//! Windows executables and run through wine elsewhere.

pub mod windows;
