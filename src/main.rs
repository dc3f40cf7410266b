//! Squirrel installer - builds Squirrel.Windows installers for Electron apps.
//!
//! This binary creates Setup.exe, RELEASES and a full nupkg from a packaged
//! application directory with proper error handling and artifact reporting.

use squirrel_installer::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
