//! Squirrel.Windows installer steps.
//!
//! Builds a NuGet package from the application directory and turns it into
//! Setup.exe with Squirrel's `Update.com --releasify`.
//!
//! # Module Organization
//!
//! - `template` - built-in nuspec template
//! - `nuspec` - manifest rendering
//! - `toolset` - vendor tool location and invocation
//! - `signing` - `--signWithParams` construction
//!
//! Each public step below is one stage of the pipeline driven by
//! [`Installer`](crate::bundler::Installer).

mod nuspec;
mod signing;
mod template;
mod toolset;

pub use nuspec::{NuspecFields, load_template, render, write_nuspec};
pub use signing::{should_sign, sign_params};
pub use template::NUSPEC_TEMPLATE;
pub use toolset::{NUGET, SYNC_RELEASES, Toolset, UPDATE_COM, UPDATE_EXE, path_arg};

use crate::bundler::{
    error::{Context, Result},
    settings::Configuration,
    utils::{
        fs,
        process::{CommandRunner, CommandSpec},
    },
};
use std::path::{Path, PathBuf};

/// Installer file name Update.com writes into the release directory.
pub const SETUP_EXE: &str = "Setup.exe";

/// Final installer name when the app declares a product name.
pub fn setup_file_name(product_name: &str) -> String {
    format!("{product_name}Setup.exe")
}

/// Copy Update.exe into the application directory, replacing any old copy.
///
/// # Returns
/// Path of the staged helper
pub async fn stage_helper(config: &Configuration, toolset: &Toolset) -> Result<PathBuf> {
    let target = config.app_directory().join(UPDATE_EXE);
    fs::copy_file(&toolset.update_exe(), &target).await?;
    Ok(target)
}

/// Render the nuspec into a fresh temporary directory.
///
/// # Returns
/// Path of the written `<name>.nuspec`; its parent is the nuget output directory
pub async fn render_manifest(config: &Configuration) -> Result<PathBuf> {
    let nuget_output = fs::create_temp_dir()?;
    log::debug!("Using working directory {}", nuget_output.display());
    write_nuspec(config, &nuget_output).await
}

/// Arguments for `nuget.exe`.
pub fn pack_args(
    config: &Configuration,
    nuspec: &Path,
    nuget_output: &Path,
) -> Result<Vec<String>> {
    Ok(vec![
        "pack".to_string(),
        path_arg(nuspec)?,
        "-BasePath".to_string(),
        path_arg(config.app_directory())?,
        "-OutputDirectory".to_string(),
        path_arg(nuget_output)?,
        "-NoDefaultExcludes".to_string(),
    ])
}

/// Arguments for `SyncReleases.exe`, or `None` when no feed is configured.
pub fn sync_args(config: &Configuration) -> Result<Option<Vec<String>>> {
    let Some(feed) = config.remote_releases() else {
        return Ok(None);
    };
    Ok(Some(vec![
        "-u".to_string(),
        feed.to_string(),
        "-r".to_string(),
        path_arg(config.output_directory())?,
    ]))
}

/// Arguments for `Update.com`.
pub fn releasify_args(config: &Configuration, nuget_output: &Path) -> Result<Vec<String>> {
    let nupkg = nuget_output.join(config.nupkg_file_name());
    let mut args = vec![
        "--releasify".to_string(),
        path_arg(&nupkg)?,
        "--releaseDir".to_string(),
        path_arg(config.output_directory())?,
        "--loadingGif".to_string(),
        path_arg(config.loading_gif())?,
    ];

    if let Some(params) = sign_params(config) {
        args.push("--signWithParams".to_string());
        args.push(params);
    }

    if let Some(icon) = config.setup_icon() {
        args.push("--setupIcon".to_string());
        args.push(path_arg(icon)?);
    }

    Ok(args)
}

/// Pack the application directory with nuget.
pub async fn package<R: CommandRunner>(
    config: &Configuration,
    toolset: &Toolset,
    runner: &R,
    nuspec: &Path,
) -> Result<PathBuf> {
    let nuget_output = nuspec
        .parent()
        .context("nuspec path has no parent directory")?;
    let args = pack_args(config, nuspec, nuget_output)?;
    let spec = tool_command(config, toolset, &toolset.nuget(), args)?;
    let stdout = runner.run(&spec).await?;
    log::debug!("nuget: {}", stdout.trim());
    Ok(nuget_output.join(config.nupkg_file_name()))
}

/// Sync previous releases from the remote feed. No-op without a feed.
pub async fn sync_releases<R: CommandRunner>(
    config: &Configuration,
    toolset: &Toolset,
    runner: &R,
) -> Result<()> {
    let Some(args) = sync_args(config)? else {
        log::debug!("No remote releases configured, skipping sync");
        return Ok(());
    };
    let spec = tool_command(config, toolset, &toolset.sync_releases(), args)?;
    runner.run(&spec).await?;
    Ok(())
}

/// Generate the release files and Setup.exe.
pub async fn releasify<R: CommandRunner>(
    config: &Configuration,
    toolset: &Toolset,
    runner: &R,
    nuget_output: &Path,
) -> Result<()> {
    if should_sign(config) {
        log::info!("Setup.exe will be signed");
    }
    let spec = tool_command(
        config,
        toolset,
        &toolset.update_com(),
        releasify_args(config, nuget_output)?,
    )?;
    runner.run(&spec).await?;
    Ok(())
}

/// Rename Setup.exe to `<productName>Setup.exe`. No-op without a product name.
///
/// # Returns
/// The final installer path, or `None` if nothing was renamed
pub async fn finalize_setup(config: &Configuration) -> Result<Option<PathBuf>> {
    let Some(product_name) = config.product_name() else {
        return Ok(None);
    };

    let from = config.output_directory().join(SETUP_EXE);
    let to = config.output_directory().join(setup_file_name(product_name));
    fs::rename_file(&from, &to).await?;
    Ok(Some(to))
}

fn tool_command(
    config: &Configuration,
    toolset: &Toolset,
    tool: &Path,
    args: Vec<String>,
) -> Result<CommandSpec> {
    Ok(toolset
        .command(tool, args)?
        .timeout(config.command_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bundler::ConfigurationBuilder, metadata::AppMetadata};

    fn config(builder: ConfigurationBuilder) -> Configuration {
        builder
            .output_directory("/out")
            .loading_gif("/res/spinner.gif")
            .build_with_metadata(AppMetadata {
                name: Some("myapp".into()),
                version: Some("1.0.0".into()),
                description: Some("d".into()),
                ..Default::default()
            })
            .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_pack_args() {
        let config = config(ConfigurationBuilder::new().app_directory("/apps/myapp"));
        let args =
            pack_args(&config, Path::new("/tmp/w/myapp.nuspec"), Path::new("/tmp/w")).unwrap();
        assert_eq!(
            args,
            [
                "pack",
                "/tmp/w/myapp.nuspec",
                "-BasePath",
                "/apps/myapp",
                "-OutputDirectory",
                "/tmp/w",
                "-NoDefaultExcludes"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_args() {
        let without = config(ConfigurationBuilder::new().app_directory("/apps/myapp"));
        assert_eq!(sync_args(&without).unwrap(), None);

        let with = config(
            ConfigurationBuilder::new()
                .app_directory("/apps/myapp")
                .remote_releases("https://example.com/feed"),
        );
        assert_eq!(
            sync_args(&with).unwrap().unwrap(),
            ["-u", "https://example.com/feed", "-r", "/out"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_releasify_args_minimal() {
        let config = config(ConfigurationBuilder::new().app_directory("/apps/myapp"));
        assert_eq!(
            releasify_args(&config, Path::new("/tmp/w")).unwrap(),
            [
                "--releasify",
                "/tmp/w/myapp.1.0.0.nupkg",
                "--releaseDir",
                "/out",
                "--loadingGif",
                "/res/spinner.gif"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_releasify_args_signing_and_icon() {
        let config = config(
            ConfigurationBuilder::new()
                .app_directory("/apps/myapp")
                .certificate("/certs/app.pfx", "pw")
                .setup_icon("/res/setup.ico"),
        );
        let args = releasify_args(&config, Path::new("/tmp/w")).unwrap();
        assert_eq!(
            &args[6..],
            [
                "--signWithParams",
                "/a /f \"/certs/app.pfx\" /p \"pw\"",
                "--setupIcon",
                "/res/setup.ico"
            ]
        );
    }

    #[test]
    fn test_setup_file_name() {
        assert_eq!(setup_file_name("MyApp"), "MyAppSetup.exe");
    }

    #[tokio::test]
    async fn test_finalize_without_product_name_is_noop() {
        let config = config(ConfigurationBuilder::new().app_directory("/apps/myapp"));
        assert_eq!(finalize_setup(&config).await.unwrap(), None);
    }
}
