//! Nuspec manifest rendering.
//!
//! Fills the manifest template with the resolved configuration using
//! handlebars and writes it next to where nuget will drop the package.

use super::template::NUSPEC_TEMPLATE;
use crate::bundler::{
    error::{ErrorExt, Result},
    settings::Configuration,
    utils::fs,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fields available to a nuspec template.
#[derive(Debug, Clone, Serialize)]
pub struct NuspecFields<'a> {
    pub name: &'a str,
    pub title: &'a str,
    pub version: &'a str,
    pub authors: &'a str,
    pub owners: &'a str,
    pub icon_url: &'a str,
    pub description: &'a str,
    pub exe: &'a str,
}

impl<'a> From<&'a Configuration> for NuspecFields<'a> {
    fn from(config: &'a Configuration) -> Self {
        Self {
            name: config.name(),
            title: config.title(),
            version: config.version(),
            authors: config.authors(),
            owners: config.owners(),
            icon_url: config.icon_url(),
            description: config.description(),
            exe: config.exe(),
        }
    }
}

/// Render `template` with `fields`.
///
/// Pure: fails with [`Error::Template`](crate::bundler::Error::Template) when
/// the template does not parse, never touches the filesystem.
pub fn render<T: Serialize>(template: &str, fields: &T) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string("nuspec", template)?;
    Ok(handlebars.render("nuspec", fields)?)
}

/// Load the configured template, or the built-in one.
pub async fn load_template(config: &Configuration) -> Result<String> {
    match config.nuspec_template() {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .fs_context("reading nuspec template", path),
        None => Ok(NUSPEC_TEMPLATE.to_string()),
    }
}

/// Render the manifest for `config` into `output_dir/<name>.nuspec`.
///
/// # Returns
/// Path to the written manifest
pub async fn write_nuspec(config: &Configuration, output_dir: &Path) -> Result<PathBuf> {
    let template = load_template(config).await?;
    let content = render(&template, &NuspecFields::from(config))?;

    let nuspec_path = output_dir.join(config.nuspec_file_name());
    fs::write_file(&nuspec_path, &content).await?;
    log::debug!("Wrote manifest {}", nuspec_path.display());

    Ok(nuspec_path)
}
