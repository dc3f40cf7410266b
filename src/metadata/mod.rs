//! Application metadata discovery from a packaged Electron app directory.
//!
//! Two layouts are supported, tried in this order and no other:
//! 1. `resources/app/package.json` (extracted resources)
//! 2. `package.json` inside `resources/app.asar`

pub mod asar;

use crate::bundler::error::{Error, ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Metadata read from the application's `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppMetadata {
    /// Package name, used as the NuGet id
    pub name: Option<String>,

    /// Package version
    pub version: Option<String>,

    /// Package description
    pub description: Option<String>,

    /// Author name (object authors contribute their `name`)
    pub author: Option<String>,

    /// Human-readable product name
    pub product_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    author: Option<Author>,
    product_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Author {
    Name(String),
    Person { name: Option<String> },
}

impl AppMetadata {
    /// Parse the contents of a `package.json`.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let package: PackageJson = serde_json::from_slice(bytes)?;
        Ok(Self {
            name: package.name,
            version: package.version,
            description: package.description,
            author: package.author.and_then(|author| match author {
                Author::Name(name) => Some(name),
                Author::Person { name } => name,
            }),
            product_name: package.product_name,
        })
    }
}

/// Path of `package.json` in the extracted-resources layout.
pub fn extracted_package_json(app_directory: &Path) -> PathBuf {
    app_directory
        .join("resources")
        .join("app")
        .join("package.json")
}

/// Path of the packed application archive.
pub fn asar_archive(app_directory: &Path) -> PathBuf {
    app_directory.join("resources").join("app.asar")
}

/// Resolve application metadata under `app_directory`.
///
/// Fails with [`Error::MetadataNotFound`] when neither layout yields a
/// parseable `package.json`.
pub fn resolve(app_directory: &Path) -> Result<AppMetadata> {
    match read_extracted(app_directory) {
        Ok(metadata) => return Ok(metadata),
        Err(e) => log::debug!("Extracted app layout unusable: {}", e),
    }

    match read_packed(app_directory) {
        Ok(metadata) => Ok(metadata),
        Err(e) => {
            log::debug!("Packed app layout unusable: {}", e);
            Err(Error::MetadataNotFound {
                app_directory: app_directory.to_path_buf(),
            })
        }
    }
}

fn read_extracted(app_directory: &Path) -> Result<AppMetadata> {
    let path = extracted_package_json(app_directory);
    let bytes = std::fs::read(&path).fs_context("reading package.json", &path)?;
    AppMetadata::from_json(&bytes)
}

fn read_packed(app_directory: &Path) -> Result<AppMetadata> {
    let archive = asar::AsarArchive::open(&asar_archive(app_directory))?;
    AppMetadata::from_json(&archive.read_file("package.json")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE_JSON: &str = r#"{
        "name": "myapp",
        "productName": "MyApp",
        "version": "1.0.0",
        "description": "A test app",
        "author": "Jane Doe"
    }"#;

    fn write_extracted(app_dir: &Path, json: &str) {
        let path = extracted_package_json(app_dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, json).unwrap();
    }

    fn write_packed(app_dir: &Path, json: &str) {
        std::fs::create_dir_all(app_dir.join("resources")).unwrap();
        asar::write_archive(&asar_archive(app_dir), &[("package.json", json.as_bytes())]);
    }

    #[test]
    fn test_parses_package_json() {
        let metadata = AppMetadata::from_json(PACKAGE_JSON.as_bytes()).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("myapp"));
        assert_eq!(metadata.product_name.as_deref(), Some("MyApp"));
        assert_eq!(metadata.version.as_deref(), Some("1.0.0"));
        assert_eq!(metadata.description.as_deref(), Some("A test app"));
        assert_eq!(metadata.author.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_author_object() {
        let json = r#"{"name":"a","author":{"name":"Jane","email":"jane@example.com"}}"#;
        let metadata = AppMetadata::from_json(json.as_bytes()).unwrap();
        assert_eq!(metadata.author.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_extracted_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_extracted(dir.path(), PACKAGE_JSON);
        assert_eq!(resolve(dir.path()).unwrap().name.as_deref(), Some("myapp"));
    }

    #[test]
    fn test_packed_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_packed(dir.path(), r#"{"name":"packed","version":"2.0.0"}"#);

        let metadata = resolve(dir.path()).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("packed"));
        assert_eq!(metadata.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_extracted_layout_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_extracted(dir.path(), PACKAGE_JSON);
        write_packed(dir.path(), r#"{"name":"packed"}"#);
        assert_eq!(resolve(dir.path()).unwrap().name.as_deref(), Some("myapp"));
    }

    #[test]
    fn test_broken_extracted_falls_back_to_packed() {
        let dir = tempfile::tempdir().unwrap();
        write_extracted(dir.path(), "{ not json");
        write_packed(dir.path(), r#"{"name":"packed"}"#);
        assert_eq!(resolve(dir.path()).unwrap().name.as_deref(), Some("packed"));
    }

    #[test]
    fn test_neither_layout() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MetadataNotFound { .. }));
        assert_eq!(err.kind(), crate::bundler::ErrorKind::MetadataNotFound);
    }

    #[test]
    fn test_corrupt_archive_entry_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("resources")).unwrap();
        let json = br#"{"files":{"package.json":{"size":9223372036854775807,"offset":"0"}}}"#;
        asar::write_raw_archive(&asar_archive(dir.path()), json, b"{}");

        let err = resolve(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MetadataNotFound { .. }));
    }
}
