//! Code-signing parameters for Setup.exe.
//!
//! Squirrel signs through signtool; it takes the signtool arguments as one
//! string via `--signWithParams`.

use crate::bundler::settings::Configuration;

/// The `--signWithParams` value for `config`, if signing is configured.
///
/// Explicit parameters are passed through verbatim and win over a
/// certificate/password pair. A certificate without a password (or the
/// reverse) leaves the installer unsigned.
pub fn sign_params(config: &Configuration) -> Option<String> {
    if let Some(params) = config.sign_with_params() {
        return Some(params.to_string());
    }

    match (config.certificate_file(), config.certificate_password()) {
        (Some(file), Some(password)) => Some(format!(
            "/a /f \"{}\" /p \"{}\"",
            file.display(),
            password
        )),
        _ => None,
    }
}

/// Whether Setup.exe will be signed.
pub fn should_sign(config: &Configuration) -> bool {
    sign_params(config).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bundler::ConfigurationBuilder, metadata::AppMetadata};
    use path_absolutize::Absolutize;
    use std::path::Path;

    fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new().app_directory("app")
    }

    fn build(builder: ConfigurationBuilder) -> Configuration {
        builder
            .build_with_metadata(AppMetadata {
                name: Some("app".into()),
                version: Some("1.0.0".into()),
                description: Some("d".into()),
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_unsigned_by_default() {
        assert_eq!(sign_params(&build(builder())), None);
    }

    #[test]
    fn test_certificate_pair() {
        let config = build(builder().certificate("cert.pfx", "hunter2"));
        let cert = Path::new("cert.pfx").absolutize().unwrap().into_owned();
        assert_eq!(
            sign_params(&config),
            Some(format!("/a /f \"{}\" /p \"hunter2\"", cert.display()))
        );
        assert!(should_sign(&config));
    }

    #[test]
    fn test_explicit_params_win() {
        let config = build(
            builder()
                .certificate("cert.pfx", "hunter2")
                .sign_with_params("/n \"My Company\" /tr http://ts"),
        );
        assert_eq!(
            sign_params(&config).as_deref(),
            Some("/n \"My Company\" /tr http://ts")
        );
    }

    #[test]
    fn test_certificate_without_password_is_unsigned() {
        let options = crate::bundler::InstallerOptions {
            app_directory: Some("app".into()),
            certificate_file: Some("cert.pfx".into()),
            ..Default::default()
        };
        let config = build(ConfigurationBuilder::from(options));
        assert!(!should_sign(&config));
    }
}
