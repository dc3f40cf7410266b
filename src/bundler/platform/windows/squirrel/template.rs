//! Built-in nuspec template.
//!
//! Rendered with handlebars' default escaping, which produces valid XML
//! character references for every substituted field.

/// Manifest describing an Electron app laid out for Squirrel (`lib/net45`).
///
/// File paths use `/`: a backslash directly before `{{` would escape the
/// expression in handlebars.
pub const NUSPEC_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2010/07/nuspec.xsd">
  <metadata>
    <id>{{name}}</id>
    <title>{{title}}</title>
    <version>{{version}}</version>
    <authors>{{authors}}</authors>
    <owners>{{owners}}</owners>
    <iconUrl>{{icon_url}}</iconUrl>
    <requireLicenseAcceptance>false</requireLicenseAcceptance>
    <description>{{description}}</description>
  </metadata>
  <files>
    <file src="locales/**" target="lib/net45/locales" />
    <file src="resources/**" target="lib/net45/resources" />
    <file src="*.bin" target="lib/net45" />
    <file src="*.dll" target="lib/net45" />
    <file src="*.pak" target="lib/net45" />
    <file src="Update.exe" target="lib/net45/squirrel.exe" />
    <file src="icudtl.dat" target="lib/net45/icudtl.dat" />
    <file src="LICENSE" target="lib/net45/LICENSE" />
    <file src="{{exe}}" target="lib/net45/{{exe}}" />
  </files>
</package>
"#;
