//! Application package and deployment document fixtures.
//!
//! Builds in-memory package archives and the XML documents the resolver
//! consumes, with the namespaces real manifests carry.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const FABRIC_NS: &str = "http://schemas.microsoft.com/2011/01/fabric";

/// Build a package archive containing the given `(entry name, contents)` pairs.
pub fn package_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Build a package archive whose manifest declares the given type identity.
pub fn package(type_name: &str, type_version: &str) -> Vec<u8> {
    package_with_entries(&[(
        "ApplicationManifest.xml",
        &manifest_xml(type_name, type_version),
    )])
}

/// Minimal application manifest with the given identity and no services.
pub fn manifest_xml(type_name: &str, type_version: &str) -> String {
    manifest_with_default_services(type_name, type_version, "")
}

/// Application manifest with the given identity and raw `<DefaultServices>`
/// content (pass service elements as written in a real manifest).
pub fn manifest_with_default_services(
    type_name: &str,
    type_version: &str,
    services: &str,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<ApplicationManifest ApplicationTypeName="{type_name}" ApplicationTypeVersion="{type_version}" xmlns="{FABRIC_NS}" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Parameters>
    <Parameter Name="InstanceCount" DefaultValue="1" />
  </Parameters>
  <DefaultServices>
    {services}
  </DefaultServices>
</ApplicationManifest>
"#
    )
}

/// Parameter document naming the given application with key/value pairs.
pub fn parameters_xml(application: &str, parameters: &[(&str, &str)]) -> String {
    let entries: String = parameters
        .iter()
        .map(|(name, value)| format!(r#"    <Parameter Name="{name}" Value="{value}" />"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Application Name="{application}" xmlns="{FABRIC_NS}">
  <Parameters>
{entries}
  </Parameters>
</Application>
"#
    )
}
