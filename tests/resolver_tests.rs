//! Resolution integration tests.
//!
//! Exercises the file and archive boundaries of the resolver: parameter
//! files on disk and manifests inside real package archives.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use sfdeploy::error::{Error, ResolutionError};
use sfdeploy::resolver::{manifest, parameters};
use sfdeploy::testkit::package;

#[test]
fn parameters_file_on_disk_resolves_name_and_overrides() {
    let xml = package::parameters_xml(
        "fabric:/Shop",
        &[("Environment", "staging"), ("CartInstanceCount", "2")],
    );
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(xml.as_bytes()).unwrap();

    let parsed = parameters::from_file(file.path()).unwrap();

    assert_eq!(parsed.application_name.as_uri(), "fabric:/Shop");
    assert_eq!(
        parsed.parameters.get("Environment").map(String::as_str),
        Some("staging")
    );
    assert_eq!(
        parsed.parameters.get("CartInstanceCount").map(String::as_str),
        Some("2")
    );
}

#[test]
fn missing_parameters_file_reports_the_path() {
    let err = parameters::from_file(Path::new("/nonexistent/params.xml")).unwrap_err();
    match err {
        Error::Resolution(ResolutionError::ReadParameters { path, .. }) => {
            assert_eq!(path, PathBuf::from("/nonexistent/params.xml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn packaged_manifest_resolves_type_identity() {
    let manifest_xml = package::manifest_xml("ShopType", "3.1.4");
    let bytes = package_with_service_packages(&manifest_xml);

    let manifest = manifest::from_package(&bytes).unwrap();

    assert_eq!(manifest.type_name, "ShopType");
    assert_eq!(manifest.type_version, "3.1.4");
    assert!(manifest.default_services.is_empty());
}

#[test]
fn packaged_manifest_resolves_stateless_default_services() {
    let manifest_xml = package::manifest_with_default_services(
        "ShopType",
        "1.0.0",
        r#"<Service Name="cart">
             <StatelessService ServiceTypeName="CartType" InstanceCount="1">
               <SingletonPartition />
             </StatelessService>
           </Service>"#,
    );
    let bytes = package_with_service_packages(&manifest_xml);

    let manifest = manifest::from_package(&bytes).unwrap();

    assert_eq!(manifest.default_services.len(), 1);
    assert_eq!(manifest.default_services[0].local_name, "cart");
    assert_eq!(manifest.default_services[0].service_type_name, "CartType");
}

#[test]
fn package_without_manifest_is_rejected() {
    let bytes = package::package_with_entries(&[(
        "CartPkg/ServiceManifest.xml",
        "<ServiceManifest/>",
    )]);

    let err = manifest::from_package(&bytes).unwrap_err();

    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::MissingEntry { .. })
    ));
}

/// Archive shaped like a real sfpkg: manifest at the root plus service
/// package subdirectories.
fn package_with_service_packages(manifest_xml: &str) -> Vec<u8> {
    package::package_with_entries(&[
        ("ApplicationManifest.xml", manifest_xml),
        ("CartPkg/ServiceManifest.xml", "<ServiceManifest/>"),
        ("CartPkg/Code/entry.txt", "placeholder"),
    ])
}
