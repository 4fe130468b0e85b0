//! Application manifest extraction and parsing.
//!
//! The manifest lives at the root of the package archive and carries the
//! application type identity plus the default services to create alongside
//! the application. Tag matching ignores namespaces because real manifests
//! declare the fabric schema as their default namespace.

use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use tracing::warn;

use super::required_attribute;
use crate::domain::ServiceDeploymentSpec;
use crate::error::{ResolutionError, Result};

/// Archive entry holding the application manifest.
pub const MANIFEST_ENTRY: &str = "ApplicationManifest.xml";

/// Identity and default services declared by an application package.
#[derive(Debug, Clone)]
pub struct ApplicationManifest {
    pub type_name: String,
    pub type_version: String,
    pub default_services: Vec<ServiceDeploymentSpec>,
}

/// Read the manifest out of a package archive.
///
/// # Errors
///
/// Returns [`ResolutionError::Archive`] for unreadable archives,
/// [`ResolutionError::MissingEntry`] when the manifest is absent, and the
/// parse errors of [`parse`].
pub fn from_package(bytes: &[u8]) -> Result<ApplicationManifest> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(ResolutionError::Archive)?;
    let mut entry = match archive.by_name(MANIFEST_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ResolutionError::MissingEntry {
                entry: MANIFEST_ENTRY,
            }
            .into())
        }
        Err(err) => return Err(ResolutionError::Archive(err).into()),
    };
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    parse(&xml)
}

/// Parse manifest XML.
///
/// # Errors
///
/// Returns [`ResolutionError::Parse`] for malformed XML and
/// [`ResolutionError::MissingAttribute`] when the root lacks the type
/// identity attributes.
pub fn parse(xml: &str) -> Result<ApplicationManifest> {
    let doc = Document::parse(xml).map_err(|source| ResolutionError::Parse {
        document: MANIFEST_ENTRY,
        source,
    })?;
    let root = doc.root_element();
    let type_name = required_attribute(root, MANIFEST_ENTRY, "ApplicationTypeName")?;
    let type_version = required_attribute(root, MANIFEST_ENTRY, "ApplicationTypeVersion")?;
    let default_services = default_services(root);
    Ok(ApplicationManifest {
        type_name,
        type_version,
        default_services,
    })
}

fn default_services(root: Node<'_, '_>) -> Vec<ServiceDeploymentSpec> {
    let mut services = Vec::new();
    let Some(section) = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "DefaultServices")
    else {
        return services;
    };

    for node in section
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Service")
    {
        // Entries without a Name (e.g. GeneratedIdRef references) cannot be
        // addressed as children of the application.
        let Some(name) = node.attribute("Name") else {
            continue;
        };
        let stateless = node
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "StatelessService");
        let Some(stateless) = stateless else {
            warn!(service = name, "Skipping non-stateless default service");
            continue;
        };
        let Some(type_name) = stateless.attribute("ServiceTypeName") else {
            warn!(service = name, "Skipping default service without ServiceTypeName");
            continue;
        };
        services.push(ServiceDeploymentSpec {
            service_type_name: type_name.into(),
            local_name: name.into(),
            initialization_data: Vec::new(),
        });
    }
    services
}
