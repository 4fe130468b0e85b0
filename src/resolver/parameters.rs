//! Application parameters file parsing.
//!
//! The parameters file names the application instance and overrides manifest
//! parameter defaults. Duplicate parameter names are rejected rather than
//! silently last-writer-wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use roxmltree::Document;

use super::required_attribute;
use crate::domain::ApplicationName;
use crate::error::{ResolutionError, Result};

const PARAMETERS_DOCUMENT: &str = "application parameters";

/// Instance name and parameter overrides read from a parameters file.
#[derive(Debug, Clone)]
pub struct ApplicationParameters {
    pub application_name: ApplicationName,
    pub parameters: BTreeMap<String, String>,
}

/// Load and parse a parameters file from disk.
///
/// # Errors
///
/// Returns [`ResolutionError::ReadParameters`] when the file cannot be read,
/// plus the parse errors of [`parse`].
pub fn from_file(path: &Path) -> Result<ApplicationParameters> {
    let xml = fs::read_to_string(path).map_err(|source| ResolutionError::ReadParameters {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&xml)
}

/// Parse parameters XML.
///
/// # Errors
///
/// Returns [`ResolutionError::Parse`] for malformed XML,
/// [`ResolutionError::MissingAttribute`] for entries without Name or Value,
/// and [`ResolutionError::DuplicateParameter`] when a name repeats.
pub fn parse(xml: &str) -> Result<ApplicationParameters> {
    let doc = Document::parse(xml).map_err(|source| ResolutionError::Parse {
        document: PARAMETERS_DOCUMENT,
        source,
    })?;
    let root = doc.root_element();
    let name = required_attribute(root, PARAMETERS_DOCUMENT, "Name")?;
    let application_name = ApplicationName::parse(&name)?;

    let mut parameters = BTreeMap::new();
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Parameter")
    {
        let name = required_attribute(node, PARAMETERS_DOCUMENT, "Name")?;
        let value = required_attribute(node, PARAMETERS_DOCUMENT, "Value")?;
        if parameters.insert(name.clone(), value).is_some() {
            return Err(ResolutionError::DuplicateParameter { name }.into());
        }
    }

    Ok(ApplicationParameters {
        application_name,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::package;

    #[test]
    fn parse_reads_name_and_overrides() {
        let xml = package::parameters_xml(
            "fabric:/Shop",
            &[("Environment", "prod"), ("Replicas", "3")],
        );
        let parsed = parse(&xml).unwrap();
        assert_eq!(parsed.application_name.as_uri(), "fabric:/Shop");
        assert_eq!(
            parsed.parameters.get("Environment").map(String::as_str),
            Some("prod")
        );
        assert_eq!(
            parsed.parameters.get("Replicas").map(String::as_str),
            Some("3")
        );
    }

    #[test]
    fn parse_accepts_file_without_parameters() {
        let xml = package::parameters_xml("fabric:/Shop", &[]);
        let parsed = parse(&xml).unwrap();
        assert!(parsed.parameters.is_empty());
    }

    #[test]
    fn parse_normalizes_bare_application_name() {
        let xml = package::parameters_xml("Shop", &[]);
        let parsed = parse(&xml).unwrap();
        assert_eq!(parsed.application_name.as_uri(), "fabric:/Shop");
    }

    #[test]
    fn parse_rejects_duplicate_parameter_names() {
        let xml = package::parameters_xml("fabric:/Shop", &[("Env", "a"), ("Env", "b")]);
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::DuplicateParameter { ref name }) if name == "Env"
        ));
    }

    #[test]
    fn parse_rejects_missing_application_name() {
        let err = parse("<Application></Application>").unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::MissingAttribute {
                attribute: "Name",
                ..
            })
        ));
    }

    #[test]
    fn parse_rejects_parameter_without_value() {
        let xml = r#"<Application Name="fabric:/Shop">
                       <Parameters>
                         <Parameter Name="Env" />
                       </Parameters>
                     </Application>"#;
        let err = parse(xml).unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::MissingAttribute {
                attribute: "Value",
                ..
            })
        ));
    }

    #[test]
    fn parse_rejects_malformed_xml() {
        let err = parse("<Application Name=").unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::Parse { .. })
        ));
    }
}
