//! Builders for deployment specs used across tests.
//!
//! Factory functions keep tests focused on assertions rather than
//! construction boilerplate.

use std::collections::BTreeMap;

use url::Url;

use crate::domain::{ApplicationName, DeploymentSpec, ServiceDeploymentSpec};

/// Build a deployment spec with no parameters or services.
pub fn deployment_spec(type_name: &str, type_version: &str, application: &str) -> DeploymentSpec {
    DeploymentSpec {
        remote_url: Url::parse("https://packages.example.com/app.sfpkg").unwrap(),
        type_name: type_name.into(),
        type_version: type_version.into(),
        application_name: ApplicationName::parse(application).unwrap(),
        parameters: BTreeMap::new(),
        services: Vec::new(),
    }
}

/// Service entry for extending a spec.
pub fn service(service_type_name: &str, local_name: &str) -> ServiceDeploymentSpec {
    ServiceDeploymentSpec {
        service_type_name: service_type_name.into(),
        local_name: local_name.into(),
        initialization_data: Vec::new(),
    }
}
