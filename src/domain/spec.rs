//! Desired deployment state.

use std::collections::BTreeMap;

use url::Url;

use super::name::ApplicationName;
use crate::error::ResolutionError;

/// The complete desired state for one deployment invocation.
///
/// Assembled by the resolver from the remote package manifest and the local
/// parameter file, then handed to the reconciler. The spec is additive: it
/// names what must exist, never what should be removed.
#[derive(Debug, Clone)]
pub struct DeploymentSpec {
    /// Source package location, also used as the provisioning download URI.
    pub remote_url: Url,
    /// Application type name from the package manifest.
    pub type_name: String,
    /// Application type version from the package manifest. Part of the type
    /// identity: the same name with a different version is a different type.
    pub type_version: String,
    /// Canonical application instance name.
    pub application_name: ApplicationName,
    /// Application parameters keyed by name. Sorted for stable logging.
    pub parameters: BTreeMap<String, String>,
    /// Services to ensure, in manifest order.
    pub services: Vec<ServiceDeploymentSpec>,
}

/// One service to ensure within the application.
#[derive(Debug, Clone)]
pub struct ServiceDeploymentSpec {
    /// Service type name as declared in the service manifest.
    pub service_type_name: String,
    /// Name local to the application; the full service name is derived
    /// from the application name at reconcile time.
    pub local_name: String,
    /// Opaque initialization payload, passed through unmodified.
    pub initialization_data: Vec<u8>,
}

impl DeploymentSpec {
    /// Check identity fields before any cluster interaction.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::EmptyField`] naming the first empty
    /// identity field. The application name is already non-empty by
    /// construction.
    pub fn validate(&self) -> Result<(), ResolutionError> {
        if self.type_name.trim().is_empty() {
            return Err(ResolutionError::EmptyField {
                field: "ApplicationTypeName",
            });
        }
        if self.type_version.trim().is_empty() {
            return Err(ResolutionError::EmptyField {
                field: "ApplicationTypeVersion",
            });
        }
        for service in &self.services {
            if service.local_name.trim().is_empty() {
                return Err(ResolutionError::EmptyField {
                    field: "service name",
                });
            }
            if service.service_type_name.trim().is_empty() {
                return Err(ResolutionError::EmptyField {
                    field: "ServiceTypeName",
                });
            }
        }
        Ok(())
    }
}
