//! Cluster control plane port.
//!
//! This module defines the capability trait the reconciler drives and the
//! typed records exchanged across it. Query methods express absence as an
//! empty list, never as an error: adapters map not-found lookups to empty
//! results so the reconciler only ever does list-then-match.

use std::collections::BTreeMap;

use async_trait::async_trait;
use url::Url;

use crate::domain::{ApplicationName, ServiceName};
use crate::error::Result;

/// Identity of a provisioned application type.
///
/// Both fields participate in identity: the same name with a different
/// version is a different type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationTypeInfo {
    pub name: String,
    pub version: String,
}

/// A deployed application instance as reported by the cluster.
#[derive(Debug, Clone)]
pub struct ApplicationInfo {
    /// Canonical `fabric:/` URI.
    pub name: String,
    pub type_name: String,
    pub type_version: String,
}

/// A running service as reported by the cluster.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    /// Full `fabric:/` URI.
    pub name: String,
    pub type_name: String,
}

/// Request to provision an application type from an external package store.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Download URI the cluster fetches the package from.
    pub package_url: Url,
    pub type_name: String,
    pub type_version: String,
}

/// Desired application instance.
#[derive(Debug, Clone)]
pub struct ApplicationDescription {
    pub name: ApplicationName,
    pub type_name: String,
    pub type_version: String,
    pub parameters: BTreeMap<String, String>,
}

/// Desired stateless service with a singleton partition.
#[derive(Debug, Clone)]
pub struct ServiceDescription {
    pub application_name: ApplicationName,
    pub service_name: ServiceName,
    pub service_type_name: String,
    pub initialization_data: Vec<u8>,
    pub instance_count: i64,
}

/// Read and write access to the cluster control plane.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List provisioned application types matching the given type name.
    ///
    /// Returns every version of the named type; the empty list means the
    /// name is unknown to the cluster.
    async fn list_application_types(&self, type_name: &str) -> Result<Vec<ApplicationTypeInfo>>;

    /// Register an application type from an external package store.
    ///
    /// Resolves once the type is usable for application creation. Callers
    /// bound the wait; dropping the future abandons it.
    async fn provision_application_type(&self, request: &ProvisionRequest) -> Result<()>;

    /// List applications whose name matches exactly.
    async fn list_applications(&self, name: &ApplicationName) -> Result<Vec<ApplicationInfo>>;

    /// Create an application instance.
    async fn create_application(&self, description: &ApplicationDescription) -> Result<()>;

    /// List services of the given application whose name matches exactly.
    async fn list_services(
        &self,
        application: &ApplicationName,
        name: &ServiceName,
    ) -> Result<Vec<ServiceInfo>>;

    /// Create a service within an existing application.
    async fn create_service(&self, description: &ServiceDescription) -> Result<()>;

    /// Get the endpoint name for logging/debugging.
    fn endpoint_name(&self) -> &str;
}
