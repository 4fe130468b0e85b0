//! Service Fabric REST API wire types.
//!
//! The REST API speaks PascalCase JSON. Query responses for filtered
//! collections arrive as pages:
//!
//! ```json
//! {"ContinuationToken":"","Items":[{"Name":"ShopType","Version":"1.0.0","Status":"Available"}]}
//! ```
//!
//! Lookups addressed by resource id (`GET /Applications/{id}`) return a
//! single object instead of a page.

use serde::{Deserialize, Serialize};

use crate::port::{
    ApplicationDescription, ApplicationInfo, ApplicationTypeInfo, ProvisionRequest,
    ServiceDescription, ServiceInfo,
};

/// One page of application type query results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationTypePage {
    #[serde(default)]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub items: Vec<ApplicationTypeDto>,
}

/// Application type entry as reported by the cluster.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationTypeDto {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_details: String,
}

impl From<ApplicationTypeDto> for ApplicationTypeInfo {
    fn from(dto: ApplicationTypeDto) -> Self {
        Self {
            name: dto.name,
            version: dto.version,
        }
    }
}

/// Application instance as reported by the cluster.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationDto {
    pub name: String,
    pub type_name: String,
    pub type_version: String,
}

impl From<ApplicationDto> for ApplicationInfo {
    fn from(dto: ApplicationDto) -> Self {
        Self {
            name: dto.name,
            type_name: dto.type_name,
            type_version: dto.type_version,
        }
    }
}

/// Service instance as reported by the cluster.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceDto {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
}

impl From<ServiceDto> for ServiceInfo {
    fn from(dto: ServiceDto) -> Self {
        Self {
            name: dto.name,
            type_name: dto.type_name,
        }
    }
}

/// Body of `POST /ApplicationTypes/$/Provision`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionBody {
    pub kind: String,
    pub application_package_download_uri: String,
    pub application_type_name: String,
    pub application_type_version: String,
}

impl ProvisionBody {
    /// Build an external-store provision request body.
    #[must_use]
    pub fn new(request: &ProvisionRequest) -> Self {
        Self {
            kind: "ExternalStore".into(),
            application_package_download_uri: request.package_url.to_string(),
            application_type_name: request.type_name.clone(),
            application_type_version: request.type_version.clone(),
        }
    }
}

/// Body of `POST /Applications/$/Create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateApplicationBody {
    pub name: String,
    pub type_name: String,
    pub type_version: String,
    pub parameter_list: Vec<ParameterDto>,
}

impl From<&ApplicationDescription> for CreateApplicationBody {
    fn from(description: &ApplicationDescription) -> Self {
        Self {
            name: description.name.as_uri().to_owned(),
            type_name: description.type_name.clone(),
            type_version: description.type_version.clone(),
            parameter_list: description
                .parameters
                .iter()
                .map(|(key, value)| ParameterDto {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Application parameter override.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDto {
    pub key: String,
    pub value: String,
}

/// Body of `POST /Applications/{id}/$/GetServices/$/Create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateServiceBody {
    pub service_kind: String,
    pub service_name: String,
    pub service_type_name: String,
    pub initialization_data: Vec<u8>,
    pub partition_description: PartitionDescriptionDto,
    pub instance_count: i64,
}

impl From<&ServiceDescription> for CreateServiceBody {
    fn from(description: &ServiceDescription) -> Self {
        Self {
            service_kind: "Stateless".into(),
            service_name: description.service_name.as_uri().to_owned(),
            service_type_name: description.service_type_name.clone(),
            initialization_data: description.initialization_data.clone(),
            partition_description: PartitionDescriptionDto::singleton(),
            instance_count: description.instance_count,
        }
    }
}

/// Partition layout of a new service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartitionDescriptionDto {
    pub partition_scheme: String,
}

impl PartitionDescriptionDto {
    #[must_use]
    pub fn singleton() -> Self {
        Self {
            partition_scheme: "Singleton".into(),
        }
    }
}

/// Error envelope returned by the cluster on failed requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FabricError {
    pub error: FabricErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FabricErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
