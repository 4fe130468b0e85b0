//! Service Fabric cluster REST client.
//!
//! Talks to the cluster HTTP gateway (default port 19080). Resource ids in
//! paths are the `fabric:/` URI with the scheme stripped and `/` replaced by
//! `~`, so `fabric:/Shop/cart` is addressed as `Shop~cart`.
//!
//! Queries for absent resources return 404; those are mapped to empty lists
//! so callers can treat existence checks uniformly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dto::{
    ApplicationDto, ApplicationTypeDto, ApplicationTypePage, CreateApplicationBody,
    CreateServiceBody, FabricError, ProvisionBody, ServiceDto,
};
use crate::config::ClusterConfig;
use crate::domain::{ApplicationName, ServiceName};
use crate::error::{CreationError, ProvisionError, Result};
use crate::port::{
    ApplicationDescription, ApplicationInfo, ApplicationTypeInfo, ClusterClient, ProvisionRequest,
    ServiceDescription, ServiceInfo,
};

const API_VERSION: &str = "6.0";
/// External-store provisioning was added to the REST surface in 6.2.
const PROVISION_API_VERSION: &str = "6.2";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

const STATUS_AVAILABLE: &str = "Available";
const STATUS_FAILED: &str = "Failed";

/// HTTP client for the Service Fabric cluster management endpoint.
pub struct FabricRestClient {
    http: HttpClient,
    /// Gateway base URL without a trailing slash.
    base_url: String,
    /// Delay between provisioning status polls.
    poll_interval: Duration,
}

impl FabricRestClient {
    /// Create a client for the given gateway URL with default HTTP settings.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn from_config(config: &ClusterConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    fn url(&self, path: &str, api_version: &str) -> String {
        format!("{}/{}?api-version={}", self.base_url, path, api_version)
    }

    /// Fetch every version of a type name, following continuation tokens.
    async fn fetch_application_types(&self, type_name: &str) -> Result<Vec<ApplicationTypeDto>> {
        let url = self.url(&format!("ApplicationTypes/{type_name}"), API_VERSION);
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self.http.get(&url);
            if let Some(token) = &continuation {
                request = request.query(&[("ContinuationToken", token.as_str())]);
            }
            let response = request.send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(items);
            }
            let page: ApplicationTypePage = response.error_for_status()?.json().await?;
            items.extend(page.items);
            match page.continuation_token {
                Some(token) if !token.is_empty() => continuation = Some(token),
                _ => return Ok(items),
            }
        }
    }

    /// Poll the type list until provisioning reaches a terminal status.
    ///
    /// The loop itself is unbounded; callers bound the wait and abandon the
    /// future on timeout.
    async fn await_provisioned(&self, type_name: &str, type_version: &str) -> Result<()> {
        loop {
            let types = self.fetch_application_types(type_name).await?;
            let entry = types
                .iter()
                .find(|t| t.name == type_name && t.version == type_version);

            if let Some(entry) = entry {
                match entry.status.as_str() {
                    STATUS_AVAILABLE => {
                        info!(type_name, type_version, "Application type provisioned");
                        return Ok(());
                    }
                    STATUS_FAILED => {
                        let reason = if entry.status_details.is_empty() {
                            "provisioning failed".to_owned()
                        } else {
                            entry.status_details.clone()
                        };
                        return Err(ProvisionError::Rejected {
                            type_name: type_name.to_owned(),
                            type_version: type_version.to_owned(),
                            reason,
                        }
                        .into());
                    }
                    status => {
                        debug!(type_name, type_version, status, "Provisioning in progress");
                    }
                }
            }

            sleep(self.poll_interval).await;
        }
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<FabricError>().await {
            Ok(body) => format!("{}: {}", body.error.code, body.error.message),
            Err(_) => format!("HTTP {status}"),
        }
    }
}

#[async_trait]
impl ClusterClient for FabricRestClient {
    async fn list_application_types(&self, type_name: &str) -> Result<Vec<ApplicationTypeInfo>> {
        let types = self.fetch_application_types(type_name).await?;
        debug!(type_name, count = types.len(), "Queried application types");
        Ok(types.into_iter().map(ApplicationTypeInfo::from).collect())
    }

    async fn provision_application_type(&self, request: &ProvisionRequest) -> Result<()> {
        let url = self.url("ApplicationTypes/$/Provision", PROVISION_API_VERSION);
        let body = ProvisionBody::new(request);
        info!(
            type_name = %request.type_name,
            type_version = %request.type_version,
            package_url = %request.package_url,
            "Provisioning application type"
        );

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let reason = Self::error_message(response).await;
            return Err(ProvisionError::Rejected {
                type_name: request.type_name.clone(),
                type_version: request.type_version.clone(),
                reason,
            }
            .into());
        }

        self.await_provisioned(&request.type_name, &request.type_version)
            .await
    }

    async fn list_applications(&self, name: &ApplicationName) -> Result<Vec<ApplicationInfo>> {
        let url = self.url(&format!("Applications/{}", name.id()), API_VERSION);
        debug!(application = %name, "Querying application");

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let dto: ApplicationDto = response.error_for_status()?.json().await?;
        Ok(vec![dto.into()])
    }

    async fn create_application(&self, description: &ApplicationDescription) -> Result<()> {
        let url = self.url("Applications/$/Create", API_VERSION);
        let body = CreateApplicationBody::from(description);
        info!(
            application = %description.name,
            type_name = %description.type_name,
            type_version = %description.type_version,
            "Creating application"
        );

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let reason = Self::error_message(response).await;
            return Err(CreationError::Application {
                name: description.name.as_uri().to_owned(),
                reason,
            }
            .into());
        }
        Ok(())
    }

    async fn list_services(
        &self,
        application: &ApplicationName,
        name: &ServiceName,
    ) -> Result<Vec<ServiceInfo>> {
        let url = self.url(
            &format!("Applications/{}/$/GetServices/{}", application.id(), name.id()),
            API_VERSION,
        );
        debug!(service = %name, "Querying service");

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let dto: ServiceDto = response.error_for_status()?.json().await?;
        Ok(vec![dto.into()])
    }

    async fn create_service(&self, description: &ServiceDescription) -> Result<()> {
        let url = self.url(
            &format!(
                "Applications/{}/$/GetServices/$/Create",
                description.application_name.id()
            ),
            API_VERSION,
        );
        let body = CreateServiceBody::from(description);
        info!(
            service = %description.service_name,
            service_type = %description.service_type_name,
            "Creating service"
        );

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let reason = Self::error_message(response).await;
            return Err(CreationError::Service {
                name: description.service_name.as_uri().to_owned(),
                reason,
            }
            .into());
        }
        Ok(())
    }

    fn endpoint_name(&self) -> &str {
        &self.base_url
    }
}
