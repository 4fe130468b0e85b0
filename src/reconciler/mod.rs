//! Idempotent deployment reconciliation.
//!
//! Three ordered stages, each a query-compare-act step against the cluster:
//!
//! 1. **Type provisioning**: provision the application type unless an entry
//!    with the exact name and version already exists.
//! 2. **Application creation**: create the application instance unless its
//!    canonical name is already deployed.
//! 3. **Service creation**: for each declared service, create it unless it
//!    already exists. Runs when stage 2 created the application, or for
//!    pre-existing applications when
//!    [`ReconcileOptions::reconcile_existing_services`] is set.
//!
//! Every stage is independently idempotent, so a converged cluster yields a
//! run with zero writes. The first error aborts the remaining sequence and
//! nothing is rolled back: re-running the invocation is the recovery path.
//! Concurrent invocations against the same target are not protected.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info};

use crate::domain::{DeploymentSpec, ServiceName};
use crate::error::{ProvisionError, Result};
use crate::port::cluster::{
    ApplicationDescription, ClusterClient, ProvisionRequest, ServiceDescription,
};

/// Default bound on a single provisioning call.
pub const DEFAULT_PROVISION_TIMEOUT: Duration = Duration::from_secs(300);

/// Created services are stateless singletons with one instance.
const SERVICE_INSTANCE_COUNT: i64 = 1;

/// Tuning knobs for a reconcile invocation.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Upper bound on the provisioning call, including the wait for the
    /// cluster to finish registering the type.
    pub provision_timeout: Duration,
    /// Run the service stage even when the application already existed.
    ///
    /// Off by default: services are normally only created together with
    /// their application, and service changes to an existing application
    /// require opting in.
    pub reconcile_existing_services: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            provision_timeout: DEFAULT_PROVISION_TIMEOUT,
            reconcile_existing_services: false,
        }
    }
}

/// How the type stage resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAction {
    Provisioned,
    AlreadyProvisioned,
}

/// How the application stage resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Created,
    AlreadyExists,
}

/// Outcome of a completed reconcile invocation.
#[derive(Debug)]
pub struct ReconcileReport {
    pub type_action: TypeAction,
    pub app_action: AppAction,
    pub services_created: Vec<ServiceName>,
    pub services_skipped: Vec<ServiceName>,
}

impl ReconcileReport {
    /// Number of state-changing operations performed.
    #[must_use]
    pub fn writes(&self) -> usize {
        let mut writes = self.services_created.len();
        if self.type_action == TypeAction::Provisioned {
            writes += 1;
        }
        if self.app_action == AppAction::Created {
            writes += 1;
        }
        writes
    }

    /// True when the cluster already matched the spec completely.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.writes() == 0
    }
}

/// Drives a deployment spec to convergence against a [`ClusterClient`].
pub struct Reconciler {
    cluster: Arc<dyn ClusterClient>,
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(cluster: Arc<dyn ClusterClient>) -> Self {
        Self::with_options(cluster, ReconcileOptions::default())
    }

    pub fn with_options(cluster: Arc<dyn ClusterClient>, options: ReconcileOptions) -> Self {
        Self { cluster, options }
    }

    /// Reconcile the cluster towards the spec.
    ///
    /// # Errors
    ///
    /// Returns the first stage error and performs no further operations:
    /// [`ResolutionError`](crate::error::ResolutionError) from pre-flight
    /// validation, [`ProvisionError`](crate::error::ProvisionError) from the
    /// type stage, [`CreationError`](crate::error::CreationError) from the
    /// application and service stages.
    pub async fn reconcile(&self, spec: &DeploymentSpec) -> Result<ReconcileReport> {
        spec.validate()?;

        info!(
            endpoint = self.cluster.endpoint_name(),
            type_name = %spec.type_name,
            type_version = %spec.type_version,
            application = %spec.application_name,
            "Reconciling deployment"
        );

        let type_action = self.ensure_application_type(spec).await?;
        let app_action = self.ensure_application(spec).await?;

        let (services_created, services_skipped) =
            if app_action == AppAction::Created || self.options.reconcile_existing_services {
                if app_action == AppAction::AlreadyExists {
                    info!(
                        application = %spec.application_name,
                        "Reconciling services of existing application"
                    );
                }
                self.ensure_services(spec).await?
            } else {
                (Vec::new(), Vec::new())
            };

        let report = ReconcileReport {
            type_action,
            app_action,
            services_created,
            services_skipped,
        };
        info!(
            writes = report.writes(),
            services_created = report.services_created.len(),
            services_skipped = report.services_skipped.len(),
            "Reconciliation complete"
        );
        Ok(report)
    }

    async fn ensure_application_type(&self, spec: &DeploymentSpec) -> Result<TypeAction> {
        let types = self.cluster.list_application_types(&spec.type_name).await?;
        let provisioned = types
            .iter()
            .any(|t| t.name == spec.type_name && t.version == spec.type_version);
        if provisioned {
            info!(
                type_name = %spec.type_name,
                type_version = %spec.type_version,
                "Application type already provisioned, skipping"
            );
            return Ok(TypeAction::AlreadyProvisioned);
        }

        info!(
            type_name = %spec.type_name,
            type_version = %spec.type_version,
            url = %spec.remote_url,
            "Provisioning application type"
        );
        let request = ProvisionRequest {
            package_url: spec.remote_url.clone(),
            type_name: spec.type_name.clone(),
            type_version: spec.type_version.clone(),
        };
        let provision = self.cluster.provision_application_type(&request);
        match timeout(self.options.provision_timeout, provision).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ProvisionError::TimedOut {
                    type_name: spec.type_name.clone(),
                    type_version: spec.type_version.clone(),
                    seconds: self.options.provision_timeout.as_secs(),
                }
                .into())
            }
        }
        info!(
            type_name = %spec.type_name,
            type_version = %spec.type_version,
            "Application type provisioned"
        );
        Ok(TypeAction::Provisioned)
    }

    async fn ensure_application(&self, spec: &DeploymentSpec) -> Result<AppAction> {
        let applications = self.cluster.list_applications(&spec.application_name).await?;
        let exists = applications
            .iter()
            .any(|a| a.name == spec.application_name.as_uri());
        if exists {
            info!(
                application = %spec.application_name,
                "Application already exists, skipping creation"
            );
            return Ok(AppAction::AlreadyExists);
        }

        info!(
            application = %spec.application_name,
            parameters = spec.parameters.len(),
            "Creating application"
        );
        let description = ApplicationDescription {
            name: spec.application_name.clone(),
            type_name: spec.type_name.clone(),
            type_version: spec.type_version.clone(),
            parameters: spec.parameters.clone(),
        };
        self.cluster.create_application(&description).await?;
        info!(application = %spec.application_name, "Application created");
        Ok(AppAction::Created)
    }

    async fn ensure_services(
        &self,
        spec: &DeploymentSpec,
    ) -> Result<(Vec<ServiceName>, Vec<ServiceName>)> {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for service in &spec.services {
            let name = spec.application_name.service(&service.local_name);
            debug!(service = %name, "Checking service");
            let existing = self
                .cluster
                .list_services(&spec.application_name, &name)
                .await?;
            if existing.iter().any(|s| s.name == name.as_uri()) {
                info!(service = %name, "Service already exists, skipping");
                skipped.push(name);
                continue;
            }

            info!(
                service = %name,
                service_type = %service.service_type_name,
                "Creating service"
            );
            let description = ServiceDescription {
                application_name: spec.application_name.clone(),
                service_name: name.clone(),
                service_type_name: service.service_type_name.clone(),
                initialization_data: service.initialization_data.clone(),
                instance_count: SERVICE_INSTANCE_COUNT,
            };
            self.cluster.create_service(&description).await?;
            info!(service = %name, "Service created");
            created.push(name);
        }

        Ok((created, skipped))
    }
}
