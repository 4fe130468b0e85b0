//! Mock [`ClusterClient`] implementation for testing.
//!
//! [`InMemoryCluster`] holds real cluster state: reads reflect it and
//! successful writes mutate it, so a second reconcile run against the same
//! instance observes everything the first run created. Write results can be
//! scripted per operation to exercise failure paths.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ApplicationName, ServiceName};
use crate::error::Result;
use crate::port::cluster::{
    ApplicationDescription, ApplicationInfo, ApplicationTypeInfo, ClusterClient, ProvisionRequest,
    ServiceDescription, ServiceInfo,
};

// ---------------------------------------------------------------------------
// ClusterWrite
// ---------------------------------------------------------------------------

/// State-changing operations recorded by [`InMemoryCluster`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterWrite {
    ProvisionType {
        type_name: String,
        type_version: String,
    },
    CreateApplication {
        name: String,
    },
    CreateService {
        name: String,
    },
}

// ---------------------------------------------------------------------------
// InMemoryCluster
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ClusterState {
    types: Vec<ApplicationTypeInfo>,
    applications: Vec<ApplicationInfo>,
    services: Vec<ServiceInfo>,
}

/// A scripted in-memory cluster.
///
/// Each write records itself, then pops the next result from its queue
/// (defaults to `Ok(())` when exhausted). Failed writes leave the state
/// untouched. Read calls are counted so tests can assert that stages were
/// skipped entirely.
pub struct InMemoryCluster {
    state: Mutex<ClusterState>,
    writes: Mutex<Vec<ClusterWrite>>,
    provision_results: Mutex<VecDeque<Result<()>>>,
    create_application_results: Mutex<VecDeque<Result<()>>>,
    create_service_results: Mutex<VecDeque<Result<()>>>,
    provision_delay: Option<Duration>,
    list_type_calls: AtomicU32,
    list_application_calls: AtomicU32,
    list_service_calls: AtomicU32,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ClusterState::default()),
            writes: Mutex::new(Vec::new()),
            provision_results: Mutex::new(VecDeque::new()),
            create_application_results: Mutex::new(VecDeque::new()),
            create_service_results: Mutex::new(VecDeque::new()),
            provision_delay: None,
            list_type_calls: AtomicU32::new(0),
            list_application_calls: AtomicU32::new(0),
            list_service_calls: AtomicU32::new(0),
        }
    }

    /// Seed a provisioned application type.
    pub fn with_application_type(self, name: &str, version: &str) -> Self {
        self.state.lock().unwrap().types.push(ApplicationTypeInfo {
            name: name.into(),
            version: version.into(),
        });
        self
    }

    /// Seed a deployed application. The name is canonicalized.
    pub fn with_application(self, name: &str, type_name: &str, type_version: &str) -> Self {
        let name = ApplicationName::parse(name).unwrap();
        self.state
            .lock()
            .unwrap()
            .applications
            .push(ApplicationInfo {
                name: name.as_uri().into(),
                type_name: type_name.into(),
                type_version: type_version.into(),
            });
        self
    }

    /// Seed a running service under the given application.
    pub fn with_service(self, application: &str, local_name: &str, type_name: &str) -> Self {
        let service = ApplicationName::parse(application)
            .unwrap()
            .service(local_name);
        self.state.lock().unwrap().services.push(ServiceInfo {
            name: service.as_uri().into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn with_provision_results(self, results: Vec<Result<()>>) -> Self {
        *self.provision_results.lock().unwrap() = results.into();
        self
    }

    pub fn with_create_application_results(self, results: Vec<Result<()>>) -> Self {
        *self.create_application_results.lock().unwrap() = results.into();
        self
    }

    pub fn with_create_service_results(self, results: Vec<Result<()>>) -> Self {
        *self.create_service_results.lock().unwrap() = results.into();
        self
    }

    /// Make provisioning sleep before completing, for timeout tests.
    pub fn with_provision_delay(mut self, delay: Duration) -> Self {
        self.provision_delay = Some(delay);
        self
    }

    /// All recorded writes, in call order.
    pub fn writes(&self) -> Vec<ClusterWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn list_type_calls(&self) -> u32 {
        self.list_type_calls.load(Ordering::SeqCst)
    }

    pub fn list_application_calls(&self) -> u32 {
        self.list_application_calls.load(Ordering::SeqCst)
    }

    pub fn list_service_calls(&self) -> u32 {
        self.list_service_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryCluster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterClient for InMemoryCluster {
    async fn list_application_types(&self, type_name: &str) -> Result<Vec<ApplicationTypeInfo>> {
        self.list_type_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state
            .types
            .iter()
            .filter(|t| t.name == type_name)
            .cloned()
            .collect())
    }

    async fn provision_application_type(&self, request: &ProvisionRequest) -> Result<()> {
        self.writes.lock().unwrap().push(ClusterWrite::ProvisionType {
            type_name: request.type_name.clone(),
            type_version: request.type_version.clone(),
        });
        if let Some(delay) = self.provision_delay {
            tokio::time::sleep(delay).await;
        }
        let result = self
            .provision_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        result?;
        self.state.lock().unwrap().types.push(ApplicationTypeInfo {
            name: request.type_name.clone(),
            version: request.type_version.clone(),
        });
        Ok(())
    }

    async fn list_applications(&self, name: &ApplicationName) -> Result<Vec<ApplicationInfo>> {
        self.list_application_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state
            .applications
            .iter()
            .filter(|a| a.name == name.as_uri())
            .cloned()
            .collect())
    }

    async fn create_application(&self, description: &ApplicationDescription) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push(ClusterWrite::CreateApplication {
                name: description.name.as_uri().into(),
            });
        let result = self
            .create_application_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        result?;
        self.state
            .lock()
            .unwrap()
            .applications
            .push(ApplicationInfo {
                name: description.name.as_uri().into(),
                type_name: description.type_name.clone(),
                type_version: description.type_version.clone(),
            });
        Ok(())
    }

    async fn list_services(
        &self,
        application: &ApplicationName,
        name: &ServiceName,
    ) -> Result<Vec<ServiceInfo>> {
        self.list_service_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state
            .services
            .iter()
            .filter(|s| s.name == name.as_uri() && s.name.starts_with(application.as_uri()))
            .cloned()
            .collect())
    }

    async fn create_service(&self, description: &ServiceDescription) -> Result<()> {
        self.writes.lock().unwrap().push(ClusterWrite::CreateService {
            name: description.service_name.as_uri().into(),
        });
        let result = self
            .create_service_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        result?;
        self.state.lock().unwrap().services.push(ServiceInfo {
            name: description.service_name.as_uri().into(),
            type_name: description.service_type_name.clone(),
        });
        Ok(())
    }

    fn endpoint_name(&self) -> &str {
        "in-memory"
    }
}
