//! Trait definitions (hexagonal ports). Depend only on domain.

pub mod cluster;

pub use cluster::{
    ApplicationDescription, ApplicationInfo, ApplicationTypeInfo, ClusterClient, ProvisionRequest,
    ServiceDescription, ServiceInfo,
};
