//! Cluster-agnostic domain types.

mod name;
mod spec;

pub use name::{ApplicationName, ServiceName};
pub use spec::{DeploymentSpec, ServiceDeploymentSpec};
