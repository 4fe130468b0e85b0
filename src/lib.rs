//! sfdeploy - Idempotent Service Fabric application deployment.
//!
//! This crate deploys a packaged application onto a Service Fabric cluster
//! by reconciling observed cluster state with the desired state described by
//! the package. Every step queries before it writes, so a converged cluster
//! produces no writes and an interrupted run can simply be rerun.
//!
//! # Architecture
//!
//! Desired state flows in from the left, cluster effects flow out to the
//! right:
//!
//! - [`resolver`] - Downloads the package and derives a [`domain::DeploymentSpec`]
//!   from its manifest and the local parameters file
//! - [`reconciler`] - Drives the three deployment stages (provision type,
//!   create application, create services) against a [`port::ClusterClient`]
//! - [`adapter`] - REST implementation of the cluster port
//!
//! # Modules
//!
//! - [`cli`] - Command-line surface and the deploy command
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Application and service naming, deployment specs
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definition for cluster access
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sfdeploy::adapter::FabricRestClient;
//! use sfdeploy::reconciler::Reconciler;
//! use sfdeploy::resolver::PackageResolver;
//!
//! # async fn deploy() -> sfdeploy::error::Result<()> {
//! let url = url::Url::parse("https://packages.example.com/shop.sfpkg")?;
//! let spec = PackageResolver::new()
//!     .resolve(&url, "params/Cloud.xml".as_ref())
//!     .await?;
//! let cluster = Arc::new(FabricRestClient::new("http://localhost:19080".into()));
//! Reconciler::new(cluster).reconcile(&spec).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod reconciler;
pub mod resolver;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
