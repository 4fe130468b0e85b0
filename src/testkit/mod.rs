//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`cluster`]: [`InMemoryCluster`](cluster::InMemoryCluster), a scripted
//!   [`ClusterClient`](crate::port::cluster::ClusterClient) double that
//!   records writes and replays seeded state.
//! - [`spec`]: factory functions for deployment specs.
//! - [`package`]: in-memory package archives and manifest/parameter XML.

pub mod cluster;
pub mod package;
pub mod spec;
