//! REST adapter for the Service Fabric cluster management endpoint.

pub mod client;
pub mod dto;

pub use client::FabricRestClient;
