//! Implementations of ports (hexagonal adapters).

pub mod http;

pub use http::FabricRestClient;
