//! Deployment spec resolution.
//!
//! Turns the pair of inputs (remote package URL, local parameter file) into
//! a [`DeploymentSpec`]: downloads the package, reads the application
//! manifest out of the archive, and parses the parameter document. Every
//! failure here surfaces before any cluster interaction.

pub mod manifest;
pub mod parameters;

use std::path::Path;
use std::time::Duration;

use reqwest::Client as HttpClient;
use roxmltree::Node;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::DeploymentSpec;
use crate::error::{ResolutionError, Result};

/// Resolves deployment specs from package and parameter sources.
pub struct PackageResolver {
    http: HttpClient,
}

impl PackageResolver {
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    #[must_use]
    pub fn new() -> Self {
        let http = HttpClient::builder()
            .connect_timeout(Self::CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self { http }
    }

    /// Resolve a deployment spec.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] when the package cannot be downloaded
    /// or read, the manifest or parameter document is malformed, or an
    /// identity field comes out empty.
    pub async fn resolve(
        &self,
        remote_url: &Url,
        parameters_path: &Path,
    ) -> Result<DeploymentSpec> {
        let manifest = self.fetch_manifest(remote_url).await?;
        let parameters = parameters::from_file(parameters_path)?;

        info!(
            type_name = %manifest.type_name,
            type_version = %manifest.type_version,
            application = %parameters.application_name,
            services = manifest.default_services.len(),
            parameters = parameters.parameters.len(),
            "Resolved deployment spec"
        );

        let spec = DeploymentSpec {
            remote_url: remote_url.clone(),
            type_name: manifest.type_name,
            type_version: manifest.type_version,
            application_name: parameters.application_name,
            parameters: parameters.parameters,
            services: manifest.default_services,
        };
        spec.validate()?;
        Ok(spec)
    }

    async fn fetch_manifest(&self, url: &Url) -> Result<manifest::ApplicationManifest> {
        info!(url = %url, "Downloading application package");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| download_error(url, source))?;
        let response = response
            .error_for_status()
            .map_err(|source| download_error(url, source))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| download_error(url, source))?;
        debug!(bytes = bytes.len(), "Package downloaded");
        manifest::from_package(&bytes)
    }
}

impl Default for PackageResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn download_error(url: &Url, source: reqwest::Error) -> ResolutionError {
    ResolutionError::Download {
        url: url.to_string(),
        source,
    }
}

pub(crate) fn required_attribute(
    node: Node<'_, '_>,
    document: &'static str,
    attribute: &'static str,
) -> std::result::Result<String, ResolutionError> {
    node.attribute(attribute)
        .map(str::to_owned)
        .ok_or(ResolutionError::MissingAttribute {
            document,
            attribute,
        })
}
