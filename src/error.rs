use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while resolving a deployment spec from the package and
/// parameter sources. These always occur before any cluster interaction.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("failed to download package from {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("package archive is not readable: {0}")]
    Archive(#[source] zip::result::ZipError),

    #[error("package entry not found: {entry}")]
    MissingEntry { entry: &'static str },

    #[error("failed to read parameter file {path}: {source}")]
    ReadParameters {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {document}: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: roxmltree::Error,
    },

    #[error("missing attribute {attribute} in {document}")]
    MissingAttribute {
        document: &'static str,
        attribute: &'static str,
    },

    #[error("duplicate parameter: {name}")]
    DuplicateParameter { name: String },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Errors raised while provisioning an application type.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("provisioning {type_name} {type_version} timed out after {seconds}s")]
    TimedOut {
        type_name: String,
        type_version: String,
        seconds: u64,
    },

    #[error("cluster rejected provisioning of {type_name} {type_version}: {reason}")]
    Rejected {
        type_name: String,
        type_version: String,
        reason: String,
    },
}

/// Errors raised while creating applications or services.
#[derive(Error, Debug)]
pub enum CreationError {
    #[error("failed to create application {name}: {reason}")]
    Application { name: String, reason: String },

    #[error("failed to create service {name}: {reason}")]
    Service { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    Creation(#[from] CreationError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("cluster error: {0}")]
    Cluster(String),
}

pub type Result<T> = std::result::Result<T, Error>;
