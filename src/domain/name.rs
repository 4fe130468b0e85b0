//! Cluster name types with proper encapsulation.
//!
//! Application and service names are absolute `fabric:/` URIs. All
//! construction goes through [`ApplicationName::parse`], which canonicalizes
//! the scheme, so two spellings of the same application compare equal.
//! Service names can only be derived from their parent application name,
//! which keeps every service a strict child of its application.

use std::fmt;

use crate::error::ResolutionError;

const SCHEME: &str = "fabric:/";

/// Canonical application name (`fabric:/<name>`).
///
/// The inner String is private to ensure all construction goes through
/// [`ApplicationName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationName(String);

impl ApplicationName {
    /// Parse an application name, accepting input with or without the
    /// leading `fabric:/` scheme.
    ///
    /// A single leading scheme is stripped before canonicalizing, so
    /// `"shop"` and `"fabric:/shop"` produce the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::EmptyField`] when the name is empty after
    /// stripping the scheme.
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let trimmed = input.trim();
        let bare = trimmed.strip_prefix(SCHEME).unwrap_or(trimmed);
        if bare.is_empty() {
            return Err(ResolutionError::EmptyField {
                field: "application name",
            });
        }
        Ok(Self(format!("{SCHEME}{bare}")))
    }

    /// Get the canonical `fabric:/` URI as a string slice.
    #[must_use]
    pub fn as_uri(&self) -> &str {
        &self.0
    }

    /// Gateway resource id: scheme stripped, path separators as `~`.
    ///
    /// `fabric:/shop/cart` becomes `shop~cart`.
    #[must_use]
    pub fn id(&self) -> String {
        encode_id(&self.0)
    }

    /// Derive the full name of a child service.
    #[must_use]
    pub fn service(&self, local_name: &str) -> ServiceName {
        ServiceName(format!("{}/{}", self.0, local_name))
    }
}

impl fmt::Display for ApplicationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full service name (`fabric:/<application>/<service>`).
///
/// Only constructible through [`ApplicationName::service`], so a service
/// name is always a strict child of an application name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    /// Get the full `fabric:/` URI as a string slice.
    #[must_use]
    pub fn as_uri(&self) -> &str {
        &self.0
    }

    /// Gateway resource id: scheme stripped, path separators as `~`.
    #[must_use]
    pub fn id(&self) -> String {
        encode_id(&self.0)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn encode_id(uri: &str) -> String {
    uri.strip_prefix(SCHEME).unwrap_or(uri).replace('/', "~")
}
