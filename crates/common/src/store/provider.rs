use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::pagination::{Page, PageRequest};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Identity of a principal, issued by the identity provider.
    PrincipalId
);
opaque_id!(
    /// Identity of a resource within its resource type.
    ResourceId
);

/// Errors reported by a store. Messages are passed through to callers as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Outcome of a single access check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckResult {
    pub allowed: bool,
    /// Attributes stored with the grant, when one exists.
    pub attributes: Option<Attributes>,
}

impl CheckResult {
    pub fn denied() -> Self {
        Self::default()
    }

    pub fn allowed(attributes: Option<Attributes>) -> Self {
        Self {
            allowed: true,
            attributes,
        }
    }
}

/// A resource a principal holds a grant on.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    pub id: ResourceId,
    pub resource_type: String,
    pub attributes: Option<Attributes>,
}

/// A principal holding a grant on a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalGrant {
    pub principal_id: PrincipalId,
    pub attributes: Option<Attributes>,
}

/// A principal as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    pub id: PrincipalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

/// The capability store holding grants.
///
/// Implementations own all persistence and any mutual exclusion between
/// concurrent writers; the engine assumes last-write-wins on `grant`.
#[async_trait]
pub trait AuthzProvider: Send + Sync + Debug {
    /// Create or overwrite the grant of `principal` on a resource.
    ///
    /// Re-granting with `attributes == None` leaves an existing grant as is.
    /// Fails when the principal is unknown to the store.
    async fn grant(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
        attributes: Option<Attributes>,
    ) -> Result<(), ProviderError>;

    /// Look up the grant of `principal` on a resource.
    async fn check(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
    ) -> Result<CheckResult, ProviderError>;

    /// Remove the grant of `principal` on a resource. Removing a grant that
    /// does not exist succeeds.
    async fn revoke(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
    ) -> Result<(), ProviderError>;

    /// Resources of `resource_type` that `principal` holds a grant on.
    async fn list_resources(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        page: &PageRequest,
    ) -> Result<Page<ResourceEntry>, ProviderError>;

    /// Principals holding a grant on a resource.
    async fn list_principals(
        &self,
        resource: &ResourceId,
        resource_type: &str,
        page: &PageRequest,
    ) -> Result<Page<PrincipalGrant>, ProviderError>;
}

/// The store that owns principals.
#[async_trait]
pub trait IdentityProvider: Send + Sync + Debug {
    /// Register a principal. Fails with [`ProviderError::AlreadyExists`] on
    /// a duplicate id.
    async fn create_principal(
        &self,
        principal: PrincipalRecord,
    ) -> Result<PrincipalRecord, ProviderError>;

    /// Fails with [`ProviderError::NotFound`] for an unknown id.
    async fn retrieve_principal(&self, id: &PrincipalId)
        -> Result<PrincipalRecord, ProviderError>;

    /// Remove a principal along with every grant it holds.
    async fn delete_principal(&self, id: &PrincipalId) -> Result<(), ProviderError>;

    /// Principals in `segment`, or principals without a segment when `None`.
    async fn list_principals_in(
        &self,
        segment: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<PrincipalRecord>, ProviderError>;
}
