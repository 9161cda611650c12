//! The external stores the engine runs against.
//!
//! [`AuthzProvider`] holds grants of principals on resources and
//! [`IdentityProvider`] holds the principals themselves. [`MemoryStore`]
//! implements both and backs the daemon and the tests.

mod memory;
mod provider;

pub use memory::{MemoryStore, DEFAULT_PAGE_LIMIT};
pub use provider::{
    AuthzProvider, CheckResult, IdentityProvider, PrincipalGrant, PrincipalId, PrincipalRecord,
    ProviderError, ResourceEntry, ResourceId,
};

/// Resource type under which file grants are kept.
pub const FILES: &str = "files";
