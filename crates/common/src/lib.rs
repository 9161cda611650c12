/**
 * Access rules of the role hierarchy.
 *  Pure functions over roles, no store access.
 */
pub mod access;
/**
 * Typed attributes stored alongside a grant.
 */
pub mod attributes;
/**
 * Per-request caller identity and cancellation.
 */
pub mod context;
/**
 * Opaque cursor pagination shared by every
 *  list call.
 */
pub mod pagination;
/**
 * The owner > editor > viewer role order.
 */
pub mod role;
/**
 * File and user operations enforcing the
 *  role hierarchy on top of the stores.
 */
pub mod sharing;
/**
 * Store traits for grants and principals,
 *  plus the in-memory implementation.
 */
pub mod store;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::access::AccessError;
    pub use crate::attributes::Attributes;
    pub use crate::context::{Cancelled, RequestContext};
    pub use crate::pagination::{Cursor, Page, PageRequest};
    pub use crate::role::Role;
    pub use crate::sharing::{
        DeleteSummary, FileService, FileUser, FileView, NewFile, NewUser, SharingError, User,
        UserService,
    };
    pub use crate::store::{
        AuthzProvider, IdentityProvider, MemoryStore, PrincipalId, ProviderError, ResourceId,
    };
    pub use crate::version::build_info;
}
