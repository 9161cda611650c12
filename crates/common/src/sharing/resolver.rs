use std::sync::Arc;

use crate::attributes::Attributes;
use crate::context::RequestContext;
use crate::role::Role;
use crate::store::{AuthzProvider, PrincipalId, ResourceId};

use super::SharingError;

/// What a principal currently holds on a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    /// No grant exists.
    NoAccess,
    /// A grant exists. `role` is `None` when the stored role is not one we
    /// recognise.
    Granted {
        role: Option<Role>,
        attributes: Attributes,
    },
}

impl Access {
    pub fn role(&self) -> Option<Role> {
        match self {
            Access::NoAccess => None,
            Access::Granted { role, .. } => *role,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted { .. })
    }
}

/// Resolves a principal's role on a resource with a single store check.
///
/// Nothing is cached: each call reflects the store at that moment.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    authz: Arc<dyn AuthzProvider>,
    resource_type: String,
}

impl RoleResolver {
    pub fn new(authz: Arc<dyn AuthzProvider>, resource_type: impl Into<String>) -> Self {
        Self {
            authz,
            resource_type: resource_type.into(),
        }
    }

    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        principal: &PrincipalId,
        resource: &ResourceId,
    ) -> Result<Access, SharingError> {
        let check = ctx
            .run(self.authz.check(principal, &self.resource_type, resource))
            .await?
            .map_err(|e| {
                tracing::error!(%principal, %resource, "role check failed: {}", e);
                e
            })?;

        if !check.allowed {
            tracing::debug!(%principal, %resource, "no grant");
            return Ok(Access::NoAccess);
        }

        let attributes = check.attributes.unwrap_or_default();
        let role = attributes.role();
        tracing::debug!(%principal, %resource, role = ?role, "resolved role");

        Ok(Access::Granted { role, attributes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{IdentityProvider, MemoryStore, PrincipalRecord};
    use tokio_util::sync::CancellationToken;

    async fn setup() -> (MemoryStore, RoleResolver) {
        let store = MemoryStore::new();
        store
            .create_principal(PrincipalRecord {
                id: "alice".into(),
                name: Some("Alice".into()),
                segment: None,
            })
            .await
            .unwrap();
        let resolver = RoleResolver::new(Arc::new(store.clone()), "files");
        (store, resolver)
    }

    #[tokio::test]
    async fn test_no_grant_is_no_access() {
        let (_store, resolver) = setup().await;
        let ctx = RequestContext::detached("alice");
        let access = resolver
            .resolve(&ctx, &"alice".into(), &"f1".into())
            .await
            .unwrap();
        assert_eq!(access, Access::NoAccess);
        assert_eq!(access.role(), None);
    }

    #[tokio::test]
    async fn test_resolves_fresh_each_time() {
        let (store, resolver) = setup().await;
        let ctx = RequestContext::detached("alice");
        let alice = PrincipalId::from("alice");
        let file = ResourceId::from("f1");

        store
            .grant(&alice, "files", &file, Some(Attributes::new("doc", Role::Editor)))
            .await
            .unwrap();
        let access = resolver.resolve(&ctx, &alice, &file).await.unwrap();
        assert_eq!(access.role(), Some(Role::Editor));

        store
            .grant(&alice, "files", &file, Some(Attributes::new("doc", Role::Viewer)))
            .await
            .unwrap();
        let access = resolver.resolve(&ctx, &alice, &file).await.unwrap();
        assert_eq!(access.role(), Some(Role::Viewer));
    }

    #[tokio::test]
    async fn test_grant_without_role_is_granted_but_roleless() {
        let (store, resolver) = setup().await;
        let ctx = RequestContext::detached("alice");
        store
            .grant(&"alice".into(), "files", &"f1".into(), None)
            .await
            .unwrap();

        let access = resolver
            .resolve(&ctx, &"alice".into(), &"f1".into())
            .await
            .unwrap();
        assert!(access.is_granted());
        assert_eq!(access.role(), None);
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let (_store, resolver) = setup().await;
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::new("alice", token);

        let result = resolver.resolve(&ctx, &"alice".into(), &"f1".into()).await;
        assert!(matches!(result, Err(SharingError::Cancelled(_))));
    }
}
