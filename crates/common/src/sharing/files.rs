use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access;
use crate::attributes::Attributes;
use crate::context::RequestContext;
use crate::pagination::{collect_all, Page, PageRequest};
use crate::role::Role;
use crate::store::{
    AuthzProvider, PrincipalGrant, PrincipalId, ResourceEntry, ResourceId, FILES,
};

use super::resolver::{Access, RoleResolver};
use super::SharingError;

/// A file as seen by one caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileView {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The caller's role on the file.
    pub role: Role,
}

impl FileView {
    /// Files whose grant is missing a name or a recognised role are not
    /// fully materialised yet and yield `None`.
    fn from_attributes(id: ResourceId, attributes: &Attributes) -> Option<Self> {
        Some(Self {
            id,
            name: attributes.name.clone()?,
            kind: attributes.kind.clone(),
            role: attributes.role()?,
        })
    }

    fn from_entry(entry: ResourceEntry) -> Option<Self> {
        let attributes = entry.attributes?;
        Self::from_attributes(entry.id, &attributes)
    }
}

/// A principal holding a grant on a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUser {
    pub id: PrincipalId,
    pub role: Role,
}

impl FileUser {
    fn from_grant(grant: PrincipalGrant) -> Option<Self> {
        let role = grant.attributes?.role()?;
        Some(Self {
            id: grant.principal_id,
            role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFile {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Result of a completed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSummary {
    /// Grants revoked, the caller's own included.
    pub revoked: usize,
}

/// File sharing operations on top of an [`AuthzProvider`].
///
/// Every operation first resolves the caller's role with one fresh check
/// and then applies the rules in [`crate::access`]. Nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct FileService {
    authz: Arc<dyn AuthzProvider>,
    resolver: RoleResolver,
}

impl FileService {
    pub fn new(authz: Arc<dyn AuthzProvider>) -> Self {
        let resolver = RoleResolver::new(authz.clone(), FILES);
        Self { authz, resolver }
    }

    /// Create a file owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        file: NewFile,
    ) -> Result<FileView, SharingError> {
        let name = file.name.trim();
        if name.is_empty() {
            return Err(SharingError::Validation("file name is required".into()));
        }

        let id = ResourceId::new(Uuid::new_v4().to_string());
        let attributes = Attributes::new(name, Role::Owner).with_kind(file.kind);

        ctx.run(
            self.authz
                .grant(ctx.caller(), FILES, &id, Some(attributes.clone())),
        )
        .await??;

        tracing::info!(caller = %ctx.caller(), file = %id, "created file");

        FileView::from_attributes(id, &attributes)
            .ok_or_else(|| SharingError::Validation("file name is required".into()))
    }

    /// The caller's view of one file.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        file: &ResourceId,
    ) -> Result<FileView, SharingError> {
        match self.resolver.resolve(ctx, ctx.caller(), file).await? {
            Access::NoAccess => Err(SharingError::Forbidden),
            Access::Granted { attributes, .. } => {
                FileView::from_attributes(file.clone(), &attributes)
                    .ok_or_else(|| SharingError::NotFound(format!("file {}", file)))
            }
        }
    }

    /// One page of the files the caller holds a grant on.
    ///
    /// Entries without a name or role are skipped. The page's cursor is the
    /// store's, so skipping never ends the enumeration early.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<Page<FileView>, SharingError> {
        let entries = ctx
            .run(self.authz.list_resources(ctx.caller(), FILES, page))
            .await??;

        Ok(entries.filter_map(FileView::from_entry))
    }

    /// One page of the principals holding a grant on a file. Any role may
    /// list.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        file: &ResourceId,
        page: &PageRequest,
    ) -> Result<Page<FileUser>, SharingError> {
        if !self.resolver.resolve(ctx, ctx.caller(), file).await?.is_granted() {
            return Err(SharingError::Forbidden);
        }

        let grants = ctx
            .run(self.authz.list_principals(file, FILES, page))
            .await??;

        Ok(grants.filter_map(FileUser::from_grant))
    }

    /// Grant `target` the role `role` on a file, overwriting whatever grant
    /// it held. The file's name and type are copied from the caller's grant.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        file: &ResourceId,
        target: &PrincipalId,
        role: Role,
    ) -> Result<(), SharingError> {
        let access = self.resolver.resolve(ctx, ctx.caller(), file).await?;
        access::can_share(access.role(), role).map_err(|e| {
            tracing::warn!(caller = %ctx.caller(), %file, %target, "share refused: {}", e);
            e
        })?;

        let attributes = match access {
            Access::Granted { attributes, .. } => attributes.with_role(role),
            Access::NoAccess => return Err(SharingError::Forbidden),
        };

        ctx.run(self.authz.grant(target, FILES, file, Some(attributes)))
            .await??;

        tracing::info!(caller = %ctx.caller(), %file, %target, %role, "shared file");
        Ok(())
    }

    /// Remove `target`'s grant on a file.
    ///
    /// A target without a grant is left alone and the call succeeds.
    pub async fn unshare(
        &self,
        ctx: &RequestContext,
        file: &ResourceId,
        target: &PrincipalId,
    ) -> Result<(), SharingError> {
        let actor = self.resolver.resolve(ctx, ctx.caller(), file).await?;
        if !actor.is_granted() {
            return Err(SharingError::Forbidden);
        }

        let target_access = self.resolver.resolve(ctx, target, file).await?;
        if !target_access.is_granted() {
            tracing::debug!(caller = %ctx.caller(), %file, %target, "nothing to unshare");
            return Ok(());
        }

        access::can_unshare(actor.role(), target_access.role()).map_err(|e| {
            tracing::warn!(caller = %ctx.caller(), %file, %target, "unshare refused: {}", e);
            e
        })?;

        ctx.run(self.authz.revoke(target, FILES, file)).await??;

        tracing::info!(caller = %ctx.caller(), %file, %target, "unshared file");
        Ok(())
    }

    /// Delete a file by revoking every grant on it.
    ///
    /// Grants are revoked one at a time with the caller's own grant last, so
    /// a delete that fails part way leaves the caller able to retry. The
    /// first failed revoke stops the delete and is reported with the number
    /// of grants already gone.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        file: &ResourceId,
    ) -> Result<DeleteSummary, SharingError> {
        let access = self.resolver.resolve(ctx, ctx.caller(), file).await?;
        access::can_delete(access.role())?;

        let holders = collect_all(PageRequest::default(), move |request| async move {
            ctx.run(self.authz.list_principals(file, FILES, &request))
                .await?
                .map_err(SharingError::from)
        })
        .await?;

        let caller = ctx.caller();
        let mut order: Vec<PrincipalId> = holders
            .into_iter()
            .map(|grant| grant.principal_id)
            .filter(|principal| principal != caller)
            .collect();
        order.push(caller.clone());

        for (revoked, principal) in order.iter().enumerate() {
            let result = match ctx.run(self.authz.revoke(principal, FILES, file)).await {
                Ok(result) => result,
                Err(cancelled) => {
                    tracing::warn!(%file, revoked, "delete cancelled part way");
                    return Err(cancelled.into());
                }
            };

            if let Err(source) = result {
                tracing::error!(%file, %principal, revoked, "delete stopped: {}", source);
                return Err(SharingError::IncompleteDelete { revoked, source });
            }
        }

        tracing::info!(caller = %caller, %file, revoked = order.len(), "deleted file");
        Ok(DeleteSummary {
            revoked: order.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{IdentityProvider, MemoryStore, PrincipalRecord};

    async fn setup(users: &[&str]) -> (MemoryStore, FileService) {
        let store = MemoryStore::new();
        for user in users {
            store
                .create_principal(PrincipalRecord {
                    id: PrincipalId::from(*user),
                    name: Some(user.to_string()),
                    segment: None,
                })
                .await
                .unwrap();
        }
        let service = FileService::new(Arc::new(store.clone()));
        (store, service)
    }

    fn new_file(name: &str) -> NewFile {
        NewFile {
            name: name.into(),
            kind: None,
        }
    }

    #[tokio::test]
    async fn test_create_makes_caller_owner() {
        let (store, files) = setup(&["alice"]).await;
        let ctx = RequestContext::detached("alice");

        let file = files.create(&ctx, new_file("report.pdf")).await.unwrap();
        assert_eq!(file.role, Role::Owner);
        assert_eq!(file.name, "report.pdf");
        assert_eq!(store.grant_count(FILES, &file.id), 1);

        let fetched = files.get(&ctx, &file.id).await.unwrap();
        assert_eq!(fetched, file);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (_store, files) = setup(&["alice"]).await;
        let ctx = RequestContext::detached("alice");

        let result = files.create(&ctx, new_file("  ")).await;
        assert!(matches!(result, Err(SharingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_for_unknown_principal_surfaces_store_error() {
        let (_store, files) = setup(&[]).await;
        let ctx = RequestContext::detached("ghost");

        let result = files.create(&ctx, new_file("x")).await;
        assert!(matches!(result, Err(SharingError::Store(_))));
    }

    #[tokio::test]
    async fn test_get_without_grant_is_forbidden() {
        let (_store, files) = setup(&["alice", "bob"]).await;
        let file = files
            .create(&RequestContext::detached("alice"), new_file("a"))
            .await
            .unwrap();

        let result = files.get(&RequestContext::detached("bob"), &file.id).await;
        assert!(matches!(result, Err(SharingError::Forbidden)));

        let missing = files
            .get(&RequestContext::detached("bob"), &"nope".into())
            .await;
        assert!(matches!(missing, Err(SharingError::Forbidden)));
    }

    #[tokio::test]
    async fn test_share_copies_name_and_kind() {
        let (_store, files) = setup(&["alice", "bob"]).await;
        let alice = RequestContext::detached("alice");
        let file = files
            .create(
                &alice,
                NewFile {
                    name: "plan".into(),
                    kind: Some("doc".into()),
                },
            )
            .await
            .unwrap();

        files
            .share(&alice, &file.id, &"bob".into(), Role::Viewer)
            .await
            .unwrap();

        let seen = files
            .get(&RequestContext::detached("bob"), &file.id)
            .await
            .unwrap();
        assert_eq!(seen.name, "plan");
        assert_eq!(seen.kind.as_deref(), Some("doc"));
        assert_eq!(seen.role, Role::Viewer);
    }

    #[tokio::test]
    async fn test_viewer_cannot_share() {
        let (_store, files) = setup(&["alice", "bob", "carol"]).await;
        let alice = RequestContext::detached("alice");
        let file = files.create(&alice, new_file("a")).await.unwrap();
        files
            .share(&alice, &file.id, &"bob".into(), Role::Viewer)
            .await
            .unwrap();

        let result = files
            .share(
                &RequestContext::detached("bob"),
                &file.id,
                &"carol".into(),
                Role::Viewer,
            )
            .await;
        assert!(matches!(result, Err(SharingError::Forbidden)));
    }

    #[tokio::test]
    async fn test_editor_cannot_grant_owner() {
        let (_store, files) = setup(&["alice", "bob", "carol"]).await;
        let alice = RequestContext::detached("alice");
        let file = files.create(&alice, new_file("a")).await.unwrap();
        files
            .share(&alice, &file.id, &"bob".into(), Role::Editor)
            .await
            .unwrap();

        let result = files
            .share(
                &RequestContext::detached("bob"),
                &file.id,
                &"carol".into(),
                Role::Owner,
            )
            .await;
        assert!(matches!(result, Err(SharingError::PrivilegeEscalation(_))));
    }

    #[tokio::test]
    async fn test_unshare_non_holder_is_noop() {
        let (store, files) = setup(&["alice", "bob"]).await;
        let alice = RequestContext::detached("alice");
        let file = files.create(&alice, new_file("a")).await.unwrap();

        files.unshare(&alice, &file.id, &"bob".into()).await.unwrap();
        assert_eq!(store.grant_count(FILES, &file.id), 1);
    }

    #[tokio::test]
    async fn test_delete_revokes_everyone() {
        let (store, files) = setup(&["alice", "bob", "carol"]).await;
        let alice = RequestContext::detached("alice");
        let file = files.create(&alice, new_file("a")).await.unwrap();
        for user in ["bob", "carol"] {
            files
                .share(&alice, &file.id, &user.into(), Role::Viewer)
                .await
                .unwrap();
        }

        let summary = files.delete(&alice, &file.id).await.unwrap();
        assert_eq!(summary.revoked, 3);
        assert_eq!(store.grant_count(FILES, &file.id), 0);
    }

    #[tokio::test]
    async fn test_viewer_cannot_delete() {
        let (store, files) = setup(&["alice", "bob"]).await;
        let alice = RequestContext::detached("alice");
        let file = files.create(&alice, new_file("a")).await.unwrap();
        files
            .share(&alice, &file.id, &"bob".into(), Role::Viewer)
            .await
            .unwrap();

        let result = files.delete(&RequestContext::detached("bob"), &file.id).await;
        assert!(matches!(result, Err(SharingError::Forbidden)));
        assert_eq!(store.grant_count(FILES, &file.id), 2);
    }

    #[tokio::test]
    async fn test_editor_deletes_for_everyone() {
        let (store, files) = setup(&["alice", "bob"]).await;
        let alice = RequestContext::detached("alice");
        let file = files.create(&alice, new_file("a")).await.unwrap();
        files
            .share(&alice, &file.id, &"bob".into(), Role::Editor)
            .await
            .unwrap();

        let summary = files
            .delete(&RequestContext::detached("bob"), &file.id)
            .await
            .unwrap();
        assert_eq!(summary.revoked, 2);
        assert_eq!(store.grant_count(FILES, &file.id), 0);
    }
}
