use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::provider::{
    AuthzProvider, CheckResult, IdentityProvider, PrincipalGrant, PrincipalId, PrincipalRecord,
    ProviderError, ResourceEntry, ResourceId,
};
use crate::attributes::Attributes;
use crate::pagination::{Cursor, Page, PageRequest};

/// Page size used when a request carries no usable limit.
pub const DEFAULT_PAGE_LIMIT: usize = 30;

/// In-memory authorization and identity store.
///
/// Backs both provider traits with ordered maps so that listings come out in
/// id order, which is what the cursors encode.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    /// principal id -> record
    principals: BTreeMap<PrincipalId, PrincipalRecord>,
    /// (principal, resource type, resource) -> grant attributes
    grants: BTreeMap<GrantKey, Option<Attributes>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GrantKey {
    principal: PrincipalId,
    resource_type: String,
    resource: ResourceId,
}

impl GrantKey {
    fn new(principal: &PrincipalId, resource_type: &str, resource: &ResourceId) -> Self {
        Self {
            principal: principal.clone(),
            resource_type: resource_type.to_string(),
            resource: resource.clone(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryStoreInner::default())),
        }
    }

    /// Number of grants currently held on a resource.
    pub fn grant_count(&self, resource_type: &str, resource: &ResourceId) -> usize {
        self.read()
            .map(|inner| {
                inner
                    .grants
                    .keys()
                    .filter(|k| k.resource_type == resource_type && &k.resource == resource)
                    .count()
            })
            .unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>, ProviderError> {
        self.inner.read().map_err(|e| {
            ProviderError::Internal(format!("failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>, ProviderError> {
        self.inner.write().map_err(|e| {
            ProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the page size for a request. Only limits in `1..DEFAULT_PAGE_LIMIT`
/// are honoured.
fn page_limit(page: &PageRequest) -> usize {
    match page.limit {
        Some(limit) if limit > 0 && (limit as usize) < DEFAULT_PAGE_LIMIT => limit as usize,
        _ => DEFAULT_PAGE_LIMIT,
    }
}

fn encode_cursor(last_id: &str) -> Option<Cursor> {
    Cursor::new(URL_SAFE_NO_PAD.encode(last_id.as_bytes()))
}

/// Decode the id a cursor resumes after. Cursors we cannot read restart the
/// listing from the beginning.
fn decode_cursor(page: &PageRequest) -> Option<String> {
    let cursor = page.cursor.as_ref()?;
    let bytes = URL_SAFE_NO_PAD.decode(cursor.as_str()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Cut one page out of an id-ordered sequence.
fn paginate<T, I>(entries: I, page: &PageRequest, id_of: impl Fn(&T) -> &str) -> Page<T>
where
    I: Iterator<Item = T>,
{
    let limit = page_limit(page);
    let after = decode_cursor(page);

    let mut remaining = entries.filter(|entry| match &after {
        Some(last) => id_of(entry) > last.as_str(),
        None => true,
    });

    let taken: Vec<T> = remaining.by_ref().take(limit).collect();
    let more = remaining.next().is_some();

    let next = match (more, taken.last()) {
        (true, Some(last)) => encode_cursor(id_of(last)),
        _ => None,
    };

    Page::new(taken, next)
}

#[async_trait]
impl AuthzProvider for MemoryStore {
    async fn grant(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
        attributes: Option<Attributes>,
    ) -> Result<(), ProviderError> {
        let mut inner = self.write()?;

        if !inner.principals.contains_key(principal) {
            return Err(ProviderError::InvalidArgument(
                "invalid principal for record".to_string(),
            ));
        }

        let key = GrantKey::new(principal, resource_type, resource);
        match inner.grants.get_mut(&key) {
            Some(existing) => {
                if attributes.is_some() {
                    *existing = attributes;
                }
            }
            None => {
                inner.grants.insert(key, attributes);
            }
        }

        Ok(())
    }

    async fn check(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
    ) -> Result<CheckResult, ProviderError> {
        let inner = self.read()?;

        Ok(inner
            .grants
            .get(&GrantKey::new(principal, resource_type, resource))
            .map(|attributes| CheckResult::allowed(attributes.clone()))
            .unwrap_or_else(CheckResult::denied))
    }

    async fn revoke(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
    ) -> Result<(), ProviderError> {
        let mut inner = self.write()?;
        inner
            .grants
            .remove(&GrantKey::new(principal, resource_type, resource));
        Ok(())
    }

    async fn list_resources(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        page: &PageRequest,
    ) -> Result<Page<ResourceEntry>, ProviderError> {
        let inner = self.read()?;

        // Keys sort by principal, then type, then resource, so this walk is
        // already in resource id order.
        let entries = inner
            .grants
            .iter()
            .filter(|(key, _)| &key.principal == principal && key.resource_type == resource_type)
            .map(|(key, attributes)| ResourceEntry {
                id: key.resource.clone(),
                resource_type: key.resource_type.clone(),
                attributes: attributes.clone(),
            });

        Ok(paginate(entries, page, |entry| entry.id.as_str()))
    }

    async fn list_principals(
        &self,
        resource: &ResourceId,
        resource_type: &str,
        page: &PageRequest,
    ) -> Result<Page<PrincipalGrant>, ProviderError> {
        let inner = self.read()?;

        let entries = inner
            .grants
            .iter()
            .filter(|(key, _)| &key.resource == resource && key.resource_type == resource_type)
            .map(|(key, attributes)| PrincipalGrant {
                principal_id: key.principal.clone(),
                attributes: attributes.clone(),
            });

        Ok(paginate(entries, page, |entry| entry.principal_id.as_str()))
    }
}

#[async_trait]
impl IdentityProvider for MemoryStore {
    async fn create_principal(
        &self,
        principal: PrincipalRecord,
    ) -> Result<PrincipalRecord, ProviderError> {
        let mut inner = self.write()?;

        if inner.principals.contains_key(&principal.id) {
            return Err(ProviderError::AlreadyExists(format!(
                "duplicate principal id {}",
                principal.id
            )));
        }

        inner
            .principals
            .insert(principal.id.clone(), principal.clone());
        Ok(principal)
    }

    async fn retrieve_principal(
        &self,
        id: &PrincipalId,
    ) -> Result<PrincipalRecord, ProviderError> {
        let inner = self.read()?;
        inner
            .principals
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("principal {}", id)))
    }

    async fn delete_principal(&self, id: &PrincipalId) -> Result<(), ProviderError> {
        let mut inner = self.write()?;

        if inner.principals.remove(id).is_none() {
            return Err(ProviderError::NotFound(format!("principal {}", id)));
        }
        inner.grants.retain(|key, _| &key.principal != id);

        Ok(())
    }

    async fn list_principals_in(
        &self,
        segment: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<PrincipalRecord>, ProviderError> {
        let inner = self.read()?;

        let entries = inner
            .principals
            .values()
            .filter(|record| record.segment.as_deref() == segment)
            .cloned();

        Ok(paginate(entries, page, |record| record.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::collect_all;
    use crate::role::Role;

    const FILES: &str = "files";

    async fn store_with(principals: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for id in principals {
            store
                .create_principal(PrincipalRecord {
                    id: PrincipalId::from(*id),
                    name: Some(format!("user {}", id)),
                    segment: None,
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_grant_requires_known_principal() {
        let store = store_with(&[]).await;
        let result = store
            .grant(&"ghost".into(), FILES, &"f1".into(), None)
            .await;
        assert_eq!(
            result,
            Err(ProviderError::InvalidArgument(
                "invalid principal for record".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_grant_check_revoke() {
        let store = store_with(&["alice"]).await;
        let alice = PrincipalId::from("alice");
        let file = ResourceId::from("f1");

        assert!(!store.check(&alice, FILES, &file).await.unwrap().allowed);

        store
            .grant(&alice, FILES, &file, Some(Attributes::new("doc", Role::Owner)))
            .await
            .unwrap();
        let check = store.check(&alice, FILES, &file).await.unwrap();
        assert!(check.allowed);
        assert_eq!(check.attributes.unwrap().role(), Some(Role::Owner));

        // Same id under another type is a different resource.
        assert!(!store.check(&alice, "folders", &file).await.unwrap().allowed);

        store.revoke(&alice, FILES, &file).await.unwrap();
        assert!(!store.check(&alice, FILES, &file).await.unwrap().allowed);

        // Revoking again is fine.
        store.revoke(&alice, FILES, &file).await.unwrap();
    }

    #[tokio::test]
    async fn test_regrant_overwrites_only_with_attributes() {
        let store = store_with(&["alice"]).await;
        let alice = PrincipalId::from("alice");
        let file = ResourceId::from("f1");

        store
            .grant(&alice, FILES, &file, Some(Attributes::new("doc", Role::Viewer)))
            .await
            .unwrap();
        store
            .grant(&alice, FILES, &file, Some(Attributes::new("doc", Role::Editor)))
            .await
            .unwrap();
        store.grant(&alice, FILES, &file, None).await.unwrap();

        let attrs = store.check(&alice, FILES, &file).await.unwrap().attributes;
        assert_eq!(attrs.unwrap().role(), Some(Role::Editor));
        assert_eq!(store.grant_count(FILES, &file), 1);
    }

    #[tokio::test]
    async fn test_list_resources_pages_in_order() {
        let store = store_with(&["alice"]).await;
        let alice = PrincipalId::from("alice");
        for id in ["e", "a", "d", "b", "c"] {
            store
                .grant(&alice, FILES, &id.into(), Some(Attributes::new(id, Role::Owner)))
                .await
                .unwrap();
        }

        let first = store
            .list_resources(&alice, FILES, &PageRequest::with_limit(3))
            .await
            .unwrap();
        let ids: Vec<_> = first.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let next = first.next.expect("more entries remain");

        let second = store
            .list_resources(&alice, FILES, &PageRequest::new(Some(3), Some(next)))
            .await
            .unwrap();
        let ids: Vec<_> = second.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "e"]);
        assert!(second.is_last());
    }

    #[tokio::test]
    async fn test_exact_fit_page_has_no_cursor() {
        let store = store_with(&["alice"]).await;
        let alice = PrincipalId::from("alice");
        for id in ["a", "b"] {
            store.grant(&alice, FILES, &id.into(), None).await.unwrap();
        }

        let page = store
            .list_resources(&alice, FILES, &PageRequest::with_limit(2))
            .await
            .unwrap();
        assert_eq!(page.entries.len(), 2);
        assert!(page.is_last());
    }

    #[tokio::test]
    async fn test_out_of_range_limits_use_default() {
        let store = store_with(&["alice"]).await;
        let alice = PrincipalId::from("alice");
        for i in 0..40 {
            store
                .grant(&alice, FILES, &format!("f{:02}", i).into(), None)
                .await
                .unwrap();
        }

        for limit in [None, Some(0), Some(30), Some(500)] {
            let page = store
                .list_resources(&alice, FILES, &PageRequest::new(limit, None))
                .await
                .unwrap();
            assert_eq!(page.entries.len(), DEFAULT_PAGE_LIMIT, "limit {:?}", limit);
            assert!(page.next.is_some());
        }
    }

    #[tokio::test]
    async fn test_unreadable_cursor_restarts() {
        let store = store_with(&["alice"]).await;
        let alice = PrincipalId::from("alice");
        store.grant(&alice, FILES, &"a".into(), None).await.unwrap();

        let page = store
            .list_resources(
                &alice,
                FILES,
                &PageRequest::new(None, Cursor::new("!!not base64!!")),
            )
            .await
            .unwrap();
        assert_eq!(page.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_list_principals_is_complete_across_pages() {
        let ids: Vec<String> = (0..11).map(|i| format!("p{:02}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let store = store_with(&refs).await;
        let file = ResourceId::from("shared");
        for id in &ids {
            store
                .grant(&id.as_str().into(), FILES, &file, Some(Attributes::new("s", Role::Viewer)))
                .await
                .unwrap();
        }

        let all = collect_all(PageRequest::with_limit(4), |req| {
            let store = store.clone();
            let file = file.clone();
            async move { store.list_principals(&file, FILES, &req).await }
        })
        .await
        .unwrap();

        let listed: Vec<String> = all.into_iter().map(|g| g.principal_id.to_string()).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_segments() {
        let store = MemoryStore::new();
        for (id, segment) in [("a", Some("blue")), ("b", None), ("c", Some("blue"))] {
            store
                .create_principal(PrincipalRecord {
                    id: id.into(),
                    name: Some(id.to_string()),
                    segment: segment.map(str::to_string),
                })
                .await
                .unwrap();
        }

        let blue = store
            .list_principals_in(Some("blue"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(blue.entries.len(), 2);

        let unsegmented = store
            .list_principals_in(None, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(unsegmented.entries.len(), 1);
        assert_eq!(unsegmented.entries[0].id.as_str(), "b");
    }

    #[tokio::test]
    async fn test_duplicate_principal() {
        let store = store_with(&["alice"]).await;
        let result = store
            .create_principal(PrincipalRecord {
                id: "alice".into(),
                name: None,
                segment: None,
            })
            .await;
        assert!(matches!(result, Err(ProviderError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_principal_drops_grants() {
        let store = store_with(&["alice", "bob"]).await;
        let file = ResourceId::from("f1");
        for who in ["alice", "bob"] {
            store.grant(&who.into(), FILES, &file, None).await.unwrap();
        }

        store.delete_principal(&"bob".into()).await.unwrap();
        assert_eq!(store.grant_count(FILES, &file), 1);
        assert!(matches!(
            store.retrieve_principal(&"bob".into()).await,
            Err(ProviderError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_principal(&"bob".into()).await,
            Err(ProviderError::NotFound(_))
        ));
    }
}
