use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::pagination::{Page, PageRequest};
use crate::store::{IdentityProvider, PrincipalId, PrincipalRecord, ProviderError};

use super::SharingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PrincipalId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl User {
    fn from_record(record: PrincipalRecord) -> Option<Self> {
        Some(Self {
            id: record.id,
            name: record.name?,
            segment: record.segment,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

/// Principal management on top of an [`IdentityProvider`].
#[derive(Debug, Clone)]
pub struct UserService {
    identity: Arc<dyn IdentityProvider>,
}

impl UserService {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn create(&self, ctx: &RequestContext, user: NewUser) -> Result<User, SharingError> {
        let name = user.name.trim();
        if name.is_empty() {
            return Err(SharingError::Validation("user name is required".into()));
        }

        let record = PrincipalRecord {
            id: PrincipalId::new(Uuid::new_v4().to_string()),
            name: Some(name.to_string()),
            segment: user.segment.filter(|s| !s.is_empty()),
        };
        let record = ctx.run(self.identity.create_principal(record)).await??;

        tracing::info!(user = %record.id, "created user");

        User::from_record(record)
            .ok_or_else(|| SharingError::Validation("user name is required".into()))
    }

    pub async fn get(&self, ctx: &RequestContext, id: &PrincipalId) -> Result<User, SharingError> {
        let record = ctx
            .run(self.identity.retrieve_principal(id))
            .await?
            .map_err(|e| not_found_or_store(e, id))?;

        Ok(User {
            id: record.id,
            name: record.name.unwrap_or_default(),
            segment: record.segment,
        })
    }

    /// One page of users in `segment`, or of users without a segment. Users
    /// without a name are skipped.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        segment: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<User>, SharingError> {
        let records = ctx
            .run(self.identity.list_principals_in(segment, page))
            .await??;

        Ok(records.filter_map(User::from_record))
    }

    /// Remove a user. Every grant the user held goes with it.
    pub async fn delete(&self, ctx: &RequestContext, id: &PrincipalId) -> Result<(), SharingError> {
        ctx.run(self.identity.delete_principal(id))
            .await?
            .map_err(|e| not_found_or_store(e, id))?;

        tracing::info!(user = %id, "deleted user");
        Ok(())
    }
}

fn not_found_or_store(err: ProviderError, id: &PrincipalId) -> SharingError {
    match err {
        ProviderError::NotFound(_) => SharingError::NotFound(format!("user {}", id)),
        other => SharingError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn setup() -> (MemoryStore, UserService) {
        let store = MemoryStore::new();
        let users = UserService::new(Arc::new(store.clone()));
        (store, users)
    }

    fn new_user(name: &str, segment: Option<&str>) -> NewUser {
        NewUser {
            name: name.into(),
            segment: segment.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_store, users) = setup();
        let ctx = RequestContext::detached("admin");

        let created = users.create(&ctx, new_user("Alice", None)).await.unwrap();
        assert_eq!(created.name, "Alice");

        let fetched = users.get(&ctx, &created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (_store, users) = setup();
        let ctx = RequestContext::detached("admin");

        let result = users.create(&ctx, new_user("", None)).await;
        assert!(matches!(result, Err(SharingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let (_store, users) = setup();
        let ctx = RequestContext::detached("admin");

        let result = users.get(&ctx, &"nobody".into()).await;
        assert!(matches!(result, Err(SharingError::NotFound(_))));
        let result = users.delete(&ctx, &"nobody".into()).await;
        assert!(matches!(result, Err(SharingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_by_segment() {
        let (store, users) = setup();
        let ctx = RequestContext::detached("admin");

        users.create(&ctx, new_user("a", None)).await.unwrap();
        users.create(&ctx, new_user("b", Some("eu"))).await.unwrap();
        users.create(&ctx, new_user("c", Some("eu"))).await.unwrap();
        store
            .create_principal(PrincipalRecord {
                id: "nameless".into(),
                name: None,
                segment: Some("eu".into()),
            })
            .await
            .unwrap();

        let eu = users
            .list(&ctx, Some("eu"), &PageRequest::default())
            .await
            .unwrap();
        let mut names: Vec<_> = eu.entries.into_iter().map(|u| u.name).collect();
        names.sort();
        assert_eq!(names, vec!["b", "c"]);

        let unsegmented = users
            .list(&ctx, None, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(unsegmented.entries.len(), 1);
        assert_eq!(unsegmented.entries[0].name, "a");
    }
}
