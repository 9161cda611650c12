//! Shared test utilities for sharing integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::attributes::Attributes;
use common::pagination::{Page, PageRequest};
use common::sharing::{FileService, NewFile, UserService};
use common::store::{
    AuthzProvider, CheckResult, IdentityProvider, MemoryStore, PrincipalGrant, PrincipalId,
    PrincipalRecord, ProviderError, ResourceEntry, ResourceId,
};

pub struct TestEnv {
    pub store: MemoryStore,
    pub files: FileService,
    pub users: UserService,
}

/// Set up an in-memory store with the given principals already registered.
pub async fn setup_test_env(principals: &[&str]) -> TestEnv {
    let store = MemoryStore::new();
    add_principals(&store, principals).await;

    TestEnv {
        files: FileService::new(Arc::new(store.clone())),
        users: UserService::new(Arc::new(store.clone())),
        store,
    }
}

pub async fn add_principals(store: &MemoryStore, principals: &[&str]) {
    for id in principals {
        store
            .create_principal(PrincipalRecord {
                id: PrincipalId::from(*id),
                name: Some(id.to_string()),
                segment: None,
            })
            .await
            .unwrap();
    }
}

pub fn new_file(name: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        kind: None,
    }
}

/// Wraps a [`MemoryStore`], counting mutations and optionally failing the
/// n-th revoke (1-based) or stalling every grant forever.
#[derive(Debug)]
pub struct InstrumentedStore {
    pub inner: MemoryStore,
    fail_revoke_on: Option<usize>,
    stall_grants: bool,
    grants: AtomicUsize,
    revokes: AtomicUsize,
}

impl InstrumentedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_revoke_on: None,
            stall_grants: false,
            grants: AtomicUsize::new(0),
            revokes: AtomicUsize::new(0),
        }
    }

    pub fn failing_revoke(mut self, call: usize) -> Self {
        self.fail_revoke_on = Some(call);
        self
    }

    pub fn stalling_grants(mut self) -> Self {
        self.stall_grants = true;
        self
    }

    pub fn grant_calls(&self) -> usize {
        self.grants.load(Ordering::SeqCst)
    }

    pub fn revoke_calls(&self) -> usize {
        self.revokes.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        self.grant_calls() + self.revoke_calls()
    }
}

#[async_trait]
impl AuthzProvider for InstrumentedStore {
    async fn grant(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
        attributes: Option<Attributes>,
    ) -> Result<(), ProviderError> {
        self.grants.fetch_add(1, Ordering::SeqCst);
        if self.stall_grants {
            std::future::pending::<()>().await;
        }
        self.inner
            .grant(principal, resource_type, resource, attributes)
            .await
    }

    async fn check(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
    ) -> Result<CheckResult, ProviderError> {
        self.inner.check(principal, resource_type, resource).await
    }

    async fn revoke(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        resource: &ResourceId,
    ) -> Result<(), ProviderError> {
        let call = self.revokes.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_revoke_on == Some(call) {
            return Err(ProviderError::Unavailable(format!(
                "revoke {} rejected",
                call
            )));
        }
        self.inner.revoke(principal, resource_type, resource).await
    }

    async fn list_resources(
        &self,
        principal: &PrincipalId,
        resource_type: &str,
        page: &PageRequest,
    ) -> Result<Page<ResourceEntry>, ProviderError> {
        self.inner
            .list_resources(principal, resource_type, page)
            .await
    }

    async fn list_principals(
        &self,
        resource: &ResourceId,
        resource_type: &str,
        page: &PageRequest,
    ) -> Result<Page<PrincipalGrant>, ProviderError> {
        self.inner
            .list_principals(resource, resource_type, page)
            .await
    }
}
