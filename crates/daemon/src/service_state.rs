use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use common::prelude::*;

use crate::ServiceConfig;

/// Composition root of the daemon.
///
/// Owns the store handles and the services built on them, plus the root
/// cancellation token every request context is derived from.
#[derive(Debug, Clone)]
pub struct State {
    store: MemoryStore,
    files: FileService,
    users: UserService,
    shutdown: CancellationToken,
}

impl State {
    pub async fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        tracing::info!(api_port = config.api_port, "building service state on in-memory store");
        Ok(Self::with_store(MemoryStore::new()))
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let authz: Arc<dyn AuthzProvider> = Arc::new(store.clone());
        let identity: Arc<dyn IdentityProvider> = Arc::new(store.clone());

        Self {
            files: FileService::new(authz),
            users: UserService::new(identity),
            store,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn files(&self) -> &FileService {
        &self.files
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// A context for one request made by `caller`. It is cancelled when
    /// the service shuts down.
    pub fn request_context(&self, caller: impl Into<PrincipalId>) -> RequestContext {
        RequestContext::new(caller, self.shutdown.child_token())
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_cancels_request_contexts() {
        let state = State::with_store(MemoryStore::new());
        let ctx = state.request_context("alice");
        assert!(!ctx.is_cancelled());

        state.shutdown_token().cancel();
        assert!(ctx.is_cancelled());
        assert!(state.is_shutting_down());
    }
}
