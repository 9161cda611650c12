//! Per-request context.
//!
//! Every engine operation takes a [`RequestContext`] as its first argument.
//! It names the authenticated caller and carries the cancellation token that
//! aborts any store call still in flight.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::store::PrincipalId;

#[derive(Debug, Clone)]
pub struct RequestContext {
    caller: PrincipalId,
    cancel: CancellationToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request cancelled")]
pub struct Cancelled;

impl RequestContext {
    pub fn new(caller: impl Into<PrincipalId>, cancel: CancellationToken) -> Self {
        Self {
            caller: caller.into(),
            cancel,
        }
    }

    /// A context that is only cancelled by dropping every clone of it.
    pub fn detached(caller: impl Into<PrincipalId>) -> Self {
        Self::new(caller, CancellationToken::new())
    }

    pub fn caller(&self) -> &PrincipalId {
        &self.caller
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the request is cancelled first, in
    /// which case `fut` is dropped mid-flight.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, Cancelled>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Cancelled),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = RequestContext::detached("alice");
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
        assert_eq!(ctx.caller().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_pre_cancelled_never_polls() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::new("alice", token);

        let result = ctx
            .run(async { panic!("future must not be polled after cancellation") })
            .await;
        assert_eq!(result, Err::<(), _>(Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_in_flight() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new("alice", token.child_token());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(3600)))
            .await;
        assert_eq!(result, Err(Cancelled));
        canceller.await.unwrap();
    }
}
