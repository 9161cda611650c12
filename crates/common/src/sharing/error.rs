use crate::access::AccessError;
use crate::context::Cancelled;
use crate::store::ProviderError;

/// Failures of a sharing operation.
///
/// `Forbidden` carries no detail. A caller without access gets the same
/// error for a missing file and for one they can't see.
#[derive(Debug, thiserror::Error)]
pub enum SharingError {
    #[error("forbidden")]
    Forbidden,
    #[error("privilege escalation: {0}")]
    PrivilegeEscalation(AccessError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    /// Store failure, message passed through untouched.
    #[error("{0}")]
    Store(#[from] ProviderError),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    /// A delete stopped part way. The grants already revoked stay revoked;
    /// repeating the delete picks up where this one stopped.
    #[error("delete incomplete after revoking {revoked} grant(s): {source}")]
    IncompleteDelete {
        revoked: usize,
        source: ProviderError,
    },
}

impl From<AccessError> for SharingError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::InsufficientPrivilege { .. } => SharingError::Forbidden,
            AccessError::PrivilegeEscalation { .. } => SharingError::PrivilegeEscalation(err),
        }
    }
}
