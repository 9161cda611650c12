//! Access decisions.
//!
//! Pure functions over roles that have already been resolved against the
//! store. `None` stands for a principal that holds a grant whose role we do
//! not recognise; it fails every comparison.

use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The actor's role may not perform this action at all.
    #[error("role cannot perform this action (role: {})", display_role(.role))]
    InsufficientPrivilege { role: Option<Role> },
    /// The action would reach above the actor's own level.
    #[error(
        "cannot act on a more privileged role (actor role: {}, target role: {})",
        display_role(.actor),
        display_role(.target)
    )]
    PrivilegeEscalation {
        actor: Option<Role>,
        target: Option<Role>,
    },
}

fn display_role(role: &Option<Role>) -> &'static str {
    match role {
        Some(role) => role.as_str(),
        None => "unrecognised",
    }
}

/// Whether a principal holding `sharer` may grant `target` to someone else.
///
/// Only owners and editors may share, and never above their own level.
pub fn can_share(sharer: Option<Role>, target: Role) -> Result<(), AccessError> {
    let sharer_role = match sharer {
        Some(role @ (Role::Owner | Role::Editor)) => role,
        _ => return Err(AccessError::InsufficientPrivilege { role: sharer }),
    };

    if !sharer_role.dominates(target) {
        return Err(AccessError::PrivilegeEscalation {
            actor: sharer,
            target: Some(target),
        });
    }

    Ok(())
}

/// Whether a principal holding `requestor` may revoke a grant of `target`.
pub fn can_unshare(requestor: Option<Role>, target: Option<Role>) -> Result<(), AccessError> {
    match (requestor, target) {
        (Some(requestor_role), Some(target_role)) if requestor_role.dominates(target_role) => {
            Ok(())
        }
        _ => Err(AccessError::PrivilegeEscalation {
            actor: requestor,
            target,
        }),
    }
}

/// Whether a principal holding `role` may delete the file.
pub fn can_delete(role: Option<Role>) -> Result<(), AccessError> {
    match role {
        Some(Role::Owner | Role::Editor) => Ok(()),
        _ => Err(AccessError::InsufficientPrivilege { role }),
    }
}
