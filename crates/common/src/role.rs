//! # Roles
//!
//! Every grant on a file carries exactly one [`Role`]. Roles form a strict
//! total order; the lower the [ordinal](Role::ordinal), the more privileged
//! the role:
//!
//! | role     | ordinal |
//! |----------|---------|
//! | `owner`  | 0       |
//! | `editor` | 1       |
//! | `viewer` | 2       |
//!
//! The table is fixed at compile time. Role names that don't appear in it
//! parse to "no role", and a principal with no role fails every privilege
//! comparison.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A principal's access level on a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Created the file. Can share at any level, unshare anyone and delete.
    Owner,
    /// Can share as editor or viewer, unshare editors and viewers, and delete.
    Editor,
    /// Read-only. Cannot share, and can only unshare other viewers.
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Owner, Role::Editor, Role::Viewer];

    /// Rank of the role in the hierarchy. Lower dominates.
    pub const fn ordinal(self) -> u8 {
        match self {
            Role::Owner => 0,
            Role::Editor => 1,
            Role::Viewer => 2,
        }
    }

    /// Wire name of the role, as stored in grant attributes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Parse a stored role name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "owner" => Some(Role::Owner),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    /// True when `self` is at least as privileged as `other`.
    pub fn dominates(self, other: Role) -> bool {
        self.ordinal() <= other.ordinal()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}
