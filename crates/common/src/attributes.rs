use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    String(String),
}

/// Attributes attached to a grant in the authorization store.
///
/// The fields the engine relies on are typed; anything else a client stores
/// lands in `extra` and is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Display name of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role name exactly as stored. See [`Attributes::role`].
    #[serde(default, rename = "role", skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// Free-form resource type label.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Scalar>,
}

impl Attributes {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: Some(name.into()),
            role_name: Some(role.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind;
        self
    }

    /// The stored role, if it is one we recognise.
    pub fn role(&self) -> Option<Role> {
        self.role_name.as_deref().and_then(Role::parse)
    }

    /// Copy of these attributes carrying a different role.
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role_name: Some(role.as_str().to_string()),
            ..self.clone()
        }
    }
}
