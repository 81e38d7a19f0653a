//! Access-control entities: actions, resources, permissions, roles and user groups.

use super::null_default;
use serde::{Deserialize, Serialize};

/// An action that can be granted on a resource (e.g. `read`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Server-assigned identity.
    pub id: i64,
    /// Unique name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAction {
    /// Unique name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// A permission target, identified by type and value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Server-assigned identity.
    pub id: i64,
    /// Resource type, e.g. `dataset`.
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Resource value, e.g. a dataset id.
    #[serde(default)]
    pub value: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewResource {
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource value.
    pub value: String,
    /// Description.
    pub description: String,
}

/// A (resource, action) grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Server-assigned identity.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Bound resource.
    #[serde(default)]
    pub resource: Resource,
    /// Bound action.
    #[serde(default)]
    pub action: Action,
}

impl Permission {
    /// Whether this permission binds the given resource/action pair.
    #[must_use]
    pub fn binds(&self, resource_id: i64, action_id: i64) -> bool {
        self.resource.id == resource_id && self.action.id == action_id
    }
}

/// Body of `POST permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Bound action.
    pub action_id: i64,
    /// Bound resource.
    pub resource_id: i64,
}

/// A named bundle of permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Server-assigned identity.
    pub id: i64,
    /// Unique name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Current permission members.
    #[serde(default, deserialize_with = "null_default")]
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Ids of the role's current permissions.
    #[must_use]
    pub fn permission_ids(&self) -> Vec<i64> {
        self.permissions.iter().map(|p| p.id).collect()
    }
}

/// Body of `POST roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRole {
    /// Unique name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// A group of users that is granted roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    /// Server-assigned identity.
    pub id: i64,
    /// Unique name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Whether new users join this group automatically.
    #[serde(default)]
    pub default: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Current role members.
    #[serde(default, deserialize_with = "null_default")]
    pub roles: Vec<Role>,
}

impl UserGroup {
    /// Ids of the group's current roles.
    #[must_use]
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|r| r.id).collect()
    }
}

/// Body of `POST user-groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUserGroup {
    /// Unique name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether new users join this group automatically.
    pub default: bool,
}
