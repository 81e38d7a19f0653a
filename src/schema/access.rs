//! Access-control types: actions, resources, permissions, roles, user groups
//! and the two membership associations

use super::de;
use gfwapi::Result;
use gfwapi::types::{
    Action, NewAction, NewPermission, NewResource, NewRole, NewUserGroup, Permission, Resource,
    Role, UserGroup,
};
use serde::{Deserialize, Serialize};

/// `gfw_action`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ActionConfig {
    pub fn to_domain(&self) -> Result<NewAction> {
        super::validate::not_empty("name", &self.name)?;
        Ok(NewAction {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }

    pub fn to_config(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            description: action.description.clone(),
            created_at: action.created_at.clone(),
        }
    }
}

/// `gfw_resource`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ResourceConfig {
    pub fn to_domain(&self) -> Result<NewResource> {
        super::validate::not_empty("type", &self.resource_type)?;
        super::validate::not_empty("value", &self.value)?;
        Ok(NewResource {
            resource_type: self.resource_type.clone(),
            value: self.value.clone(),
            description: self.description.clone(),
        })
    }

    pub fn to_config(resource: &Resource) -> Self {
        Self {
            resource_type: resource.resource_type.clone(),
            value: resource.value.clone(),
            description: resource.description.clone(),
            created_at: resource.created_at.clone(),
        }
    }
}

/// `gfw_permission`
///
/// A permission binds one resource to one action; the pair is its natural key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de::id")]
    pub resource_id: i64,
    #[serde(deserialize_with = "de::id")]
    pub action_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PermissionConfig {
    pub fn to_domain(&self) -> Result<NewPermission> {
        super::validate::not_empty("name", &self.name)?;
        Ok(NewPermission {
            name: self.name.clone(),
            description: self.description.clone(),
            action_id: self.action_id,
            resource_id: self.resource_id,
        })
    }

    pub fn to_config(permission: &Permission) -> Self {
        Self {
            name: permission.name.clone(),
            description: permission.description.clone(),
            resource_id: permission.resource.id,
            action_id: permission.action.id,
            created_at: permission.created_at.clone(),
        }
    }
}

/// `gfw_role`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RoleConfig {
    pub fn to_domain(&self) -> Result<NewRole> {
        super::validate::not_empty("name", &self.name)?;
        Ok(NewRole {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }

    pub fn to_config(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            created_at: role.created_at.clone(),
        }
    }
}

/// `gfw_user_group`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserGroupConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserGroupConfig {
    pub fn to_domain(&self) -> Result<NewUserGroup> {
        super::validate::not_empty("name", &self.name)?;
        Ok(NewUserGroup {
            name: self.name.clone(),
            description: self.description.clone(),
            default: self.default,
        })
    }

    pub fn to_config(group: &UserGroup) -> Self {
        Self {
            name: group.name.clone(),
            description: group.description.clone(),
            default: group.default,
            created_at: group.created_at.clone(),
        }
    }
}

/// `gfw_role_permissions`: the full permission set of one role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RolePermissionsConfig {
    #[serde(deserialize_with = "de::id")]
    pub role: i64,
    #[serde(default, deserialize_with = "de::id_set")]
    pub permissions: Vec<i64>,
}

impl RolePermissionsConfig {
    pub fn to_config(role: &Role) -> Self {
        Self {
            role: role.id,
            permissions: sorted(role.permission_ids()),
        }
    }
}

/// `gfw_user_group_roles`: the full role set of one user group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserGroupRolesConfig {
    #[serde(deserialize_with = "de::id")]
    pub user_group: i64,
    #[serde(default, deserialize_with = "de::id_set")]
    pub roles: Vec<i64>,
}

impl UserGroupRolesConfig {
    pub fn to_config(group: &UserGroup) -> Self {
        Self {
            user_group: group.id,
            roles: sorted(group.role_ids()),
        }
    }
}

fn sorted(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_permission_round_trip() {
        let config: PermissionConfig = serde_json::from_value(json!({
            "name": "read-fishing",
            "description": "read the fishing dataset",
            "resource_id": "7",
            "action_id": 3,
        }))
        .unwrap();
        let new = config.to_domain().unwrap();
        assert_eq!((new.resource_id, new.action_id), (7, 3));

        let read = Permission {
            id: 42,
            name: new.name.clone(),
            description: new.description.clone(),
            resource: Resource {
                id: 7,
                ..Default::default()
            },
            action: Action {
                id: 3,
                ..Default::default()
            },
            created_at: None,
        };
        assert_eq!(PermissionConfig::to_config(&read), config);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = serde_json::from_value::<RoleConfig>(json!({"name": "admin", "colour": "red"}))
            .unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let config = ActionConfig::default();
        assert!(config.to_domain().is_err());
    }

    #[test]
    fn test_resource_type_key() {
        let config: ResourceConfig =
            serde_json::from_value(json!({"type": "dataset", "value": "fishing"})).unwrap();
        assert_eq!(config.to_domain().unwrap().resource_type, "dataset");
        assert_eq!(serde_json::to_value(&config).unwrap()["type"], "dataset");
    }

    #[test]
    fn test_user_group_round_trip() {
        let config = UserGroupConfig {
            name: "staff".into(),
            description: "everyone".into(),
            default: true,
            created_at: None,
        };
        let new = config.to_domain().unwrap();
        let read = UserGroup {
            id: 5,
            name: new.name,
            description: new.description,
            default: new.default,
            ..Default::default()
        };
        assert_eq!(UserGroupConfig::to_config(&read), config);
    }

    #[test]
    fn test_membership_config_is_a_set() {
        let config: RolePermissionsConfig =
            serde_json::from_value(json!({"role": "1", "permissions": [4, 2, "2"]})).unwrap();
        assert_eq!(config.permissions, vec![2, 4]);

        let role: Role = serde_json::from_value(json!({
            "id": 1,
            "permissions": [{"id": 4}, {"id": 2}],
        }))
        .unwrap();
        assert_eq!(RolePermissionsConfig::to_config(&role), config);
    }

    #[test]
    fn test_user_group_roles_from_group() {
        let group: UserGroup =
            serde_json::from_value(json!({"id": 9, "roles": [{"id": 3}, {"id": 1}]})).unwrap();
        let config = UserGroupRolesConfig::to_config(&group);
        assert_eq!(config.user_group, 9);
        assert_eq!(config.roles, vec![1, 3]);
    }
}
