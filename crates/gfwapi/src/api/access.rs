//! Access-control endpoints.
//!
//! None of these collections offers an update endpoint. Natural-key lookups
//! list the whole collection and scan it.

use super::{ACTIONS, PERMISSIONS, RESOURCES, ROLES, USER_GROUPS};
use crate::error::Result;
use crate::transport::Method;
use crate::types::{
    Action, NewAction, NewPermission, NewResource, NewRole, NewUserGroup, Permission, Resource,
    Role, UserGroup,
};
use crate::{Client, encode};
use log::debug;

impl Client {
    /// List every action.
    pub fn list_actions(&self) -> Result<Vec<Action>> {
        self.list(ACTIONS, &[])
    }

    /// Get an action by id.
    pub fn get_action(&self, id: i64) -> Result<Action> {
        self.fetch(&self.request(Method::Get, format!("{ACTIONS}/{id}")))
    }

    /// Find an action by name.
    pub fn find_action(&self, name: &str) -> Result<Option<Action>> {
        Ok(self.list_actions()?.into_iter().find(|a| a.name == name))
    }

    /// Create an action.
    pub fn create_action(&self, action: &NewAction) -> Result<Action> {
        let request = self.request(Method::Post, ACTIONS).body(encode(action)?);
        self.fetch(&request)
    }

    /// Delete an action.
    pub fn delete_action(&self, id: i64) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{ACTIONS}/{id}")))
    }

    /// List every permission resource.
    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        self.list(RESOURCES, &[])
    }

    /// Get a permission resource by id.
    pub fn get_resource(&self, id: i64) -> Result<Resource> {
        self.fetch(&self.request(Method::Get, format!("{RESOURCES}/{id}")))
    }

    /// Find a permission resource by its type and value.
    pub fn find_resource(&self, resource_type: &str, value: &str) -> Result<Option<Resource>> {
        Ok(self
            .list_resources()?
            .into_iter()
            .find(|r| r.resource_type == resource_type && r.value == value))
    }

    /// Create a permission resource.
    pub fn create_resource(&self, resource: &NewResource) -> Result<Resource> {
        let request = self.request(Method::Post, RESOURCES).body(encode(resource)?);
        self.fetch(&request)
    }

    /// Delete a permission resource.
    pub fn delete_resource(&self, id: i64) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{RESOURCES}/{id}")))
    }

    /// List every permission.
    pub fn list_permissions(&self) -> Result<Vec<Permission>> {
        self.list(PERMISSIONS, &[])
    }

    /// Get a permission by id.
    pub fn get_permission(&self, id: i64) -> Result<Permission> {
        self.fetch(&self.request(Method::Get, format!("{PERMISSIONS}/{id}")))
    }

    /// Find the permission binding a resource/action pair.
    pub fn find_permission(&self, resource_id: i64, action_id: i64) -> Result<Option<Permission>> {
        Ok(self
            .list_permissions()?
            .into_iter()
            .find(|p| p.binds(resource_id, action_id)))
    }

    /// Create a permission.
    pub fn create_permission(&self, permission: &NewPermission) -> Result<Permission> {
        let request = self
            .request(Method::Post, PERMISSIONS)
            .body(encode(permission)?);
        self.fetch(&request)
    }

    /// Delete a permission.
    pub fn delete_permission(&self, id: i64) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{PERMISSIONS}/{id}")))
    }

    /// List every role.
    pub fn list_roles(&self) -> Result<Vec<Role>> {
        self.list(ROLES, &[])
    }

    /// Get a role, including its current permissions.
    pub fn get_role(&self, id: i64) -> Result<Role> {
        self.fetch(&self.request(Method::Get, format!("{ROLES}/{id}")))
    }

    /// Find a role by name.
    pub fn find_role(&self, name: &str) -> Result<Option<Role>> {
        Ok(self.list_roles()?.into_iter().find(|r| r.name == name))
    }

    /// Create a role.
    pub fn create_role(&self, role: &NewRole) -> Result<Role> {
        let request = self.request(Method::Post, ROLES).body(encode(role)?);
        self.fetch(&request)
    }

    /// Delete a role.
    pub fn delete_role(&self, id: i64) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{ROLES}/{id}")))
    }

    /// Grant a permission to a role.
    pub fn add_role_permission(&self, role_id: i64, permission_id: i64) -> Result<()> {
        debug!("adding permission {permission_id} to role {role_id}");
        self.discard(&self.request(
            Method::Post,
            format!("{ROLES}/{role_id}/permission/{permission_id}"),
        ))
    }

    /// Revoke a permission from a role.
    pub fn remove_role_permission(&self, role_id: i64, permission_id: i64) -> Result<()> {
        debug!("removing permission {permission_id} from role {role_id}");
        self.discard(&self.request(
            Method::Delete,
            format!("{ROLES}/{role_id}/permission/{permission_id}"),
        ))
    }

    /// List every user group.
    pub fn list_user_groups(&self) -> Result<Vec<UserGroup>> {
        self.list(USER_GROUPS, &[])
    }

    /// Get a user group, including its current roles.
    pub fn get_user_group(&self, id: i64) -> Result<UserGroup> {
        self.fetch(&self.request(Method::Get, format!("{USER_GROUPS}/{id}")))
    }

    /// Find a user group by name.
    pub fn find_user_group(&self, name: &str) -> Result<Option<UserGroup>> {
        Ok(self.list_user_groups()?.into_iter().find(|g| g.name == name))
    }

    /// Create a user group.
    pub fn create_user_group(&self, group: &NewUserGroup) -> Result<UserGroup> {
        let request = self.request(Method::Post, USER_GROUPS).body(encode(group)?);
        self.fetch(&request)
    }

    /// Delete a user group.
    pub fn delete_user_group(&self, id: i64) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{USER_GROUPS}/{id}")))
    }

    /// Grant a role to a user group.
    pub fn add_user_group_role(&self, group_id: i64, role_id: i64) -> Result<()> {
        debug!("adding role {role_id} to user group {group_id}");
        self.discard(&self.request(
            Method::Post,
            format!("{USER_GROUPS}/{group_id}/role/{role_id}"),
        ))
    }

    /// Revoke a role from a user group.
    pub fn remove_user_group_role(&self, group_id: i64, role_id: i64) -> Result<()> {
        debug!("removing role {role_id} from user group {group_id}");
        self.discard(&self.request(
            Method::Delete,
            format!("{USER_GROUPS}/{group_id}/role/{role_id}"),
        ))
    }
}
