//! `gfw_role_permissions` resource
//!
//! Owns the complete permission set of one role. Permissions attached by
//! anything else are removed on the next apply.

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use log::{debug, info};
use std::sync::Arc;

use crate::reconcile::{RolePermissions, reconcile_membership};
use crate::schema::access::RolePermissionsConfig;
use crate::schema::de::parse_id;

pub struct GfwRolePermissions {
    client: Arc<Client>,
}

impl GfwRolePermissions {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn converge(&self, role: i64, permissions: &[i64]) -> Result<()> {
        reconcile_membership(&self.client, &RolePermissions, role, permissions)
            .with_context(|| format!("failed to reconcile permissions of role {role}"))?;
        Ok(())
    }
}

impl Resource for GfwRolePermissions {
    type Config = RolePermissionsConfig;

    fn type_name(&self) -> &'static str {
        "gfw_role_permissions"
    }

    fn create(&self, config: &RolePermissionsConfig) -> Result<Applied<RolePermissionsConfig>> {
        self.converge(config.role, &config.permissions)?;
        self.read(&config.role.to_string())
    }

    fn read(&self, id: &str) -> Result<Applied<RolePermissionsConfig>> {
        let role = self
            .client
            .get_role(parse_id(id)?)
            .with_context(|| format!("failed to read role {id}"))?;
        Ok(Applied::new(id, RolePermissionsConfig::to_config(&role)))
    }

    fn update(
        &self,
        _id: &str,
        prior: &RolePermissionsConfig,
        desired: &RolePermissionsConfig,
    ) -> Result<Applied<RolePermissionsConfig>> {
        if prior.role != desired.role {
            info!(
                "permission set moved from role {} to role {}",
                prior.role, desired.role
            );
            self.converge(prior.role, &[])?;
        }
        self.create(desired)
    }

    fn delete(&self, id: &str, _prior: &RolePermissionsConfig) -> Result<()> {
        let role = parse_id(id)?;
        match reconcile_membership(&self.client, &RolePermissions, role, &[]) {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                debug!("role {role} is gone, nothing to detach");
                Ok(())
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to detach permissions of role {role}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::mock_client;
    use gfwapi::Method;
    use serde_json::json;

    fn role(id: i64, permissions: &[i64]) -> serde_json::Value {
        let permissions: Vec<_> = permissions.iter().map(|p| json!({"id": p})).collect();
        json!({"id": id, "name": "analyst", "permissions": permissions})
    }

    fn config(role: i64, permissions: &[i64]) -> RolePermissionsConfig {
        RolePermissionsConfig {
            role,
            permissions: permissions.to_vec(),
        }
    }

    #[test]
    fn test_create_converges_and_reads_back() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "roles/10", &role(10, &[1, 2, 3]));
        mock.respond_json(Method::Get, "roles/10", &role(10, &[4, 2, 3]));
        mock.respond(Method::Post, "roles/10/permission/4", 200, "");
        mock.respond(Method::Delete, "roles/10/permission/1", 200, "");

        let applied = GfwRolePermissions::new(client)
            .create(&config(10, &[2, 3, 4]))
            .unwrap();
        assert_eq!(applied.id, "10");
        assert_eq!(applied.config, config(10, &[2, 3, 4]));
        assert_eq!(mock.count_method(Method::Post), 1);
        assert_eq!(mock.count_method(Method::Delete), 1);
    }

    #[test]
    fn test_update_to_other_role_clears_old_one() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "roles/10", &role(10, &[1]));
        mock.respond(Method::Delete, "roles/10/permission/1", 200, "");
        mock.respond_json(Method::Get, "roles/11", &role(11, &[]));
        mock.respond_json(Method::Get, "roles/11", &role(11, &[1]));
        mock.respond(Method::Post, "roles/11/permission/1", 200, "");

        let applied = GfwRolePermissions::new(client)
            .update("10", &config(10, &[1]), &config(11, &[1]))
            .unwrap();
        assert_eq!(applied.id, "11");
        assert_eq!(mock.count(Method::Delete, "roles/10/permission/1"), 1);
        assert_eq!(mock.count(Method::Post, "roles/11/permission/1"), 1);
    }

    #[test]
    fn test_delete_detaches_everything() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "roles/10", &role(10, &[1, 2]));
        mock.respond(Method::Delete, "roles/10/permission/1", 204, "");
        mock.respond(Method::Delete, "roles/10/permission/2", 204, "");

        GfwRolePermissions::new(client)
            .delete("10", &config(10, &[1, 2]))
            .unwrap();
        assert_eq!(mock.count_method(Method::Delete), 2);
    }

    #[test]
    fn test_delete_of_missing_role_succeeds() {
        let (client, mock) = mock_client();
        mock.respond_not_found(Method::Get, "roles/10");
        GfwRolePermissions::new(client)
            .delete("10", &config(10, &[1]))
            .unwrap();
    }
}
