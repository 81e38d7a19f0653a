//! `gfw_user_group_roles` resource
//!
//! Owns the complete role set of one user group.

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use log::{debug, info};
use std::sync::Arc;

use crate::reconcile::{UserGroupRoles, reconcile_membership};
use crate::schema::access::UserGroupRolesConfig;
use crate::schema::de::parse_id;

pub struct GfwUserGroupRoles {
    client: Arc<Client>,
}

impl GfwUserGroupRoles {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn converge(&self, group: i64, roles: &[i64]) -> Result<()> {
        reconcile_membership(&self.client, &UserGroupRoles, group, roles)
            .with_context(|| format!("failed to reconcile roles of user group {group}"))?;
        Ok(())
    }
}

impl Resource for GfwUserGroupRoles {
    type Config = UserGroupRolesConfig;

    fn type_name(&self) -> &'static str {
        "gfw_user_group_roles"
    }

    fn create(&self, config: &UserGroupRolesConfig) -> Result<Applied<UserGroupRolesConfig>> {
        self.converge(config.user_group, &config.roles)?;
        self.read(&config.user_group.to_string())
    }

    fn read(&self, id: &str) -> Result<Applied<UserGroupRolesConfig>> {
        let group = self
            .client
            .get_user_group(parse_id(id)?)
            .with_context(|| format!("failed to read user group {id}"))?;
        Ok(Applied::new(id, UserGroupRolesConfig::to_config(&group)))
    }

    fn update(
        &self,
        _id: &str,
        prior: &UserGroupRolesConfig,
        desired: &UserGroupRolesConfig,
    ) -> Result<Applied<UserGroupRolesConfig>> {
        if prior.user_group != desired.user_group {
            info!(
                "role set moved from user group {} to user group {}",
                prior.user_group, desired.user_group
            );
            self.converge(prior.user_group, &[])?;
        }
        self.create(desired)
    }

    fn delete(&self, id: &str, _prior: &UserGroupRolesConfig) -> Result<()> {
        let group = parse_id(id)?;
        match reconcile_membership(&self.client, &UserGroupRoles, group, &[]) {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                debug!("user group {group} is gone, nothing to detach");
                Ok(())
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to detach roles of user group {group}"))
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

    fn group(roles: &[i64]) -> serde_json::Value {
        let roles: Vec<_> = roles.iter().map(|r| json!({"id": r, "name": "r"})).collect();
        json!({"id": 5, "name": "researchers", "roles": roles})
    }

    #[test]
    fn test_create_adds_missing_roles() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "user-groups/5", &group(&[]));
        mock.respond_json(Method::Get, "user-groups/5", &group(&[10, 20]));
        mock.respond(Method::Post, "user-groups/5/role/10", 200, "");
        mock.respond(Method::Post, "user-groups/5/role/20", 200, "");

        let config = UserGroupRolesConfig {
            user_group: 5,
            roles: vec![10, 20],
        };
        let applied = GfwUserGroupRoles::new(client).create(&config).unwrap();
        assert_eq!(applied.config, config);
        assert_eq!(mock.count_method(Method::Post), 2);
        assert_eq!(mock.count_method(Method::Delete), 0);
    }

    #[test]
    fn test_removal_failure_surfaces() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "user-groups/5", &group(&[10]));
        mock.respond(
            Method::Delete,
            "user-groups/5/role/10",
            403,
            r#"{"statusCode": 403, "message": "forbidden"}"#,
        );

        let config = UserGroupRolesConfig {
            user_group: 5,
            roles: vec![10],
        };
        let err = GfwUserGroupRoles::new(client)
            .delete("5", &config)
            .unwrap_err();
        assert!(format!("{err:#}").contains("user group 5"));
    }
}
