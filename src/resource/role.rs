//! `gfw_role` resource
//!
//! Only the role's own attributes. Its permission set is managed by
//! `gfw_role_permissions`.

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use std::sync::Arc;

use super::{CREATED_AT, adopted_drift, not_persisted, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::access::RoleConfig;
use crate::schema::de::parse_id;

pub struct GfwRole {
    client: Arc<Client>,
}

impl GfwRole {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwRole {
    type Config = RoleConfig;

    fn type_name(&self) -> &'static str {
        "gfw_role"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        CREATED_AT
    }

    fn validate(&self, config: &RoleConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &RoleConfig) -> Result<Applied<RoleConfig>> {
        let new = config.to_domain()?;
        let ensured = ensure_exists(
            "role",
            &new.name,
            || self.client.find_role(&new.name),
            || self.client.create_role(&new),
        )
        .with_context(|| format!("failed to create role '{}'", new.name))?;

        let existing = ensured.is_existing();
        let applied = self.read(&ensured.into_inner().id.to_string())?;
        let drift = existing
            .then(|| adopted_drift("role", &new.name, &applied.config, config, CREATED_AT))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<RoleConfig>> {
        let role = self
            .client
            .get_role(parse_id(id)?)
            .with_context(|| format!("failed to read role {id}"))?;
        Ok(Applied::new(id, RoleConfig::to_config(&role)))
    }

    fn update(
        &self,
        id: &str,
        prior: &RoleConfig,
        desired: &RoleConfig,
    ) -> Result<Applied<RoleConfig>> {
        let warning = not_persisted(self.type_name(), prior, desired, CREATED_AT);
        Ok(with_warning(self.read(id)?, warning))
    }

    fn delete(&self, id: &str, _prior: &RoleConfig) -> Result<()> {
        self.client
            .delete_role(parse_id(id)?)
            .with_context(|| format!("failed to delete role {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::mock_client;
    use gfwapi::Method;
    use serde_json::json;

    fn analyst() -> RoleConfig {
        RoleConfig {
            name: "analyst".into(),
            description: "Read-only analysis".into(),
            created_at: None,
        }
    }

    #[test]
    fn test_read_ignores_permissions() {
        let (client, mock) = mock_client();
        mock.respond_json(
            Method::Get,
            "roles/10",
            &json!({
                "id": 10,
                "name": "analyst",
                "description": "Read-only analysis",
                "permissions": [{"id": 1}, {"id": 2}]
            }),
        );

        let applied = GfwRole::new(client).read("10").unwrap();
        assert_eq!(applied.config, analyst());
    }

    #[test]
    fn test_create_failure_is_wrapped() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "roles", &json!([]));
        mock.respond(
            Method::Post,
            "roles",
            422,
            r#"{"statusCode": 422, "message": "name taken"}"#,
        );

        let err = GfwRole::new(client).create(&analyst()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create role 'analyst'"));
        assert_eq!(mock.count_method(Method::Get), 1);
    }

    #[test]
    fn test_update_without_changes_is_silent() {
        let (client, mock) = mock_client();
        mock.respond_json(
            Method::Get,
            "roles/10",
            &json!({"id": 10, "name": "analyst", "description": "Read-only analysis"}),
        );
        let applied = GfwRole::new(client)
            .update("10", &analyst(), &analyst())
            .unwrap();
        assert!(applied.diagnostics.is_empty());
    }
}
