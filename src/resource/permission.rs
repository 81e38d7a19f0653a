//! `gfw_permission` resource

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use std::sync::Arc;

use super::{CREATED_AT, adopted_drift, not_persisted, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::access::PermissionConfig;
use crate::schema::de::parse_id;

/// A resource/action binding, keyed by the pair
pub struct GfwPermission {
    client: Arc<Client>,
}

impl GfwPermission {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwPermission {
    type Config = PermissionConfig;

    fn type_name(&self) -> &'static str {
        "gfw_permission"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        CREATED_AT
    }

    fn validate(&self, config: &PermissionConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &PermissionConfig) -> Result<Applied<PermissionConfig>> {
        let new = config.to_domain()?;
        let key = format!("resource {} / action {}", new.resource_id, new.action_id);
        let ensured = ensure_exists(
            "permission",
            &key,
            || self.client.find_permission(new.resource_id, new.action_id),
            || self.client.create_permission(&new),
        )
        .with_context(|| format!("failed to create permission '{}'", new.name))?;

        let existing = ensured.is_existing();
        let applied = self.read(&ensured.into_inner().id.to_string())?;
        let drift = existing
            .then(|| adopted_drift("permission", &key, &applied.config, config, CREATED_AT))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<PermissionConfig>> {
        let permission = self
            .client
            .get_permission(parse_id(id)?)
            .with_context(|| format!("failed to read permission {id}"))?;
        Ok(Applied::new(id, PermissionConfig::to_config(&permission)))
    }

    fn update(
        &self,
        id: &str,
        prior: &PermissionConfig,
        desired: &PermissionConfig,
    ) -> Result<Applied<PermissionConfig>> {
        let warning = not_persisted(self.type_name(), prior, desired, CREATED_AT);
        Ok(with_warning(self.read(id)?, warning))
    }

    fn delete(&self, id: &str, _prior: &PermissionConfig) -> Result<()> {
        self.client
            .delete_permission(parse_id(id)?)
            .with_context(|| format!("failed to delete permission {id}"))
    }
}
