//! `gfw_user_group` resource

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use std::sync::Arc;

use super::{CREATED_AT, adopted_drift, not_persisted, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::access::UserGroupConfig;
use crate::schema::de::parse_id;

/// A group of users, keyed by name; roles are attached by `gfw_user_group_roles`
pub struct GfwUserGroup {
    client: Arc<Client>,
}

impl GfwUserGroup {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwUserGroup {
    type Config = UserGroupConfig;

    fn type_name(&self) -> &'static str {
        "gfw_user_group"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        CREATED_AT
    }

    fn validate(&self, config: &UserGroupConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &UserGroupConfig) -> Result<Applied<UserGroupConfig>> {
        let new = config.to_domain()?;
        let ensured = ensure_exists(
            "user group",
            &new.name,
            || self.client.find_user_group(&new.name),
            || self.client.create_user_group(&new),
        )
        .with_context(|| format!("failed to create user group '{}'", new.name))?;

        let existing = ensured.is_existing();
        let applied = self.read(&ensured.into_inner().id.to_string())?;
        let drift = existing
            .then(|| adopted_drift("user group", &new.name, &applied.config, config, CREATED_AT))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<UserGroupConfig>> {
        let group = self
            .client
            .get_user_group(parse_id(id)?)
            .with_context(|| format!("failed to read user group {id}"))?;
        Ok(Applied::new(id, UserGroupConfig::to_config(&group)))
    }

    fn update(
        &self,
        id: &str,
        prior: &UserGroupConfig,
        desired: &UserGroupConfig,
    ) -> Result<Applied<UserGroupConfig>> {
        let warning = not_persisted(self.type_name(), prior, desired, CREATED_AT);
        Ok(with_warning(self.read(id)?, warning))
    }

    fn delete(&self, id: &str, _prior: &UserGroupConfig) -> Result<()> {
        self.client
            .delete_user_group(parse_id(id)?)
            .with_context(|| format!("failed to delete user group {id}"))
    }
}
