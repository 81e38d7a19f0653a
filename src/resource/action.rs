//! `gfw_action` resource

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use std::sync::Arc;

use super::{CREATED_AT, adopted_drift, not_persisted, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::access::ActionConfig;
use crate::schema::de::parse_id;

/// An action that permissions grant, keyed by name
pub struct GfwAction {
    client: Arc<Client>,
}

impl GfwAction {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwAction {
    type Config = ActionConfig;

    fn type_name(&self) -> &'static str {
        "gfw_action"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        CREATED_AT
    }

    fn validate(&self, config: &ActionConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &ActionConfig) -> Result<Applied<ActionConfig>> {
        let new = config.to_domain()?;
        let ensured = ensure_exists(
            "action",
            &new.name,
            || self.client.find_action(&new.name),
            || self.client.create_action(&new),
        )
        .with_context(|| format!("failed to create action '{}'", new.name))?;

        let existing = ensured.is_existing();
        let applied = self.read(&ensured.into_inner().id.to_string())?;
        let drift = existing
            .then(|| adopted_drift("action", &new.name, &applied.config, config, CREATED_AT))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<ActionConfig>> {
        let action = self
            .client
            .get_action(parse_id(id)?)
            .with_context(|| format!("failed to read action {id}"))?;
        Ok(Applied::new(id, ActionConfig::to_config(&action)))
    }

    fn update(
        &self,
        id: &str,
        prior: &ActionConfig,
        desired: &ActionConfig,
    ) -> Result<Applied<ActionConfig>> {
        let warning = not_persisted(self.type_name(), prior, desired, CREATED_AT);
        Ok(with_warning(self.read(id)?, warning))
    }

    fn delete(&self, id: &str, _prior: &ActionConfig) -> Result<()> {
        self.client
            .delete_action(parse_id(id)?)
            .with_context(|| format!("failed to delete action {id}"))
    }
}
