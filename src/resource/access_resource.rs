//! `gfw_resource` resource

use anyhow::{Context, Result};
use declarative::{Applied, Resource};
use gfwapi::Client;
use std::sync::Arc;

use super::{CREATED_AT, adopted_drift, not_persisted, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::access::ResourceConfig;
use crate::schema::de::parse_id;

/// A permission target, keyed by type and value
pub struct GfwResource {
    client: Arc<Client>,
}

impl GfwResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwResource {
    type Config = ResourceConfig;

    fn type_name(&self) -> &'static str {
        "gfw_resource"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        CREATED_AT
    }

    fn validate(&self, config: &ResourceConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &ResourceConfig) -> Result<Applied<ResourceConfig>> {
        let new = config.to_domain()?;
        let key = format!("{}:{}", new.resource_type, new.value);
        let ensured = ensure_exists(
            "resource",
            &key,
            || self.client.find_resource(&new.resource_type, &new.value),
            || self.client.create_resource(&new),
        )
        .with_context(|| format!("failed to create resource '{key}'"))?;

        let existing = ensured.is_existing();
        let applied = self.read(&ensured.into_inner().id.to_string())?;
        let drift = existing
            .then(|| adopted_drift("resource", &key, &applied.config, config, CREATED_AT))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<ResourceConfig>> {
        let resource = self
            .client
            .get_resource(parse_id(id)?)
            .with_context(|| format!("failed to read resource {id}"))?;
        Ok(Applied::new(id, ResourceConfig::to_config(&resource)))
    }

    fn update(
        &self,
        id: &str,
        prior: &ResourceConfig,
        desired: &ResourceConfig,
    ) -> Result<Applied<ResourceConfig>> {
        let warning = not_persisted(self.type_name(), prior, desired, CREATED_AT);
        Ok(with_warning(self.read(id)?, warning))
    }

    fn delete(&self, id: &str, _prior: &ResourceConfig) -> Result<()> {
        self.client
            .delete_resource(parse_id(id)?)
            .with_context(|| format!("failed to delete resource {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::mock_client;
    use gfwapi::Method;
    use serde_json::json;

    fn dataset_resource() -> ResourceConfig {
        ResourceConfig {
            resource_type: "dataset".into(),
            value: "public-global-fishing-effort".into(),
            description: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_create_matches_on_type_and_value() {
        let (client, mock) = mock_client();
        mock.respond_json(
            Method::Get,
            "resources",
            &json!([
                {"id": 1, "type": "workspace", "value": "public-global-fishing-effort"},
                {"id": 2, "type": "dataset", "value": "public-global-fishing-effort"}
            ]),
        );
        mock.respond_json(
            Method::Get,
            "resources/2",
            &json!({"id": 2, "type": "dataset", "value": "public-global-fishing-effort"}),
        );

        let applied = GfwResource::new(client).create(&dataset_resource()).unwrap();
        assert_eq!(applied.id, "2");
        assert!(applied.diagnostics.is_empty());
        assert_eq!(mock.count_method(Method::Post), 0);
    }

    #[test]
    fn test_read_missing() {
        let (client, mock) = mock_client();
        mock.respond_not_found(Method::Get, "resources/8");
        let err = GfwResource::new(client).read("8").unwrap_err();
        let api = err.downcast_ref::<gfwapi::Error>().unwrap();
        assert!(api.is_not_found());
    }

    #[test]
    fn test_validate_requires_type() {
        let (client, _) = mock_client();
        let mut config = dataset_resource();
        config.resource_type = String::new();
        assert!(GfwResource::new(client).validate(&config).is_err());
    }
}
