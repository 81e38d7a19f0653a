//! `gfw_dataview` resource
//!
//! Created and looked up by slug, addressed afterwards by the numeric id
//! the server assigns. Updates are partial.

use anyhow::{Context, Result};
use declarative::{Applied, Diagnostic, Resource};
use gfwapi::Client;
use log::{debug, warn};
use std::sync::Arc;

use super::{adopted_drift, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::dataview::DataviewConfig;
use crate::schema::de::parse_id;

const COMPUTED: &[&str] = &["created_at", "updated_at"];

pub struct GfwDataview {
    client: Arc<Client>,
}

impl GfwDataview {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwDataview {
    type Config = DataviewConfig;

    fn type_name(&self) -> &'static str {
        "gfw_dataview"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        COMPUTED
    }

    fn validate(&self, config: &DataviewConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &DataviewConfig) -> Result<Applied<DataviewConfig>> {
        let new = config.to_domain()?;
        let ensured = ensure_exists(
            "dataview",
            &new.slug,
            || self.client.find_dataview(&new.slug),
            || self.client.create_dataview(&new),
        )
        .with_context(|| format!("failed to create dataview '{}'", new.slug))?;

        let existing = ensured.is_existing();
        let applied = self.read(&ensured.into_inner().id.to_string())?;
        let drift = existing
            .then(|| adopted_drift("dataview", &new.slug, &applied.config, config, COMPUTED))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<DataviewConfig>> {
        let dataview = self
            .client
            .get_dataview(parse_id(id)?)
            .with_context(|| format!("failed to read dataview {id}"))?;
        Ok(Applied::new(id, DataviewConfig::to_config(dataview)))
    }

    fn update(
        &self,
        id: &str,
        prior: &DataviewConfig,
        desired: &DataviewConfig,
    ) -> Result<Applied<DataviewConfig>> {
        let patch = DataviewConfig::to_patch(prior, desired)?;
        if patch.is_empty() {
            debug!("dataview {id}: nothing to patch");
        } else {
            self.client
                .update_dataview(parse_id(id)?, &patch)
                .with_context(|| format!("failed to update dataview {id}"))?;
        }

        let slug_warning = (prior.slug != desired.slug).then(|| {
            warn!("dataview {id}: slug is fixed after creation, keeping '{}'", prior.slug);
            Diagnostic::warning(
                format!("dataview slug cannot change from '{}'", prior.slug),
                format!(
                    "'{}' was not applied; replace the dataview to use a new slug",
                    desired.slug
                ),
            )
        });
        Ok(with_warning(self.read(id)?, slug_warning))
    }

    fn delete(&self, id: &str, _prior: &DataviewConfig) -> Result<()> {
        self.client
            .delete_dataview(parse_id(id)?)
            .with_context(|| format!("failed to delete dataview {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::mock_client;
    use gfwapi::Method;
    use serde_json::json;

    fn effort() -> DataviewConfig {
        serde_json::from_value(json!({
            "slug": "fishing-effort",
            "name": "Fishing effort",
            "description": "Apparent fishing",
            "category": "activity",
            "config": [{"type": "HEATMAP_ANIMATED", "color": "#00FFBC"}]
        }))
        .unwrap()
    }

    fn stored(config: &DataviewConfig) -> serde_json::Value {
        let mut value = serde_json::to_value(config.to_domain().unwrap()).unwrap();
        value["id"] = json!(17);
        value["createdAt"] = json!("2024-01-01T00:00:00Z");
        value
    }

    #[test]
    fn test_create_by_slug() {
        let (client, mock) = mock_client();
        mock.respond_not_found(Method::Get, "dataviews/fishing-effort");
        mock.respond_json(Method::Post, "dataviews", &stored(&effort()));
        mock.respond_json(Method::Get, "dataviews/17", &stored(&effort()));

        let applied = GfwDataview::new(client).create(&effort()).unwrap();
        assert_eq!(applied.id, "17");
        assert_eq!(applied.config.slug, "fishing-effort");
        assert_eq!(applied.config.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(mock.count(Method::Post, "dataviews"), 1);
    }

    #[test]
    fn test_update_patches_changed_fields() {
        let (client, mock) = mock_client();
        let mut desired = effort();
        desired.name = "Apparent fishing effort".into();
        mock.respond(Method::Patch, "dataviews/17", 200, "");
        mock.respond_json(Method::Get, "dataviews/17", &stored(&desired));

        let applied = GfwDataview::new(client)
            .update("17", &effort(), &desired)
            .unwrap();
        assert_eq!(applied.config.name, "Apparent fishing effort");
        assert!(applied.diagnostics.is_empty());

        let patch = mock
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Patch)
            .unwrap();
        let body: serde_json::Value =
            serde_json::from_slice(patch.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Apparent fishing effort"}));
    }

    #[test]
    fn test_slug_change_warns_without_patch() {
        let (client, mock) = mock_client();
        mock.respond_json(Method::Get, "dataviews/17", &stored(&effort()));
        let mut desired = effort();
        desired.slug = "effort".into();

        let applied = GfwDataview::new(client)
            .update("17", &effort(), &desired)
            .unwrap();
        assert_eq!(applied.config.slug, "fishing-effort");
        assert_eq!(applied.diagnostics.len(), 1);
        assert_eq!(mock.count_method(Method::Patch), 0);
    }

    #[test]
    fn test_delete_not_found_is_error() {
        let (client, mock) = mock_client();
        mock.respond_not_found(Method::Delete, "dataviews/17");
        let err = GfwDataview::new(client).delete("17", &effort()).unwrap_err();
        assert!(err.downcast_ref::<gfwapi::Error>().unwrap().is_not_found());
    }
}
