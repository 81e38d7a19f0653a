//! `gfw_workspace` resource
//!
//! The identity is `workspace_id` when set, otherwise derived from the name
//! and the public flag at create time. It never changes afterwards.

use anyhow::{Context, Result};
use declarative::{Applied, Diagnostic, Resource};
use gfwapi::Client;
use log::debug;
use std::sync::Arc;

use super::{adopted_drift, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::workspace::WorkspaceConfig;

const COMPUTED: &[&str] = &["workspace_id", "created_at"];

pub struct GfwWorkspace {
    client: Arc<Client>,
}

impl GfwWorkspace {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwWorkspace {
    type Config = WorkspaceConfig;

    fn type_name(&self) -> &'static str {
        "gfw_workspace"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        COMPUTED
    }

    fn validate(&self, config: &WorkspaceConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &WorkspaceConfig) -> Result<Applied<WorkspaceConfig>> {
        let new = config.to_domain()?;
        let ensured = ensure_exists(
            "workspace",
            &new.id,
            || self.client.find_workspace(&new.id),
            || self.client.create_workspace(&new),
        )
        .with_context(|| format!("failed to create workspace '{}'", new.id))?;

        let applied = self.read(&new.id)?;
        let drift = ensured
            .is_existing()
            .then(|| adopted_drift("workspace", &new.id, &applied.config, config, COMPUTED))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<WorkspaceConfig>> {
        let workspace = self
            .client
            .get_workspace(id)
            .with_context(|| format!("failed to read workspace '{id}'"))?;
        Ok(Applied::new(id, WorkspaceConfig::to_config(workspace)))
    }

    fn update(
        &self,
        id: &str,
        prior: &WorkspaceConfig,
        desired: &WorkspaceConfig,
    ) -> Result<Applied<WorkspaceConfig>> {
        let patch = WorkspaceConfig::to_patch(prior, desired)?;
        if patch.is_empty() {
            debug!("workspace '{id}': nothing to patch");
        } else {
            self.client
                .update_workspace(id, &patch)
                .with_context(|| format!("failed to update workspace '{id}'"))?;
        }

        let id_warning = desired
            .workspace_id
            .as_deref()
            .filter(|wanted| !wanted.is_empty() && *wanted != id)
            .map(|wanted| {
                Diagnostic::warning(
                    format!("workspace id cannot change from '{id}'"),
                    format!("'{wanted}' was not applied; replace the workspace to use a new id"),
                )
            });
        Ok(with_warning(self.read(id)?, id_warning))
    }

    fn delete(&self, id: &str, _prior: &WorkspaceConfig) -> Result<()> {
        self.client
            .delete_workspace(id)
            .with_context(|| format!("failed to delete workspace '{id}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::mock_client;
    use gfwapi::Method;
    use serde_json::json;

    fn ocean() -> WorkspaceConfig {
        serde_json::from_value(json!({
            "name": "Ocean Watch",
            "description": "Regional monitoring",
            "public": true,
            "dataviews": [12]
        }))
        .unwrap()
    }

    fn stored(config: &WorkspaceConfig) -> serde_json::Value {
        let mut value = serde_json::to_value(config.to_domain().unwrap()).unwrap();
        value["createdAt"] = json!("2024-01-01T00:00:00Z");
        value
    }

    #[test]
    fn test_create_uses_derived_id() {
        let (client, mock) = mock_client();
        let path = "workspaces/ocean_watch-public";
        mock.respond_not_found(Method::Get, path);
        mock.respond_json(Method::Get, path, &stored(&ocean()));
        mock.respond_json(Method::Post, "workspaces", &stored(&ocean()));

        let applied = GfwWorkspace::new(client).create(&ocean()).unwrap();
        assert_eq!(applied.id, "ocean_watch-public");
        assert_eq!(
            applied.config.workspace_id.as_deref(),
            Some("ocean_watch-public")
        );
        assert_eq!(applied.config.dataviews, vec![12]);
        assert!(applied.diagnostics.is_empty());
        assert_eq!(mock.count(Method::Post, "workspaces"), 1);
    }

    #[test]
    fn test_create_adopts_existing_without_post() {
        let (client, mock) = mock_client();
        mock.respond_json(
            Method::Get,
            "workspaces/ocean_watch-public",
            &stored(&ocean()),
        );
        let applied = GfwWorkspace::new(client).create(&ocean()).unwrap();
        assert!(applied.diagnostics.is_empty());
        assert_eq!(mock.count_method(Method::Post), 0);
    }

    #[test]
    fn test_update_patches_public_flag_only() {
        let (client, mock) = mock_client();
        let id = "ocean_watch-public";
        let mut prior = ocean();
        prior.workspace_id = Some(id.into());
        let mut desired = ocean();
        desired.public = false;
        let mut after = desired.clone();
        after.workspace_id = Some(id.into());
        mock.respond(Method::Patch, &format!("workspaces/{id}"), 200, "");
        mock.respond_json(Method::Get, &format!("workspaces/{id}"), &stored(&after));

        let applied = GfwWorkspace::new(client)
            .update(id, &prior, &desired)
            .unwrap();
        assert_eq!(applied.id, id);
        assert!(!applied.config.public);
        assert!(applied.diagnostics.is_empty());

        let patch = mock
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Patch)
            .unwrap();
        let body: serde_json::Value =
            serde_json::from_slice(patch.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"public": false}));
    }

    #[test]
    fn test_explicit_id_change_warns() {
        let (client, mock) = mock_client();
        let mut prior = ocean();
        prior.workspace_id = Some("ocean_watch-public".into());
        let mut desired = prior.clone();
        desired.workspace_id = Some("renamed".into());
        mock.respond_json(
            Method::Get,
            "workspaces/ocean_watch-public",
            &stored(&prior),
        );

        let applied = GfwWorkspace::new(client)
            .update("ocean_watch-public", &prior, &desired)
            .unwrap();
        assert_eq!(applied.diagnostics.len(), 1);
        assert_eq!(mock.count_method(Method::Patch), 0);
    }
}
