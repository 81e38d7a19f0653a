//! `gfw_dataset` resource
//!
//! The dataset id is chosen by the caller and is the identity. Updates
//! replace the whole document with a PUT.

use anyhow::{Context, Result, bail};
use declarative::{Applied, Resource};
use gfwapi::Client;
use std::sync::Arc;

use super::{CREATED_AT, adopted_drift, with_warning};
use crate::reconcile::ensure_exists;
use crate::schema::dataset::DatasetConfig;

pub struct GfwDataset {
    client: Arc<Client>,
}

impl GfwDataset {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for GfwDataset {
    type Config = DatasetConfig;

    fn type_name(&self) -> &'static str {
        "gfw_dataset"
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        CREATED_AT
    }

    fn validate(&self, config: &DatasetConfig) -> Result<()> {
        config.to_domain()?;
        Ok(())
    }

    fn create(&self, config: &DatasetConfig) -> Result<Applied<DatasetConfig>> {
        let new = config.to_domain()?;
        let ensured = ensure_exists(
            "dataset",
            &new.id,
            || self.client.find_dataset(&new.id),
            || self.client.create_dataset(&new),
        )
        .with_context(|| format!("failed to create dataset '{}'", new.id))?;

        let applied = self.read(&new.id)?;
        let drift = ensured
            .is_existing()
            .then(|| adopted_drift("dataset", &new.id, &applied.config, config, CREATED_AT))
            .flatten();
        Ok(with_warning(applied, drift))
    }

    fn read(&self, id: &str) -> Result<Applied<DatasetConfig>> {
        let dataset = self
            .client
            .get_dataset(id)
            .with_context(|| format!("failed to read dataset '{id}'"))?;
        Ok(Applied::new(id, DatasetConfig::to_config(dataset)))
    }

    fn update(
        &self,
        id: &str,
        _prior: &DatasetConfig,
        desired: &DatasetConfig,
    ) -> Result<Applied<DatasetConfig>> {
        if desired.dataset_id != id {
            bail!(
                "dataset id cannot change from '{id}' to '{}'; replace the dataset instead",
                desired.dataset_id
            );
        }
        let new = desired.to_domain()?;
        self.client
            .update_dataset(id, &new)
            .with_context(|| format!("failed to update dataset '{id}'"))?;
        self.read(id)
    }

    fn delete(&self, id: &str, _prior: &DatasetConfig) -> Result<()> {
        self.client
            .delete_dataset(id)
            .with_context(|| format!("failed to delete dataset '{id}'"))
    }
}
