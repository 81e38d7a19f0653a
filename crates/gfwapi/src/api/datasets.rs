//! Dataset endpoints.
//!
//! Dataset requests ask for the backend configuration so the variant
//! configuration is present in responses.

use super::DATASETS;
use crate::error::Result;
use crate::transport::{Method, Request};
use crate::types::{Dataset, NewDataset};
use crate::{Client, encode, optional};

const INCLUDE_KEY: &str = "includes[0]";
const INCLUDE_VALUE: &str = "BACKEND_CONFIGURATION";

impl Client {
    fn dataset_request(&self, method: Method, path: impl Into<String>) -> Request {
        self.request(method, path).query(INCLUDE_KEY, INCLUDE_VALUE)
    }

    /// List every dataset.
    pub fn list_datasets(&self) -> Result<Vec<Dataset>> {
        self.list(DATASETS, &[(INCLUDE_KEY, INCLUDE_VALUE)])
    }

    /// Get a dataset by id.
    pub fn get_dataset(&self, id: &str) -> Result<Dataset> {
        self.fetch(&self.dataset_request(Method::Get, format!("{DATASETS}/{id}")))
    }

    /// Get a dataset by id, mapping not-found to `None`.
    pub fn find_dataset(&self, id: &str) -> Result<Option<Dataset>> {
        optional(self.get_dataset(id))
    }

    /// Create a dataset.
    pub fn create_dataset(&self, dataset: &NewDataset) -> Result<Dataset> {
        let request = self
            .request(Method::Post, DATASETS)
            .body(encode(dataset)?);
        self.fetch(&request)
    }

    /// Replace a dataset.
    pub fn update_dataset(&self, id: &str, dataset: &NewDataset) -> Result<()> {
        let request = self
            .dataset_request(Method::Put, format!("{DATASETS}/{id}"))
            .body(encode(dataset)?);
        self.discard(&request)
    }

    /// Delete a dataset.
    pub fn delete_dataset(&self, id: &str) -> Result<()> {
        self.discard(&self.dataset_request(Method::Delete, format!("{DATASETS}/{id}")))
    }
}
