//! Dataview endpoints.
//!
//! Dataviews are addressed by integer id, but `GET dataviews/{slug}` also
//! resolves, which is how existence is checked.

use super::DATAVIEWS;
use crate::error::Result;
use crate::transport::Method;
use crate::types::{Dataview, DataviewPatch, NewDataview};
use crate::{Client, encode, optional};

impl Client {
    /// List every dataview.
    pub fn list_dataviews(&self) -> Result<Vec<Dataview>> {
        self.list(DATAVIEWS, &[])
    }

    /// Get a dataview by id.
    pub fn get_dataview(&self, id: i64) -> Result<Dataview> {
        self.fetch(&self.request(Method::Get, format!("{DATAVIEWS}/{id}")))
    }

    /// Get a dataview by slug, mapping not-found to `None`.
    pub fn find_dataview(&self, slug: &str) -> Result<Option<Dataview>> {
        optional(self.fetch(&self.request(Method::Get, format!("{DATAVIEWS}/{slug}"))))
    }

    /// Create a dataview.
    pub fn create_dataview(&self, dataview: &NewDataview) -> Result<Dataview> {
        let request = self
            .request(Method::Post, DATAVIEWS)
            .body(encode(dataview)?);
        self.fetch(&request)
    }

    /// Apply a partial update.
    pub fn update_dataview(&self, id: i64, patch: &DataviewPatch) -> Result<()> {
        let request = self
            .request(Method::Patch, format!("{DATAVIEWS}/{id}"))
            .body(encode(patch)?);
        self.discard(&request)
    }

    /// Delete a dataview.
    pub fn delete_dataview(&self, id: i64) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{DATAVIEWS}/{id}")))
    }
}
