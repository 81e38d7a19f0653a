//! Workspace endpoints.

use super::WORKSPACES;
use crate::error::Result;
use crate::transport::Method;
use crate::types::{NewWorkspace, Workspace, WorkspacePatch};
use crate::{Client, encode, optional};

impl Client {
    /// List every workspace.
    pub fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.list(WORKSPACES, &[])
    }

    /// Get a workspace by id.
    pub fn get_workspace(&self, id: &str) -> Result<Workspace> {
        self.fetch(&self.request(Method::Get, format!("{WORKSPACES}/{id}")))
    }

    /// Get a workspace by id, mapping not-found to `None`.
    pub fn find_workspace(&self, id: &str) -> Result<Option<Workspace>> {
        optional(self.get_workspace(id))
    }

    /// Create a workspace.
    pub fn create_workspace(&self, workspace: &NewWorkspace) -> Result<Workspace> {
        let request = self
            .request(Method::Post, WORKSPACES)
            .body(encode(workspace)?);
        self.fetch(&request)
    }

    /// Apply a partial update.
    pub fn update_workspace(&self, id: &str, patch: &WorkspacePatch) -> Result<()> {
        let request = self
            .request(Method::Patch, format!("{WORKSPACES}/{id}"))
            .body(encode(patch)?);
        self.discard(&request)
    }

    /// Delete a workspace.
    pub fn delete_workspace(&self, id: &str) -> Result<()> {
        self.discard(&self.request(Method::Delete, format!("{WORKSPACES}/{id}")))
    }
}
