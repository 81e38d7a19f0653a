//! Typed endpoints, one module per collection.
//!
//! Each module adds methods to [`Client`](crate::Client). Create methods
//! POST unconditionally; idempotent create-if-absent is built on top of the
//! `find_*` lookups by the caller.

pub mod access;
pub mod datasets;
pub mod dataviews;
pub mod workspaces;

/// Collection path for actions.
pub const ACTIONS: &str = "actions";
/// Collection path for permission resources.
pub const RESOURCES: &str = "resources";
/// Collection path for permissions.
pub const PERMISSIONS: &str = "permissions";
/// Collection path for roles.
pub const ROLES: &str = "roles";
/// Collection path for user groups.
pub const USER_GROUPS: &str = "user-groups";
/// Collection path for datasets.
pub const DATASETS: &str = "datasets";
/// Collection path for dataviews.
pub const DATAVIEWS: &str = "dataviews";
/// Collection path for workspaces.
pub const WORKSPACES: &str = "workspaces";
