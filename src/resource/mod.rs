//! Resource façades: one declarative type per API entity
//!
//! Every façade composes the API client with the schema translator and,
//! for the two association types, the membership reconciler:
//!
//! - Create looks the entity up by its natural key first and adopts a
//!   match without changing it
//! - Read fetches by identity and flattens the result
//! - Update writes what the API allows, then reads back
//! - Delete removes by identity; an empty response body is success
//!
//! Actions, resources, permissions, roles and user groups have no update
//! endpoint. Their update is a read that warns about every attribute whose
//! change was not persisted.

pub mod access_resource;
pub mod action;
pub mod dataset;
pub mod dataview;
pub mod permission;
pub mod role;
pub mod role_permissions;
pub mod user_group;
pub mod user_group_roles;
pub mod workspace;

pub use access_resource::GfwResource;
pub use action::GfwAction;
pub use dataset::GfwDataset;
pub use dataview::GfwDataview;
pub use permission::GfwPermission;
pub use role::GfwRole;
pub use role_permissions::GfwRolePermissions;
pub use user_group::GfwUserGroup;
pub use user_group_roles::GfwUserGroupRoles;
pub use workspace::GfwWorkspace;

use declarative::{Applied, Diagnostic, Registry, changed_fields};
use gfwapi::Client;
use serde::Serialize;
use std::sync::Arc;

/// Server-assigned attributes shared by every entity
pub(crate) const CREATED_AT: &[&str] = &["created_at"];

/// Register every resource type against one client
pub fn registry(client: &Arc<Client>) -> Registry {
    let mut registry = Registry::new();
    registry.register(GfwAction::new(Arc::clone(client)));
    registry.register(GfwResource::new(Arc::clone(client)));
    registry.register(GfwPermission::new(Arc::clone(client)));
    registry.register(GfwRole::new(Arc::clone(client)));
    registry.register(GfwUserGroup::new(Arc::clone(client)));
    registry.register(GfwRolePermissions::new(Arc::clone(client)));
    registry.register(GfwUserGroupRoles::new(Arc::clone(client)));
    registry.register(GfwDataset::new(Arc::clone(client)));
    registry.register(GfwDataview::new(Arc::clone(client)));
    registry.register(GfwWorkspace::new(Arc::clone(client)));
    registry
}

/// Attach a warning when there is one
pub(crate) fn with_warning<C>(applied: Applied<C>, warning: Option<Diagnostic>) -> Applied<C> {
    match warning {
        Some(warning) => applied.with_diagnostic(warning),
        None => applied,
    }
}

/// Top-level attributes that differ between two configurations
pub(crate) fn differing<C: Serialize>(actual: &C, desired: &C, computed: &[&str]) -> Vec<String> {
    match (serde_json::to_value(actual), serde_json::to_value(desired)) {
        (Ok(actual), Ok(desired)) => changed_fields(&actual, &desired, computed)
            .into_iter()
            .map(|change| change.field)
            .collect(),
        _ => Vec::new(),
    }
}

/// Warning for an update the API has no endpoint for
pub(crate) fn not_persisted<C: Serialize>(
    type_name: &str,
    prior: &C,
    desired: &C,
    computed: &[&str],
) -> Option<Diagnostic> {
    let fields = differing(prior, desired, computed);
    if fields.is_empty() {
        return None;
    }
    log::warn!("{type_name}: no update endpoint, {} not persisted", fields.join(", "));
    Some(Diagnostic::warning(
        format!(
            "{type_name} cannot be updated; changes to {} were not persisted",
            fields.join(", ")
        ),
        "Remove the resource from the manifest and apply, then add it back to recreate it",
    ))
}

/// Warning for an adopted entity that differs from its configuration
pub(crate) fn adopted_drift<C: Serialize>(
    type_name: &str,
    key: &str,
    actual: &C,
    desired: &C,
    computed: &[&str],
) -> Option<Diagnostic> {
    let fields = differing(actual, desired, computed);
    if fields.is_empty() {
        return None;
    }
    Some(Diagnostic::warning(
        format!("adopted existing {type_name} '{key}'"),
        format!(
            "its {} differ from the configuration and were left unchanged",
            fields.join(", ")
        ),
    ))
}
