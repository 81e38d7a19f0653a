//! Idempotent create and membership reconciliation
//!
//! Two patterns keep repeated runs from duplicating remote state:
//!
//! - [`ensure_exists`] looks an entity up by its natural key before
//!   creating it, and adopts what it finds without changing it
//! - [`reconcile_membership`] makes an owner's member set equal to the
//!   desired set with one add or remove call per differing member
//!
//! Neither is transactional. A failure part way through leaves the remote
//! state partially converged; running again computes a fresh diff and
//! applies only what is still missing.

use declarative::MembershipDiff;
use gfwapi::{Client, Result};
use log::{debug, info};

/// Outcome of an existence-checked create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured<T> {
    /// An entity with the same natural key was already present
    Existing(T),
    /// The entity was created
    Created(T),
}

impl<T> Ensured<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Existing(value) | Self::Created(value) => value,
        }
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, Self::Existing(_))
    }
}

/// Create an entity unless one with the same natural key exists
///
/// `find` must return `Ok(None)` for an absent entity; any error it returns
/// aborts before `create` runs.
pub fn ensure_exists<T>(
    kind: &str,
    key: &str,
    find: impl FnOnce() -> Result<Option<T>>,
    create: impl FnOnce() -> Result<T>,
) -> Result<Ensured<T>> {
    if let Some(existing) = find()? {
        info!("{kind} '{key}' already exists, adopting it");
        return Ok(Ensured::Existing(existing));
    }
    debug!("{kind} '{key}' not found, creating it");
    create().map(Ensured::Created)
}

/// A many-to-many association whose member set belongs to one owner
pub trait Membership {
    /// Owner kind, for log messages
    fn owner(&self) -> &'static str;

    /// Member kind, for log messages
    fn member(&self) -> &'static str;

    /// Current member ids of an owner
    fn current(&self, client: &Client, owner: i64) -> Result<Vec<i64>>;

    fn add(&self, client: &Client, owner: i64, member: i64) -> Result<()>;

    fn remove(&self, client: &Client, owner: i64, member: i64) -> Result<()>;
}

/// Permissions granted to a role
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePermissions;

impl Membership for RolePermissions {
    fn owner(&self) -> &'static str {
        "role"
    }

    fn member(&self) -> &'static str {
        "permission"
    }

    fn current(&self, client: &Client, owner: i64) -> Result<Vec<i64>> {
        Ok(client.get_role(owner)?.permission_ids())
    }

    fn add(&self, client: &Client, owner: i64, member: i64) -> Result<()> {
        client.add_role_permission(owner, member)
    }

    fn remove(&self, client: &Client, owner: i64, member: i64) -> Result<()> {
        client.remove_role_permission(owner, member)
    }
}

/// Roles granted to a user group
#[derive(Debug, Clone, Copy, Default)]
pub struct UserGroupRoles;

impl Membership for UserGroupRoles {
    fn owner(&self) -> &'static str {
        "user group"
    }

    fn member(&self) -> &'static str {
        "role"
    }

    fn current(&self, client: &Client, owner: i64) -> Result<Vec<i64>> {
        Ok(client.get_user_group(owner)?.role_ids())
    }

    fn add(&self, client: &Client, owner: i64, member: i64) -> Result<()> {
        client.add_user_group_role(owner, member)
    }

    fn remove(&self, client: &Client, owner: i64, member: i64) -> Result<()> {
        client.remove_user_group_role(owner, member)
    }
}

/// Converge an owner's member set to `desired`
///
/// Fetches the current members, adds every missing one, then removes every
/// extra one. The first failing call aborts the rest and is returned.
/// Returns the diff that was applied.
pub fn reconcile_membership<M: Membership>(
    client: &Client,
    membership: &M,
    owner: i64,
    desired: &[i64],
) -> Result<MembershipDiff<i64>> {
    let current = membership.current(client, owner)?;
    let diff = MembershipDiff::compute(&current, desired);

    if diff.is_empty() {
        debug!(
            "{} {owner}: {} set already converged",
            membership.owner(),
            membership.member()
        );
        return Ok(diff);
    }

    info!(
        "{} {owner}: adding {}s {:?}, removing {:?}",
        membership.owner(),
        membership.member(),
        diff.to_add,
        diff.to_remove
    );

    for &member in &diff.to_add {
        membership.add(client, owner, member)?;
    }
    for &member in &diff.to_remove {
        membership.remove(client, owner, member)?;
    }

    Ok(diff)
}
