//! Flat configuration schema for every resource type
//!
//! Each submodule defines the flat attribute tree accepted in a manifest and
//! recorded in state, plus the translation to and from the wire model:
//!
//! - `to_domain` builds the write model, validating enumerated values and
//!   date formats before any request is made
//! - `to_config` flattens a read model back into the attribute tree
//! - `to_patch` (dataview, workspace) builds a partial update carrying only
//!   the attributes that changed
//!
//! Nested single-item blocks are lists holding at most one element; JSON
//! blobs are carried as text and parsed at translation time.

pub mod access;
pub mod dataset;
pub mod dataview;
pub mod de;
pub mod enums;
pub mod json;
pub mod validate;
pub mod workspace;

use gfwapi::{Error, Result};

/// Unwrap a single-item block, rejecting more than one element
pub fn single<T>(field: &str, items: Vec<T>) -> Result<Option<T>> {
    if items.len() > 1 {
        return Err(Error::validation(
            field,
            format!("at most one block allowed, found {}", items.len()),
        ));
    }
    Ok(items.into_iter().next())
}

/// Wrap an optional nested object as a single-item block
pub fn block<T>(item: Option<T>) -> Vec<T> {
    item.into_iter().collect()
}

/// `Some(value)` when it differs from the prior value
pub fn changed<T: PartialEq + Clone>(prior: &T, desired: &T) -> Option<T> {
    (prior != desired).then(|| desired.clone())
}
