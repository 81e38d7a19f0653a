//! `${type.name.id}` references between manifest resources
//!
//! A string value that is exactly a reference is replaced by the remote
//! identity recorded for the referenced resource. Identities are always
//! substituted as strings.

use crate::state::{Address, State};
use serde_json::Value;

/// Error raised when a reference cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unresolved reference to {0}: resource has no recorded id")]
pub struct UnresolvedReference(pub Address);

/// Parse a reference string, returning the address it points to
pub fn parse_reference(s: &str) -> Option<Address> {
    let inner = s.strip_prefix("${")?.strip_suffix('}')?;
    let (address, attribute) = inner.rsplit_once('.')?;
    if attribute != "id" {
        return None;
    }
    Address::parse(address)
}

/// Collect every address referenced anywhere in a value
pub fn references(value: &Value) -> Vec<Address> {
    let mut found = Vec::new();
    collect(value, &mut found);
    found
}

fn collect(value: &Value, found: &mut Vec<Address>) {
    match value {
        Value::String(s) => {
            if let Some(address) = parse_reference(s)
                && !found.contains(&address)
            {
                found.push(address);
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect(v, found)),
        Value::Object(map) => map.values().for_each(|v| collect(v, found)),
        _ => {}
    }
}

/// Replace every reference with the recorded identity
pub fn resolve(value: &Value, state: &State) -> Result<Value, UnresolvedReference> {
    Ok(match value {
        Value::String(s) => match parse_reference(s) {
            Some(address) => {
                let record = state
                    .get(&address)
                    .ok_or_else(|| UnresolvedReference(address.clone()))?;
                Value::String(record.id.clone())
            }
            None => value.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|v| resolve(v, state))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), resolve(v, state)?)))
                .collect::<Result<_, UnresolvedReference>>()?,
        ),
        other => other.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RecordedResource;
    use serde_json::json;

    fn state() -> State {
        let mut state = State::new();
        state.upsert(RecordedResource {
            address: Address::new("gfw_resource", "fishing"),
            id: "7".to_string(),
            config: json!({}),
        });
        state
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(
            parse_reference("${gfw_role.admin.id}"),
            Some(Address::new("gfw_role", "admin"))
        );
        assert_eq!(parse_reference("${gfw_role.admin.name}"), None);
        assert_eq!(parse_reference("gfw_role.admin.id"), None);
        assert_eq!(parse_reference("prefix ${gfw_role.admin.id}"), None);
    }

    #[test]
    fn test_references_deduplicated() {
        let value = json!({
            "resource_id": "${gfw_resource.fishing.id}",
            "nested": ["${gfw_resource.fishing.id}", "${gfw_action.read.id}"]
        });
        assert_eq!(references(&value).len(), 2);
    }

    #[test]
    fn test_resolve_substitutes_ids() {
        let value = json!({"resource_id": "${gfw_resource.fishing.id}", "name": "p"});
        let resolved = resolve(&value, &state()).unwrap();
        assert_eq!(resolved, json!({"resource_id": "7", "name": "p"}));
    }

    #[test]
    fn test_resolve_missing() {
        let value = json!(["${gfw_action.read.id}"]);
        let err = resolve(&value, &state()).unwrap_err();
        assert_eq!(err.0, Address::new("gfw_action", "read"));
        assert!(err.to_string().contains("gfw_action.read"));
    }
}
