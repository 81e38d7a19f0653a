//! Diff computation: membership sets and attribute trees

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Difference between a current and a desired membership set
///
/// Both sides are treated as sets; duplicates and ordering are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipDiff<T: Ord> {
    /// Desired members that are not current
    pub to_add: BTreeSet<T>,
    /// Current members that are not desired
    pub to_remove: BTreeSet<T>,
}

impl<T: Ord + Clone> MembershipDiff<T> {
    /// Compute `desired - current` and `current - desired`
    pub fn compute(current: &[T], desired: &[T]) -> Self {
        let current: BTreeSet<T> = current.iter().cloned().collect();
        let desired: BTreeSet<T> = desired.iter().cloned().collect();
        Self {
            to_add: desired.difference(&current).cloned().collect(),
            to_remove: current.difference(&desired).cloned().collect(),
        }
    }

    /// Check if the sets already match
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Total number of membership calls needed
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// One top-level attribute that differs between two configurations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Attribute name
    pub field: String,
    /// Prior value (`Null` when absent)
    pub from: Value,
    /// Desired value (`Null` when absent)
    pub to: Value,
}

/// Compare two attribute trees key by key
///
/// Keys listed in `computed` are server-assigned and never compared.
/// Non-object values compare as a whole under the empty field name.
pub fn changed_fields(prior: &Value, desired: &Value, computed: &[&str]) -> Vec<FieldChange> {
    let (Value::Object(prior_map), Value::Object(desired_map)) = (prior, desired) else {
        if prior == desired {
            return Vec::new();
        }
        return vec![FieldChange {
            field: String::new(),
            from: prior.clone(),
            to: desired.clone(),
        }];
    };

    let keys: BTreeSet<&String> = prior_map.keys().chain(desired_map.keys()).collect();
    keys.into_iter()
        .filter(|key| !computed.contains(&key.as_str()))
        .filter_map(|key| {
            let from = prior_map.get(key).unwrap_or(&Value::Null);
            let to = desired_map.get(key).unwrap_or(&Value::Null);
            if from == to || (is_unset(from) && is_unset(to)) {
                return None;
            }
            Some(FieldChange {
                field: key.clone(),
                from: from.clone(),
                to: to.clone(),
            })
        })
        .collect()
}

/// Null, empty string and empty list all mean "not set"
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_membership_convergence() {
        let diff = MembershipDiff::compute(&[1, 2, 3], &[2, 3, 4]);
        assert_eq!(diff.to_add.into_iter().collect::<Vec<_>>(), vec![4]);
        assert_eq!(diff.to_remove.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_membership_ignores_duplicates_and_order() {
        let diff = MembershipDiff::compute(&[3, 1, 1, 2], &[2, 1, 3, 3]);
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
    }

    #[test]
    fn test_membership_from_empty() {
        let diff = MembershipDiff::compute(&[], &[5, 6]);
        assert_eq!(diff.len(), 2);
        assert!(diff.to_remove.is_empty());

        let diff = MembershipDiff::<i64>::compute(&[5, 6], &[]);
        assert_eq!(diff.to_remove.len(), 2);
    }

    #[test]
    fn test_changed_fields_detects_changes() {
        let prior = json!({"name": "a", "description": "x", "created_at": "t1"});
        let desired = json!({"name": "b", "description": "x", "created_at": null});
        let changes = changed_fields(&prior, &desired, &["created_at"]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "name");
        assert_eq!(changes[0].from, json!("a"));
        assert_eq!(changes[0].to, json!("b"));
    }

    #[test]
    fn test_changed_fields_unset_equivalence() {
        let prior = json!({"alias": [], "unit": null});
        let desired = json!({"alias": null, "unit": ""});
        assert!(changed_fields(&prior, &desired, &[]).is_empty());
    }

    #[test]
    fn test_changed_fields_missing_key() {
        let prior = json!({"name": "a", "category": "context"});
        let desired = json!({"name": "a"});
        let changes = changed_fields(&prior, &desired, &[]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to, Value::Null);
    }
}
