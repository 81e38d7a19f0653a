//! List response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Number of entries requested per page.
pub const PAGE_SIZE: u32 = 100;

/// One page of a paginated collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Total entries in the collection, when reported.
    #[serde(default)]
    pub total: Option<u64>,
    /// Page size echoed by the server.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Offset of this page.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Offset of the next page; absent or null on the last page.
    #[serde(default)]
    pub next_offset: Option<u64>,
    /// Opaque server metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// Entries on this page.
    #[serde(default = "Vec::new", deserialize_with = "super::null_default")]
    pub entries: Vec<T>,
}

/// A list response: either a bare array or a [`Page`] envelope.
///
/// The shape is chosen from the top-level JSON value, so a malformed entry
/// reports its own decode error.
#[derive(Debug, Clone)]
pub enum Paginated<T> {
    /// Unpaginated array of entries.
    Bare(Vec<T>),
    /// Paginated envelope.
    Page(Page<T>),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Paginated<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = if value.is_array() {
            serde_json::from_value(value).map(Self::Bare)
        } else {
            serde_json::from_value(value).map(Self::Page)
        };
        parsed.map_err(de::Error::custom)
    }
}

impl<T> Paginated<T> {
    /// Split into this page's entries and the offset of the next page.
    pub fn into_parts(self) -> (Vec<T>, Option<u64>) {
        match self {
            Self::Bare(entries) => (entries, None),
            Self::Page(page) => (page.entries, page.next_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;

    #[test]
    fn test_bare_array() {
        let parsed: Paginated<i64> = serde_json::from_str("[1,2,3]").unwrap();
        let (entries, next) = parsed.into_parts();
        assert_eq!(entries, vec![1, 2, 3]);
        assert_eq!(next, None);
    }

    #[test]
    fn test_envelope_with_next_offset() {
        let body = r#"{"total":5,"limit":2,"offset":0,"nextOffset":2,"metadata":{},"entries":[1,2]}"#;
        let parsed: Paginated<i64> = serde_json::from_str(body).unwrap();
        let (entries, next) = parsed.into_parts();
        assert_eq!(entries, vec![1, 2]);
        assert_eq!(next, Some(2));
    }

    #[test]
    fn test_envelope_last_page() {
        let body = r#"{"total":2,"limit":2,"offset":0,"nextOffset":null,"entries":[1,2]}"#;
        let parsed: Paginated<i64> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_parts().1, None);
    }

    #[test]
    fn test_envelope_null_entries() {
        let parsed: Paginated<i64> = serde_json::from_str(r#"{"entries":null}"#).unwrap();
        assert!(parsed.into_parts().0.is_empty());
    }

    #[test]
    fn test_malformed_entry_keeps_field_error() {
        let body = r#"{"nextOffset":null,"entries":[{"id":1,"name":"a"},{"name":"b"}]}"#;
        let err = serde_json::from_str::<Paginated<Action>>(body).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"), "{err}");

        let err = serde_json::from_str::<Paginated<Action>>(r#"[{"id":"x"}]"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{err}");
    }
}
