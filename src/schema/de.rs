//! Deserialization helpers for flat attributes

use serde::{Deserialize, Deserializer};

/// An integer id written as a number or as a numeric string
///
/// References (`${gfw_role.admin.id}`) always resolve to strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

impl IdRepr {
    fn into_id<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Int(id) => Ok(id),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer id, found \"{text}\""))),
        }
    }
}

/// Deserialize one integer id
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    IdRepr::deserialize(deserializer)?.into_id()
}

/// Deserialize a list of integer ids
pub fn ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    Vec::<IdRepr>::deserialize(deserializer)?
        .into_iter()
        .map(IdRepr::into_id)
        .collect()
}

/// Deserialize a set of integer ids as a sorted list without duplicates
pub fn id_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    let mut ids = ids(deserializer)?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Deserialize a list that may be written as `null`
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a stored identity back into an integer id
pub fn parse_id(id: &str) -> anyhow::Result<i64> {
    id.parse()
        .map_err(|_| anyhow::anyhow!("invalid id '{id}': expected an integer"))
}
