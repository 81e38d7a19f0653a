//! JSON-blob attributes
//!
//! Free-form JSON is carried in the flat tree as text. A manifest may also
//! write it as an inline table, which is stored as its JSON text. Text that
//! parses is always serialized in canonical form (sorted keys, no
//! whitespace) so formatting differences never show up as changes.

use gfwapi::types::JsonObject;
use gfwapi::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// JSON text holding an object
///
/// Equality compares the canonical form.
#[derive(Debug, Clone, Default)]
pub struct JsonText(String);

impl PartialEq for JsonText {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for JsonText {}

impl JsonText {
    /// Wrap raw text (not validated until translation)
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Render an object as text
    pub fn from_object(object: &JsonObject) -> Self {
        Self(Value::Object(object.clone()).to_string())
    }

    /// Raw text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into an object
    ///
    /// # Errors
    ///
    /// Returns a decode error naming `field` when the text is not valid JSON
    /// or is not an object.
    pub fn to_object(&self, field: &str) -> Result<JsonObject> {
        let value: Value = serde_json::from_str(&self.0)
            .map_err(|e| Error::Decode(format!("{field}: {e}")))?;
        match value {
            Value::Object(object) => Ok(object),
            other => Err(Error::Decode(format!(
                "{field}: expected a JSON object, found {}",
                kind(&other)
            ))),
        }
    }

    fn canonical(&self) -> String {
        serde_json::from_str::<Value>(&self.0).map_or_else(|_| self.0.clone(), |v| v.to_string())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for JsonText {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for JsonText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Object(JsonObject),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Self(text),
            Repr::Object(object) => Self::from_object(&object),
        })
    }
}

/// Parse an optional blob
pub fn parse_optional(field: &str, text: Option<&JsonText>) -> Result<Option<JsonObject>> {
    text.map(|t| t.to_object(field)).transpose()
}

/// Parse a list of blobs, naming the failing index
pub fn parse_list(field: &str, texts: &[JsonText]) -> Result<Vec<JsonObject>> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| t.to_object(&format!("{field}.{i}")))
        .collect()
}

/// Render a list of objects
pub fn render_list(objects: &[JsonObject]) -> Vec<JsonText> {
    objects.iter().map(JsonText::from_object).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_object() {
        let text = JsonText::new(r#"{"timebar": {"visible": true}}"#);
        let object = text.to_object("state").unwrap();
        assert_eq!(object["timebar"]["visible"], true);
    }

    #[test]
    fn test_malformed_text_is_decode_error() {
        let err = JsonText::new("{not json").to_object("info_config").unwrap_err();
        assert!(matches!(err, Error::Decode(ref msg) if msg.starts_with("info_config")));
    }

    #[test]
    fn test_non_object_is_decode_error() {
        let err = JsonText::new("[1, 2]").to_object("state").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_serializes_canonical_form() {
        let text = JsonText::new("{ \"b\": 1,\n  \"a\": 2 }");
        assert_eq!(serde_json::to_value(&text).unwrap(), json!(r#"{"a":2,"b":1}"#));
    }

    #[test]
    fn test_malformed_text_serializes_verbatim() {
        let text = JsonText::new("{oops");
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("{oops"));
    }

    #[test]
    fn test_equality_ignores_formatting() {
        assert_eq!(JsonText::new("{ \"a\": 1 }"), JsonText::new(r#"{"a":1}"#));
        assert_ne!(JsonText::new(r#"{"a":1}"#), JsonText::new(r#"{"a":2}"#));
    }

    #[test]
    fn test_deserializes_inline_object() {
        let text: JsonText = serde_json::from_value(json!({"color": "#fff"})).unwrap();
        assert_eq!(text.as_str(), r##"{"color":"#fff"}"##);
    }

    #[test]
    fn test_parse_list_names_index() {
        let texts = vec![JsonText::new("{}"), JsonText::new("nope")];
        let err = parse_list("datasets_config", &texts).unwrap_err();
        assert!(err.to_string().contains("datasets_config.1"));
    }
}
