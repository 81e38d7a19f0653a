//! Dataview entity: a reusable presentation of one or more datasets.

use super::{JsonObject, null_default};
use serde::{Deserialize, Serialize};

/// Body of `POST dataviews`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDataview {
    /// Natural key used for existence checks.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DataviewConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_config: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_config: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters_config: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub datasets_config: Vec<JsonObject>,
}

/// A dataview as returned by `GET dataviews/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataview {
    /// Server-assigned identity.
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewDataview,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Rendering configuration of a dataview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataviewConfig {
    /// Layer type, e.g. `HEATMAP_ANIMATED`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_ramp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub datasets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub layers: Vec<DataviewLayer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub breaks: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub intervals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i64>,
}

/// A tile layer within a dataview config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataviewLayer {
    pub id: String,
    pub dataset: String,
}

/// Body of `PATCH dataviews/{id}`.
///
/// Only `Some` fields are sent. `Some(String::new())` sets an empty string;
/// on optional attributes `Some(None)` is sent as `null`, which clears the
/// value. The slug is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataviewPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Option<DataviewConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_config: Option<Option<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_config: Option<Option<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters_config: Option<Option<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets_config: Option<Vec<JsonObject>>,
}

impl DataviewPatch {
    /// Whether the patch carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
