//! Workspace entity: a saved map state composed of dataviews.

use super::{JsonObject, null_default};
use serde::{Deserialize, Serialize};

/// Body of `POST workspaces`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspace {
    /// Identity; derived from the name when the caller leaves it unset.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub public: bool,
    /// Opaque map state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aoi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    /// Dataview ids, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub dataviews: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub dataview_instances: Vec<DataviewInstance>,
}

/// A workspace as returned by `GET workspaces/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(flatten)]
    pub fields: NewWorkspace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Initial map position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// A dataview placed in a workspace with instance-specific overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataviewInstance {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub dataview_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub datasets_config: Vec<JsonObject>,
}

/// Body of `PATCH workspaces/{id}`.
///
/// Only `Some` fields are sent. On optional attributes `Some(None)` is sent
/// as `null`, which clears the value. The identity is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Option<JsonObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aoi: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Option<Viewport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataviews: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataview_instances: Option<Vec<DataviewInstance>>,
}

impl WorkspacePatch {
    /// Whether the patch carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workspace_read() {
        let workspace: Workspace = serde_json::from_value(json!({
            "id": "ocean_watch-public",
            "name": "OceanWatch",
            "description": "Regional view",
            "app": "fishing-map",
            "public": true,
            "viewport": {"zoom": 3.5, "latitude": 10.0, "longitude": -20.0},
            "dataviews": [1, 2],
            "dataviewInstances": [{"id": "i1", "dataviewId": "12", "config": {"color": "#fff"}}],
            "state": {"timebar": "none"},
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(workspace.fields.id, "ocean_watch-public");
        assert_eq!(workspace.fields.dataviews, vec![1, 2]);
        assert_eq!(workspace.fields.viewport.unwrap().zoom, 3.5);
        assert_eq!(workspace.fields.dataview_instances[0].dataview_id, "12");
    }

    #[test]
    fn test_patch_serialization() {
        let patch = WorkspacePatch {
            public: Some(false),
            dataviews: Some(vec![3]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"public": false, "dataviews": [3]})
        );
    }

    #[test]
    fn test_patch_clear_is_null() {
        let patch = WorkspacePatch {
            viewport: Some(None),
            state: Some(None),
            aoi: Some(None),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"viewport": null, "state": null, "aoi": null}));

        let echoed: Workspace = serde_json::from_value(json!({
            "id": "w",
            "name": "W",
            "description": "d",
            "viewport": null,
            "state": null,
            "aoi": null
        }))
        .unwrap();
        assert!(echoed.fields.viewport.is_none());
        assert!(echoed.fields.state.is_none());
    }
}
