//! `gfw_dataview`

use super::json::{JsonText, parse_list, parse_optional, render_list};
use super::validate::{all_of, not_empty, optional_one_of};
use super::{block, changed, enums, single};
use gfwapi::Result;
use gfwapi::types::{
    Dataview, DataviewConfig as WireConfig, DataviewLayer, DataviewPatch, JsonObject, NewDataview,
};
use serde::{Deserialize, Serialize};

/// One entry of `config.layers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerBlock {
    pub id: String,
    pub dataset: String,
}

/// `config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_ramp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaks: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intervals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i64>,
}

impl ConfigBlock {
    fn validate(&self) -> Result<()> {
        optional_one_of(
            "config.type",
            self.config_type.as_deref(),
            enums::DATAVIEW_CONFIG_TYPES,
        )?;
        all_of(
            "config.intervals",
            &self.intervals,
            enums::DATAVIEW_CONFIG_INTERVALS,
        )
    }
}

impl From<ConfigBlock> for WireConfig {
    fn from(c: ConfigBlock) -> Self {
        Self {
            config_type: c.config_type,
            color: c.color,
            color_ramp: c.color_ramp,
            datasets: c.datasets,
            layers: c
                .layers
                .into_iter()
                .map(|l| DataviewLayer {
                    id: l.id,
                    dataset: l.dataset,
                })
                .collect(),
            breaks: c.breaks,
            intervals: c.intervals,
            aggregation_operation: c.aggregation_operation,
            max_zoom: c.max_zoom,
        }
    }
}

impl From<WireConfig> for ConfigBlock {
    fn from(c: WireConfig) -> Self {
        Self {
            config_type: c.config_type,
            color: c.color,
            color_ramp: c.color_ramp,
            datasets: c.datasets,
            layers: c
                .layers
                .into_iter()
                .map(|l| LayerBlock {
                    id: l.id,
                    dataset: l.dataset,
                })
                .collect(),
            breaks: c.breaks,
            intervals: c.intervals,
            aggregation_operation: c.aggregation_operation,
            max_zoom: c.max_zoom,
        }
    }
}

/// Flat attribute tree of a dataview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataviewConfig {
    /// Natural key, never changed after creation
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<ConfigBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_config: Option<JsonText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_config: Option<JsonText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters_config: Option<JsonText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasets_config: Vec<JsonText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl DataviewConfig {
    fn validate(&self) -> Result<()> {
        not_empty("slug", &self.slug)?;
        not_empty("name", &self.name)?;
        optional_one_of("category", self.category.as_deref(), enums::DATAVIEW_CATEGORIES)?;
        optional_one_of("app", self.app.as_deref(), enums::DATAVIEW_APPS)?;
        if let Some(config) = single("config", self.config.clone())? {
            config.validate()?;
        }
        Ok(())
    }

    fn wire_config(&self) -> Result<Option<WireConfig>> {
        Ok(single("config", self.config.clone())?.map(Into::into))
    }

    /// Build the write model
    pub fn to_domain(&self) -> Result<NewDataview> {
        self.validate()?;
        Ok(NewDataview {
            slug: self.slug.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            app: self.app.clone(),
            config: self.wire_config()?,
            info_config: parse_optional("info_config", self.info_config.as_ref())?,
            events_config: parse_optional("events_config", self.events_config.as_ref())?,
            filters_config: parse_optional("filters_config", self.filters_config.as_ref())?,
            datasets_config: parse_list("datasets_config", &self.datasets_config)?,
        })
    }

    /// Flatten a read model
    pub fn to_config(dataview: Dataview) -> Self {
        let Dataview {
            fields,
            created_at,
            updated_at,
            ..
        } = dataview;
        Self {
            slug: fields.slug,
            name: fields.name,
            description: fields.description,
            category: fields.category,
            app: fields.app,
            config: block(fields.config.map(Into::into)),
            info_config: fields.info_config.as_ref().map(JsonText::from_object),
            events_config: fields.events_config.as_ref().map(JsonText::from_object),
            filters_config: fields.filters_config.as_ref().map(JsonText::from_object),
            datasets_config: render_list(&fields.datasets_config),
            created_at,
            updated_at,
        }
    }

    /// Build a partial update carrying only the attributes that differ
    ///
    /// A cleared optional attribute is sent as `null` so the server clears
    /// it too. The slug is never patched.
    pub fn to_patch(prior: &Self, desired: &Self) -> Result<DataviewPatch> {
        desired.validate()?;
        Ok(DataviewPatch {
            name: changed(&prior.name, &desired.name),
            description: changed(&prior.description, &desired.description),
            category: changed(&prior.category, &desired.category),
            app: changed(&prior.app, &desired.app),
            config: match changed(&prior.config, &desired.config) {
                Some(_) => Some(desired.wire_config()?),
                None => None,
            },
            info_config: blob_patch("info_config", &prior.info_config, &desired.info_config)?,
            events_config: blob_patch(
                "events_config",
                &prior.events_config,
                &desired.events_config,
            )?,
            filters_config: blob_patch(
                "filters_config",
                &prior.filters_config,
                &desired.filters_config,
            )?,
            datasets_config: match changed(&prior.datasets_config, &desired.datasets_config) {
                Some(texts) => Some(parse_list("datasets_config", &texts)?),
                None => None,
            },
        })
    }
}

/// Patch value for a JSON blob: the new object, or a clear
fn blob_patch(
    field: &str,
    prior: &Option<JsonText>,
    desired: &Option<JsonText>,
) -> Result<Option<Option<JsonObject>>> {
    match changed(prior, desired) {
        Some(Some(text)) => text.to_object(field).map(|object| Some(Some(object))),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfwapi::Error;
    use serde_json::json;

    fn heatmap() -> DataviewConfig {
        serde_json::from_value(json!({
            "slug": "fishing-effort",
            "name": "Fishing effort",
            "description": "Apparent fishing",
            "category": "activity",
            "app": "fishing-map",
            "config": [{
                "type": "HEATMAP_ANIMATED",
                "color": "#00FFBC",
                "color_ramp": "teal",
                "datasets": ["public-global-fishing-effort:v3.0"],
                "layers": [{"id": "ais", "dataset": "public-global-fishing-effort:v3.0"}],
                "breaks": [0.5, 1.5],
                "intervals": ["day", "month"]
            }],
            "info_config": {"fields": []},
            "datasets_config": [{"datasetId": "d", "params": []}, "{\"datasetId\": \"e\"}"]
        }))
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let flat = heatmap();
        let new = flat.to_domain().unwrap();
        let mut value = serde_json::to_value(&new).unwrap();
        value["id"] = json!(17);
        let dataview: Dataview = serde_json::from_value(value).unwrap();
        assert_eq!(DataviewConfig::to_config(dataview), flat);
    }

    #[test]
    fn test_datasets_config_is_passed_through() {
        let new = heatmap().to_domain().unwrap();
        assert_eq!(new.datasets_config.len(), 2);
        assert_eq!(new.datasets_config[1]["datasetId"], "e");
    }

    #[test]
    fn test_config_type_validated() {
        let mut flat = heatmap();
        flat.config[0].config_type = Some("PIE_CHART".into());
        let err = flat.to_domain().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "config.type"));
    }

    #[test]
    fn test_app_validated() {
        let mut flat = heatmap();
        flat.app = Some("port-inspector".into());
        assert!(flat.to_domain().is_err());
    }

    #[test]
    fn test_malformed_blob() {
        let mut flat = heatmap();
        flat.events_config = Some(JsonText::new("[]"));
        assert!(matches!(flat.to_domain().unwrap_err(), Error::Decode(_)));
    }

    #[test]
    fn test_patch_carries_only_changes() {
        let prior = heatmap();
        let mut desired = prior.clone();
        desired.description = String::new();
        desired.category = None;

        let patch = DataviewConfig::to_patch(&prior, &desired).unwrap();
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"description": "", "category": null})
        );
    }

    #[test]
    fn test_patch_ignores_slug_and_unchanged() {
        let prior = heatmap();
        let mut desired = prior.clone();
        desired.slug = "renamed".into();
        assert!(DataviewConfig::to_patch(&prior, &desired).unwrap().is_empty());
    }

    #[test]
    fn test_cleared_attributes_converge() {
        let prior = heatmap();
        let mut desired = prior.clone();
        desired.config = Vec::new();
        desired.info_config = None;
        desired.app = None;

        let patch = DataviewConfig::to_patch(&prior, &desired).unwrap();
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"config": null, "infoConfig": null, "app": null}));

        // The server applies the patch and echoes the result back
        let mut stored = serde_json::to_value(prior.to_domain().unwrap()).unwrap();
        for (key, value) in body.as_object().unwrap() {
            stored[key] = value.clone();
        }
        stored["id"] = json!(17);
        let read = DataviewConfig::to_config(serde_json::from_value(stored).unwrap());
        assert_eq!(read, desired);
    }

    #[test]
    fn test_patch_blobs() {
        let prior = heatmap();
        let mut desired = prior.clone();
        desired.info_config = None;
        desired.filters_config = Some(JsonText::new(r#"{"flag": ["ESP"]}"#));
        let patch = DataviewConfig::to_patch(&prior, &desired).unwrap();
        assert_eq!(patch.info_config, Some(None));
        assert_eq!(patch.filters_config.unwrap().unwrap()["flag"], json!(["ESP"]));
    }

    #[test]
    fn test_patch_config_block() {
        let prior = heatmap();
        let mut desired = prior.clone();
        desired.config[0].color = Some("#FF0000".into());
        let patch = DataviewConfig::to_patch(&prior, &desired).unwrap();
        let config = patch.config.unwrap().unwrap();
        assert_eq!(config.color.as_deref(), Some("#FF0000"));
        assert_eq!(config.breaks, vec![0.5, 1.5]);
    }
}
