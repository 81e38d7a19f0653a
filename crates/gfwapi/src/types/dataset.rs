//! Dataset entity and its polymorphic configuration.
//!
//! A dataset carries exactly one configuration variant, selected by its
//! type. On the wire the variants are sibling optional objects inside
//! `configuration`; [`DatasetVariant`] is the tagged form used by callers.

use super::{JsonObject, null_default};
use serde::{Deserialize, Serialize};

/// Body of `POST datasets` and `PUT datasets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDataset {
    /// Caller-chosen identity.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Dataset type, e.g. `4wings:v1`.
    #[serde(rename = "type")]
    pub dataset_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub alias: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub fields_allowed: Vec<String>,
    /// Opaque schema document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub related_datasets: Vec<RelatedDataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<DatasetFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<DatasetConfiguration>,
}

/// A dataset as returned by `GET datasets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(flatten)]
    pub fields: NewDataset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Reference to another dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedDataset {
    pub id: String,
    #[serde(rename = "type")]
    pub dataset_type: String,
}

/// UI filter definitions, grouped by the kind of layer they apply to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub fourwings: Vec<FilterConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub events: Vec<FilterConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub tracks: Vec<FilterConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub vessels: Vec<FilterConfig>,
}

/// One filterable field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Allowed values.
    #[serde(
        rename = "enum",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_default"
    )]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_selection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

/// Dataset documentation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub queries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Wire form of a dataset configuration: one optional object per variant.
///
/// Well-formed datasets populate exactly one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_layer_v1: Option<ContextLayerV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context_layer_v1: Option<UserContextLayerV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_context_layer_v1: Option<TemporalContextLayerV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_tracks_v1: Option<UserTracksV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_tiles_v1: Option<PmTilesV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_v1: Option<EventsV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fourwings_v1: Option<FourwingsV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks_v1: Option<TracksV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<Frontend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessels_v1: Option<VesselsV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights_v1: Option<InsightsV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_download_v1: Option<BulkDownloadV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_download_v1: Option<DataDownloadV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails_v1: Option<ThumbnailsV1>,
}

/// Tagged form of a single configuration variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetVariant {
    ContextLayerV1(ContextLayerV1),
    UserContextLayerV1(UserContextLayerV1),
    TemporalContextLayerV1(TemporalContextLayerV1),
    UserTracksV1(UserTracksV1),
    PmTilesV1(PmTilesV1),
    EventsV1(EventsV1),
    FourwingsV1(FourwingsV1),
    TracksV1(TracksV1),
    Frontend(Frontend),
    VesselsV1(VesselsV1),
    InsightsV1(InsightsV1),
    BulkDownloadV1(BulkDownloadV1),
    DataDownloadV1(DataDownloadV1),
    ThumbnailsV1(ThumbnailsV1),
}

impl DatasetVariant {
    /// Wire key of this variant inside `configuration`.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::ContextLayerV1(_) => "contextLayerV1",
            Self::UserContextLayerV1(_) => "userContextLayerV1",
            Self::TemporalContextLayerV1(_) => "temporalContextLayerV1",
            Self::UserTracksV1(_) => "userTracksV1",
            Self::PmTilesV1(_) => "pmTilesV1",
            Self::EventsV1(_) => "eventsV1",
            Self::FourwingsV1(_) => "fourwingsV1",
            Self::TracksV1(_) => "tracksV1",
            Self::Frontend(_) => "frontend",
            Self::VesselsV1(_) => "vesselsV1",
            Self::InsightsV1(_) => "insightsV1",
            Self::BulkDownloadV1(_) => "bulkDownloadV1",
            Self::DataDownloadV1(_) => "dataDownloadV1",
            Self::ThumbnailsV1(_) => "thumbnailsV1",
        }
    }
}

impl From<DatasetVariant> for DatasetConfiguration {
    fn from(variant: DatasetVariant) -> Self {
        let mut config = Self::default();
        match variant {
            DatasetVariant::ContextLayerV1(v) => config.context_layer_v1 = Some(v),
            DatasetVariant::UserContextLayerV1(v) => config.user_context_layer_v1 = Some(v),
            DatasetVariant::TemporalContextLayerV1(v) => config.temporal_context_layer_v1 = Some(v),
            DatasetVariant::UserTracksV1(v) => config.user_tracks_v1 = Some(v),
            DatasetVariant::PmTilesV1(v) => config.pm_tiles_v1 = Some(v),
            DatasetVariant::EventsV1(v) => config.events_v1 = Some(v),
            DatasetVariant::FourwingsV1(v) => config.fourwings_v1 = Some(v),
            DatasetVariant::TracksV1(v) => config.tracks_v1 = Some(v),
            DatasetVariant::Frontend(v) => config.frontend = Some(v),
            DatasetVariant::VesselsV1(v) => config.vessels_v1 = Some(v),
            DatasetVariant::InsightsV1(v) => config.insights_v1 = Some(v),
            DatasetVariant::BulkDownloadV1(v) => config.bulk_download_v1 = Some(v),
            DatasetVariant::DataDownloadV1(v) => config.data_download_v1 = Some(v),
            DatasetVariant::ThumbnailsV1(v) => config.thumbnails_v1 = Some(v),
        }
        config
    }
}

impl DatasetConfiguration {
    /// Every populated variant, in declaration order.
    #[must_use]
    pub fn into_variants(self) -> Vec<DatasetVariant> {
        let mut variants = Vec::new();
        if let Some(v) = self.context_layer_v1 {
            variants.push(DatasetVariant::ContextLayerV1(v));
        }
        if let Some(v) = self.user_context_layer_v1 {
            variants.push(DatasetVariant::UserContextLayerV1(v));
        }
        if let Some(v) = self.temporal_context_layer_v1 {
            variants.push(DatasetVariant::TemporalContextLayerV1(v));
        }
        if let Some(v) = self.user_tracks_v1 {
            variants.push(DatasetVariant::UserTracksV1(v));
        }
        if let Some(v) = self.pm_tiles_v1 {
            variants.push(DatasetVariant::PmTilesV1(v));
        }
        if let Some(v) = self.events_v1 {
            variants.push(DatasetVariant::EventsV1(v));
        }
        if let Some(v) = self.fourwings_v1 {
            variants.push(DatasetVariant::FourwingsV1(v));
        }
        if let Some(v) = self.tracks_v1 {
            variants.push(DatasetVariant::TracksV1(v));
        }
        if let Some(v) = self.frontend {
            variants.push(DatasetVariant::Frontend(v));
        }
        if let Some(v) = self.vessels_v1 {
            variants.push(DatasetVariant::VesselsV1(v));
        }
        if let Some(v) = self.insights_v1 {
            variants.push(DatasetVariant::InsightsV1(v));
        }
        if let Some(v) = self.bulk_download_v1 {
            variants.push(DatasetVariant::BulkDownloadV1(v));
        }
        if let Some(v) = self.data_download_v1 {
            variants.push(DatasetVariant::DataDownloadV1(v));
        }
        if let Some(v) = self.thumbnails_v1 {
            variants.push(DatasetVariant::ThumbnailsV1(v));
        }
        variants
    }

    /// Number of populated variants.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.clone().into_variants().len()
    }
}

/// Static context layer served from a warehouse table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextLayerV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_property: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub value_properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_interaction: Option<bool>,
}

/// Bounds for `property_to_include`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Context layer uploaded by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContextLayerV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_property: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub value_properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_to_include: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_to_include_range: Option<PropertyRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_interaction: Option<bool>,
}

/// Raster layer that changes over time (e.g. satellite imagery).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalContextLayerV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub intervals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i64>,
}

/// Tracks uploaded by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTracksV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

/// Vector tiles stored as a PMTiles archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmTilesV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_property: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub value_properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i64>,
}

/// Vessel events (fishing, encounters, port visits, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub interaction_columns: Vec<String>,
}

/// Gridded activity heatmap tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourwingsV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub intervals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub interaction_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub interaction_group_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_layers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Vessel tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracksV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Client-side rendering hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub value_properties: Vec<String>,
    /// Opaque UI configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<JsonObject>,
}

/// Vessel search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselsV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_boost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub fields: Vec<String>,
}

/// Insight source reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSource {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub insight: String,
}

/// Insights computed from other datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsV1 {
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub sources: Vec<InsightSource>,
}

/// Bulk export to cloud storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDownloadV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub email_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Opaque export settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonObject>,
}

/// Downloadable files in cloud storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDownloadV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub email_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub extensions: Vec<String>,
}

/// Thumbnail images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailsV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_default")]
    pub extensions: Vec<String>,
}
