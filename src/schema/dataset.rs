//! `gfw_dataset`
//!
//! The fourteen configuration variants sit at the top level of the flat tree
//! as single-item blocks (`fourwings_v1`, `tracks_v1`, ...). At most one may
//! be populated; translation rejects a tree that sets more.

use super::json::{JsonText, parse_optional};
use super::validate::{not_empty, one_of, optional_iso8601, optional_one_of, required_one_of};
use super::{block, enums, single};
use gfwapi::types::{
    BulkDownloadV1, ContextLayerV1, DataDownloadV1, Dataset, DatasetConfiguration, DatasetFilters,
    Documentation, EventsV1, FilterConfig, FourwingsV1, Frontend, InsightSource, InsightsV1,
    NewDataset, PmTilesV1, PropertyRange, RelatedDataset, TemporalContextLayerV1, ThumbnailsV1,
    TracksV1, UserContextLayerV1, UserTracksV1, VesselsV1,
};
use gfwapi::{Error, Result};
use serde::{Deserialize, Serialize};

/// Zoom level applied when a block leaves `max_zoom` unset
pub const DEFAULT_MAX_ZOOM: i64 = 12;

/// `max_zoom` attribute, defaulting to [`DEFAULT_MAX_ZOOM`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxZoom(pub i64);

impl Default for MaxZoom {
    fn default() -> Self {
        Self(DEFAULT_MAX_ZOOM)
    }
}

impl From<Option<i64>> for MaxZoom {
    fn from(zoom: Option<i64>) -> Self {
        zoom.map_or_else(Self::default, Self)
    }
}

impl From<MaxZoom> for Option<i64> {
    fn from(zoom: MaxZoom) -> Self {
        Some(zoom.0)
    }
}

/// Attributes omitted from the flat tree when unset
trait Blank {
    fn is_blank(&self) -> bool;
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for MaxZoom {
    fn is_blank(&self) -> bool {
        false
    }
}

/// Flat block whose attributes mirror a wire struct one to one.
///
/// Every wire field must be listed, so a field added to the wire model and
/// forgotten here fails to compile.
macro_rules! mirror_block {
    (
        $(#[$meta:meta])*
        $block:ident <=> $wire:ident { $($field:ident: $ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $block {
            $(
                #[serde(default, skip_serializing_if = "Blank::is_blank")]
                pub $field: $ty,
            )*
        }

        impl From<$block> for $wire {
            fn from(block: $block) -> Self {
                Self {
                    $($field: block.$field.into(),)*
                }
            }
        }

        impl From<$wire> for $block {
            fn from(wire: $wire) -> Self {
                Self {
                    $($field: wire.$field.into(),)*
                }
            }
        }
    };
}

mirror_block! {
    /// `context_layer_v1`
    ContextLayerBlock <=> ContextLayerV1 {
        id_property: Option<String>,
        value_properties: Vec<String>,
        table: Option<String>,
        dataset: Option<String>,
        project: Option<String>,
        geometry_column: Option<String>,
        disable_interaction: Option<bool>,
    }
}

mirror_block! {
    /// `property_to_include_range` inside `user_context_layer_v1`
    PropertyRangeBlock <=> PropertyRange {
        min: Option<f64>,
        max: Option<f64>,
    }
}

mirror_block! {
    /// `temporal_context_layer_v1`
    TemporalContextLayerBlock <=> TemporalContextLayerV1 {
        source: Option<String>,
        bucket: Option<String>,
        folder: Option<String>,
        images: Vec<String>,
        band: Option<String>,
        min: Option<f64>,
        max: Option<f64>,
        scale: Option<f64>,
        offset: Option<f64>,
        intervals: Vec<String>,
        max_zoom: MaxZoom,
    }
}

mirror_block! {
    /// `user_tracks_v1`
    UserTracksBlock <=> UserTracksV1 {
        table: Option<String>,
        file_path: Option<String>,
        srid: Option<String>,
        format: Option<String>,
        latitude: Option<String>,
        longitude: Option<String>,
        timestamp: Option<String>,
        id_property: Option<String>,
        line_id: Option<String>,
        segment_id: Option<String>,
        ttl: Option<i64>,
    }
}

mirror_block! {
    /// `pm_tiles_v1`
    PmTilesBlock <=> PmTilesV1 {
        bucket: Option<String>,
        folder: Option<String>,
        file_path: Option<String>,
        format: Option<String>,
        id_property: Option<String>,
        value_properties: Vec<String>,
        max_zoom: MaxZoom,
    }
}

mirror_block! {
    /// `events_v1`
    EventsBlock <=> EventsV1 {
        table: Option<String>,
        project: Option<String>,
        dataset: Option<String>,
        function: Option<String>,
        geometry_column: Option<String>,
        max_zoom: MaxZoom,
        interaction_columns: Vec<String>,
    }
}

mirror_block! {
    /// `fourwings_v1`
    FourwingsBlock <=> FourwingsV1 {
        bucket: Option<String>,
        folder: Option<String>,
        table: Option<String>,
        dataset: Option<String>,
        project: Option<String>,
        function: Option<String>,
        intervals: Vec<String>,
        interaction_columns: Vec<String>,
        interaction_group_columns: Vec<String>,
        max_zoom: MaxZoom,
        num_bytes: Option<i64>,
        num_layers: Option<i64>,
        tile_scale: Option<f64>,
        tile_offset: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    }
}

mirror_block! {
    /// `tracks_v1`
    TracksBlock <=> TracksV1 {
        bucket: Option<String>,
        folder: Option<String>,
        table: Option<String>,
        dataset: Option<String>,
        project: Option<String>,
        version: Option<i64>,
    }
}

mirror_block! {
    /// `vessels_v1`
    VesselsBlock <=> VesselsV1 {
        index: Option<String>,
        index_boost: Option<f64>,
        table: Option<String>,
        dataset: Option<String>,
        project: Option<String>,
        fields: Vec<String>,
    }
}

mirror_block! {
    /// `data_download_v1`
    DataDownloadBlock <=> DataDownloadV1 {
        gcs_folder: Option<String>,
        email_groups: Vec<String>,
        extensions: Vec<String>,
    }
}

mirror_block! {
    /// `thumbnails_v1`
    ThumbnailsBlock <=> ThumbnailsV1 {
        bucket: Option<String>,
        folder: Option<String>,
        extensions: Vec<String>,
    }
}

/// `user_context_layer_v1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserContextLayerBlock {
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_to_include: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_to_include_range: Vec<PropertyRangeBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_interaction: Option<bool>,
}

impl UserContextLayerBlock {
    fn to_domain(&self) -> Result<UserContextLayerV1> {
        optional_one_of(
            "user_context_layer_v1.format",
            self.format.as_deref(),
            enums::FILE_FORMATS,
        )?;
        optional_one_of(
            "user_context_layer_v1.geometry_type",
            self.geometry_type.as_deref(),
            enums::GEOMETRY_TYPES,
        )?;
        let range = single(
            "user_context_layer_v1.property_to_include_range",
            self.property_to_include_range.clone(),
        )?;
        Ok(UserContextLayerV1 {
            table: self.table.clone(),
            file_path: self.file_path.clone(),
            srid: self.srid.clone(),
            format: self.format.clone(),
            id_property: self.id_property.clone(),
            value_properties: self.value_properties.clone(),
            geometry_type: self.geometry_type.clone(),
            property_to_include: self.property_to_include.clone(),
            property_to_include_range: range.map(Into::into),
            ttl: self.ttl,
            disable_interaction: self.disable_interaction,
        })
    }

    fn to_config(layer: UserContextLayerV1) -> Self {
        Self {
            table: layer.table,
            file_path: layer.file_path,
            srid: layer.srid,
            format: layer.format,
            id_property: layer.id_property,
            value_properties: layer.value_properties,
            geometry_type: layer.geometry_type,
            property_to_include: layer.property_to_include,
            property_to_include_range: block(layer.property_to_include_range.map(Into::into)),
            ttl: layer.ttl,
            disable_interaction: layer.disable_interaction,
        }
    }
}

/// `frontend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontendBlock {
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_properties: Vec<String>,
    /// UI settings as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<JsonText>,
}

impl FrontendBlock {
    fn to_domain(&self) -> Result<Frontend> {
        optional_one_of(
            "frontend.geometry_type",
            self.geometry_type.as_deref(),
            enums::GEOMETRY_TYPES,
        )?;
        Ok(Frontend {
            translate: self.translate,
            geometry_type: self.geometry_type.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            timestamp: self.timestamp.clone(),
            line_id: self.line_id.clone(),
            segment_id: self.segment_id.clone(),
            value_properties: self.value_properties.clone(),
            ui: parse_optional("frontend.ui", self.ui.as_ref())?,
        })
    }

    fn to_config(frontend: Frontend) -> Self {
        Self {
            translate: frontend.translate,
            geometry_type: frontend.geometry_type,
            latitude: frontend.latitude,
            longitude: frontend.longitude,
            timestamp: frontend.timestamp,
            line_id: frontend.line_id,
            segment_id: frontend.segment_id,
            value_properties: frontend.value_properties,
            ui: frontend.ui.as_ref().map(JsonText::from_object),
        }
    }
}

/// One entry of `insights_v1.sources`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsightSourceBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub insight: String,
}

/// `insights_v1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsightsBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<InsightSourceBlock>,
}

impl From<InsightsBlock> for InsightsV1 {
    fn from(block: InsightsBlock) -> Self {
        Self {
            sources: block
                .sources
                .into_iter()
                .map(|s| InsightSource {
                    id: s.id,
                    source_type: s.source_type,
                    insight: s.insight,
                })
                .collect(),
        }
    }
}

impl From<InsightsV1> for InsightsBlock {
    fn from(insights: InsightsV1) -> Self {
        Self {
            sources: insights
                .sources
                .into_iter()
                .map(|s| InsightSourceBlock {
                    id: s.id,
                    source_type: s.source_type,
                    insight: s.insight,
                })
                .collect(),
        }
    }
}

/// `bulk_download_v1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkDownloadBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Export settings as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonText>,
}

impl BulkDownloadBlock {
    fn to_domain(&self) -> Result<BulkDownloadV1> {
        Ok(BulkDownloadV1 {
            gcs_folder: self.gcs_folder.clone(),
            email_groups: self.email_groups.clone(),
            format: self.format.clone(),
            config: parse_optional("bulk_download_v1.config", self.config.as_ref())?,
        })
    }

    fn to_config(download: BulkDownloadV1) -> Self {
        Self {
            gcs_folder: download.gcs_folder,
            email_groups: download.email_groups,
            format: download.format,
            config: download.config.as_ref().map(JsonText::from_object),
        }
    }
}

/// One entry of `related_datasets`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelatedDatasetBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub dataset_type: String,
}

/// One filterable field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterBlock {
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
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
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

impl From<FilterBlock> for FilterConfig {
    fn from(f: FilterBlock) -> Self {
        Self {
            id: f.id,
            label: f.label,
            filter_type: f.filter_type,
            required: f.required,
            array: f.array,
            enabled: f.enabled,
            enum_values: f.enum_values,
            min: f.min,
            max: f.max,
            max_length: f.max_length,
            min_length: f.min_length,
            single_selection: f.single_selection,
            operation: f.operation,
        }
    }
}

impl From<FilterConfig> for FilterBlock {
    fn from(f: FilterConfig) -> Self {
        Self {
            id: f.id,
            label: f.label,
            filter_type: f.filter_type,
            required: f.required,
            array: f.array,
            enabled: f.enabled,
            enum_values: f.enum_values,
            min: f.min,
            max: f.max,
            max_length: f.max_length,
            min_length: f.min_length,
            single_selection: f.single_selection,
            operation: f.operation,
        }
    }
}

/// `filters`: filter definitions grouped by layer kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fourwings: Vec<FilterBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<FilterBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<FilterBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vessels: Vec<FilterBlock>,
}

fn convert<A, B: From<A>>(items: Vec<A>) -> Vec<B> {
    items.into_iter().map(Into::into).collect()
}

impl From<FiltersBlock> for DatasetFilters {
    fn from(block: FiltersBlock) -> Self {
        Self {
            fourwings: convert(block.fourwings),
            events: convert(block.events),
            tracks: convert(block.tracks),
            vessels: convert(block.vessels),
        }
    }
}

impl From<DatasetFilters> for FiltersBlock {
    fn from(filters: DatasetFilters) -> Self {
        Self {
            fourwings: convert(filters.fourwings),
            events: convert(filters.events),
            tracks: convert(filters.tracks),
            vessels: convert(filters.vessels),
        }
    }
}

/// `documentation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentationBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl From<DocumentationBlock> for Documentation {
    fn from(d: DocumentationBlock) -> Self {
        Self {
            doc_type: d.doc_type,
            enable: d.enable,
            status: d.status,
            queries: d.queries,
            provider: d.provider,
        }
    }
}

impl From<Documentation> for DocumentationBlock {
    fn from(d: Documentation) -> Self {
        Self {
            doc_type: d.doc_type,
            enable: d.enable,
            status: d.status,
            queries: d.queries,
            provider: d.provider,
        }
    }
}

/// Flat attribute tree of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Caller-chosen identity, e.g. `public-global-fishing-effort:v3.0`
    pub dataset_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub dataset_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields_allowed: Vec<String>,
    /// Schema document as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_datasets: Vec<RelatedDatasetBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FiltersBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<DocumentationBlock>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_layer_v1: Vec<ContextLayerBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_context_layer_v1: Vec<UserContextLayerBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temporal_context_layer_v1: Vec<TemporalContextLayerBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_tracks_v1: Vec<UserTracksBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pm_tiles_v1: Vec<PmTilesBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events_v1: Vec<EventsBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fourwings_v1: Vec<FourwingsBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks_v1: Vec<TracksBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frontend: Vec<FrontendBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vessels_v1: Vec<VesselsBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights_v1: Vec<InsightsBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bulk_download_v1: Vec<BulkDownloadBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_download_v1: Vec<DataDownloadBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnails_v1: Vec<ThumbnailsBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DatasetConfig {
    /// Names of the configuration blocks that are set
    pub fn populated_variants(&self) -> Vec<&'static str> {
        [
            ("context_layer_v1", self.context_layer_v1.is_empty()),
            ("user_context_layer_v1", self.user_context_layer_v1.is_empty()),
            ("temporal_context_layer_v1", self.temporal_context_layer_v1.is_empty()),
            ("user_tracks_v1", self.user_tracks_v1.is_empty()),
            ("pm_tiles_v1", self.pm_tiles_v1.is_empty()),
            ("events_v1", self.events_v1.is_empty()),
            ("fourwings_v1", self.fourwings_v1.is_empty()),
            ("tracks_v1", self.tracks_v1.is_empty()),
            ("frontend", self.frontend.is_empty()),
            ("vessels_v1", self.vessels_v1.is_empty()),
            ("insights_v1", self.insights_v1.is_empty()),
            ("bulk_download_v1", self.bulk_download_v1.is_empty()),
            ("data_download_v1", self.data_download_v1.is_empty()),
            ("thumbnails_v1", self.thumbnails_v1.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| (!empty).then_some(name))
        .collect()
    }

    fn validate(&self) -> Result<()> {
        not_empty("dataset_id", &self.dataset_id)?;
        not_empty("name", &self.name)?;
        not_empty("description", &self.description)?;
        one_of("type", &self.dataset_type, enums::DATASET_TYPES)?;
        required_one_of("category", self.category.as_deref(), enums::DATASET_CATEGORIES)?;
        required_one_of(
            "subcategory",
            self.subcategory.as_deref(),
            enums::DATASET_SUBCATEGORIES,
        )?;
        optional_one_of("unit", self.unit.as_deref(), enums::DATASET_UNITS)?;
        optional_one_of("status", self.status.as_deref(), enums::DATASET_STATUSES)?;
        optional_iso8601("start_date", self.start_date.as_deref())?;
        optional_iso8601("end_date", self.end_date.as_deref())?;
        for (i, related) in self.related_datasets.iter().enumerate() {
            one_of(
                &format!("related_datasets.{i}.type"),
                &related.dataset_type,
                enums::DATASET_TYPES,
            )?;
        }

        let populated = self.populated_variants();
        if populated.len() > 1 {
            return Err(Error::validation(
                "configuration",
                format!(
                    "only one configuration block may be set, found {}",
                    populated.join(", ")
                ),
            ));
        }
        Ok(())
    }

    fn configuration(&self) -> Result<Option<DatasetConfiguration>> {
        if self.populated_variants().is_empty() {
            return Ok(None);
        }
        let user_context_layer =
            single("user_context_layer_v1", self.user_context_layer_v1.clone())?;
        let frontend = single("frontend", self.frontend.clone())?;
        let bulk_download = single("bulk_download_v1", self.bulk_download_v1.clone())?;
        Ok(Some(DatasetConfiguration {
            context_layer_v1: single("context_layer_v1", self.context_layer_v1.clone())?
                .map(Into::into),
            user_context_layer_v1: user_context_layer.map(|b| b.to_domain()).transpose()?,
            temporal_context_layer_v1: single(
                "temporal_context_layer_v1",
                self.temporal_context_layer_v1.clone(),
            )?
            .map(Into::into),
            user_tracks_v1: single("user_tracks_v1", self.user_tracks_v1.clone())?.map(Into::into),
            pm_tiles_v1: single("pm_tiles_v1", self.pm_tiles_v1.clone())?.map(Into::into),
            events_v1: single("events_v1", self.events_v1.clone())?.map(Into::into),
            fourwings_v1: single("fourwings_v1", self.fourwings_v1.clone())?.map(Into::into),
            tracks_v1: single("tracks_v1", self.tracks_v1.clone())?.map(Into::into),
            frontend: frontend.map(|b| b.to_domain()).transpose()?,
            vessels_v1: single("vessels_v1", self.vessels_v1.clone())?.map(Into::into),
            insights_v1: single("insights_v1", self.insights_v1.clone())?.map(Into::into),
            bulk_download_v1: bulk_download.map(|b| b.to_domain()).transpose()?,
            data_download_v1: single("data_download_v1", self.data_download_v1.clone())?
                .map(Into::into),
            thumbnails_v1: single("thumbnails_v1", self.thumbnails_v1.clone())?.map(Into::into),
        }))
    }

    /// Build the write model
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown enumerated values, malformed
    /// dates, repeated single-item blocks or more than one configuration
    /// block, and a decode error for malformed JSON text.
    pub fn to_domain(&self) -> Result<NewDataset> {
        self.validate()?;
        Ok(NewDataset {
            id: self.dataset_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            dataset_type: self.dataset_type.clone(),
            alias: self.alias.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            unit: self.unit.clone(),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            source: self.source.clone(),
            status: self.status.clone(),
            fields_allowed: self.fields_allowed.clone(),
            schema: parse_optional("schema", self.schema.as_ref())?,
            related_datasets: self
                .related_datasets
                .iter()
                .map(|r| RelatedDataset {
                    id: r.id.clone(),
                    dataset_type: r.dataset_type.clone(),
                })
                .collect(),
            filters: single("filters", self.filters.clone())?.map(Into::into),
            documentation: single("documentation", self.documentation.clone())?.map(Into::into),
            configuration: self.configuration()?,
        })
    }

    /// Flatten a read model
    pub fn to_config(dataset: Dataset) -> Self {
        let Dataset { fields, created_at } = dataset;
        let c = fields.configuration.unwrap_or_default();
        Self {
            dataset_id: fields.id,
            name: fields.name,
            dataset_type: fields.dataset_type,
            description: fields.description,
            alias: fields.alias,
            start_date: fields.start_date,
            end_date: fields.end_date,
            unit: fields.unit,
            category: fields.category,
            subcategory: fields.subcategory,
            source: fields.source,
            status: fields.status,
            fields_allowed: fields.fields_allowed,
            schema: fields.schema.as_ref().map(JsonText::from_object),
            related_datasets: fields
                .related_datasets
                .into_iter()
                .map(|r| RelatedDatasetBlock {
                    id: r.id,
                    dataset_type: r.dataset_type,
                })
                .collect(),
            filters: block(fields.filters.map(Into::into)),
            documentation: block(fields.documentation.map(Into::into)),
            context_layer_v1: block(c.context_layer_v1.map(Into::into)),
            user_context_layer_v1: block(
                c.user_context_layer_v1
                    .map(UserContextLayerBlock::to_config),
            ),
            temporal_context_layer_v1: block(c.temporal_context_layer_v1.map(Into::into)),
            user_tracks_v1: block(c.user_tracks_v1.map(Into::into)),
            pm_tiles_v1: block(c.pm_tiles_v1.map(Into::into)),
            events_v1: block(c.events_v1.map(Into::into)),
            fourwings_v1: block(c.fourwings_v1.map(Into::into)),
            tracks_v1: block(c.tracks_v1.map(Into::into)),
            frontend: block(c.frontend.map(FrontendBlock::to_config)),
            vessels_v1: block(c.vessels_v1.map(Into::into)),
            insights_v1: block(c.insights_v1.map(Into::into)),
            bulk_download_v1: block(c.bulk_download_v1.map(BulkDownloadBlock::to_config)),
            data_download_v1: block(c.data_download_v1.map(Into::into)),
            thumbnails_v1: block(c.thumbnails_v1.map(Into::into)),
            created_at,
        }
    }
}
