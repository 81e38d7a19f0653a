//! Allowed values for enumerated attributes

/// Dataset `type`
pub const DATASET_TYPES: &[&str] = &[
    "tracks:v1",
    "vessels:v1",
    "events:v1",
    "insights:v1",
    "ports:v1",
    "4wings:v1",
    "user-tracks:v1",
    "user-context-layer:v1",
    "context-layer:v1",
    "data-download:v1",
    "bulk-download:v1",
    "temporal-context-layer:v1",
    "pm-tiles:v1",
    "thumbnails:v1",
];

/// Dataset `category`
pub const DATASET_CATEGORIES: &[&str] = &[
    "activity",
    "context",
    "context-layer",
    "detections",
    "environment",
    "event",
    "vessel",
    "gap",
];

/// Dataset `subcategory`
pub const DATASET_SUBCATEGORIES: &[&str] = &[
    "track",
    "animal",
    "loitering",
    "presence",
    "port_visit",
    "fishing",
    "info",
    "insight",
    "viirs",
    "sar",
    "encounter",
    "gap",
    "gap_start",
    "salinity",
    "chlorophyl",
    "water-temperature",
    "user",
    "nitrate",
    "oxygen",
    "phosphate",
    "waves",
    "ph",
    "sentinel-2",
];

/// Dataset `unit`
pub const DATASET_UNITS: &[&str] = &[
    "unit",
    "TBD",
    "probability",
    "hours",
    "days",
    "mg/m^3",
    "PSU",
    "ºC",
    "detections",
    "habitat suitability",
    "NA",
];

/// Dataset `status`
pub const DATASET_STATUSES: &[&str] = &["done", "error", "importing", "deprecated"];

/// Geometry types of user-uploaded layers
pub const GEOMETRY_TYPES: &[&str] = &["tracks", "polygons", "points"];

/// File formats of user-uploaded layers
pub const FILE_FORMATS: &[&str] = &["geojson", "pmtile"];

/// Dataview `category`
pub const DATAVIEW_CATEGORIES: &[&str] = &[
    "context",
    "environment",
    "activity",
    "detections",
    "events",
    "vessels",
];

/// Dataview `app`
pub const DATAVIEW_APPS: &[&str] = &["fishing-map", "vessel-history"];

/// Dataview `config.type`
pub const DATAVIEW_CONFIG_TYPES: &[&str] = &[
    "BASEMAP",
    "HEATMAP",
    "HEATMAP_ANIMATED",
    "TRACK",
    "CONTEXT",
    "USER_CONTEXT",
    "TILE_CLUSTER",
    "BACKGROUND",
    "POLYGONS",
    "USER_POINTS",
    "VESSEL_EVENTS",
    "VESSEL_EVENTS_SHAPES",
];

/// Dataview `config.intervals`
pub const DATAVIEW_CONFIG_INTERVALS: &[&str] = &["hours", "day", "10days", "month"];

/// Workspace `category`
pub const WORKSPACE_CATEGORIES: &[&str] = &[
    "marine-reserves",
    "marine-manager",
    "fishing-activity",
    "country-portals",
];
