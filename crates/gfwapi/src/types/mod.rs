//! Wire-format entity definitions.
//!
//! Each entity has a write projection (`New*`, the body of a create or full
//! replace) and a read projection that adds server-assigned fields. Field
//! names follow the API's camelCase convention; empty optional fields are
//! omitted from request bodies.

pub mod access;
pub mod dataset;
pub mod dataview;
pub mod pagination;
pub mod workspace;

pub use access::{
    Action, NewAction, NewPermission, NewResource, NewRole, NewUserGroup, Permission, Resource,
    Role, UserGroup,
};
pub use dataset::{
    BulkDownloadV1, ContextLayerV1, DataDownloadV1, Dataset, DatasetConfiguration,
    DatasetFilters, DatasetVariant, Documentation, EventsV1, FilterConfig, FourwingsV1, Frontend,
    InsightSource, InsightsV1, NewDataset, PmTilesV1, PropertyRange, RelatedDataset,
    TemporalContextLayerV1, ThumbnailsV1, TracksV1, UserContextLayerV1, UserTracksV1, VesselsV1,
};
pub use dataview::{Dataview, DataviewConfig, DataviewLayer, DataviewPatch, NewDataview};
pub use pagination::{PAGE_SIZE, Page, Paginated};
pub use workspace::{DataviewInstance, NewWorkspace, Viewport, Workspace, WorkspacePatch};

use serde::{Deserialize, Deserializer};

/// Free-form JSON object passed through without schema validation.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Deserialize `null` as the type's default value.
///
/// The API returns `null` for empty lists on some entities.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
