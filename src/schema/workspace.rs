//! `gfw_workspace`

use super::json::{JsonText, parse_list, parse_optional, render_list};
use super::validate::{not_empty, one_of, optional_iso8601, optional_one_of};
use super::{block, changed, de, enums, single};
use gfwapi::Result;
use gfwapi::types::{
    DataviewInstance, JsonObject, NewWorkspace, Viewport, Workspace, WorkspacePatch,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("FIRST_CAP is a valid regex"));
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("ALL_CAP is a valid regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("SEPARATORS is a valid regex"));

/// Default `app` of a workspace
pub const DEFAULT_APP: &str = "fishing-map";

/// Lowercase, underscore-separated form of a display name
///
/// `OceanWatch` becomes `ocean_watch`; `Marine Reserves 2024` becomes
/// `marine_reserves_2024`.
pub fn slug(name: &str) -> String {
    let snake = FIRST_CAP.replace_all(name, "${1}_${2}");
    let snake = ALL_CAP.replace_all(&snake, "${1}_${2}").to_lowercase();
    SEPARATORS
        .replace_all(&snake, "_")
        .trim_matches('_')
        .to_string()
}

/// `viewport`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportBlock {
    pub zoom: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<ViewportBlock> for Viewport {
    fn from(v: ViewportBlock) -> Self {
        Self {
            zoom: v.zoom,
            latitude: v.latitude,
            longitude: v.longitude,
        }
    }
}

impl From<Viewport> for ViewportBlock {
    fn from(v: Viewport) -> Self {
        Self {
            zoom: v.zoom,
            latitude: v.latitude,
            longitude: v.longitude,
        }
    }
}

/// One entry of `dataview_instances`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataviewInstanceBlock {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub dataview_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasets_config: Vec<JsonText>,
}

impl DataviewInstanceBlock {
    fn to_domain(&self, index: usize) -> Result<DataviewInstance> {
        let prefix = format!("dataview_instances.{index}");
        Ok(DataviewInstance {
            id: self.id.clone(),
            category: self.category.clone(),
            dataview_id: self.dataview_id.clone(),
            config: parse_optional(&format!("{prefix}.config"), self.config.as_ref())?,
            datasets_config: parse_list(
                &format!("{prefix}.datasets_config"),
                &self.datasets_config,
            )?,
        })
    }

    fn to_config(instance: DataviewInstance) -> Self {
        Self {
            id: instance.id,
            category: instance.category,
            dataview_id: instance.dataview_id,
            config: instance.config.as_ref().map(JsonText::from_object),
            datasets_config: render_list(&instance.datasets_config),
        }
    }
}

fn default_app() -> String {
    DEFAULT_APP.to_string()
}

/// Flat attribute tree of a workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Identity; derived from `name` and `public` on create when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_app")]
    pub app: String,
    #[serde(default)]
    pub public: bool,
    /// Map state as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JsonText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aoi: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub viewport: Vec<ViewportBlock>,
    /// Dataview ids, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "de::ids")]
    pub dataviews: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dataview_instances: Vec<DataviewInstanceBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl WorkspaceConfig {
    /// Identity used on create: `workspace_id`, or the slug of `name` with
    /// `-public` appended for public workspaces
    pub fn derived_id(&self) -> String {
        if let Some(id) = self.workspace_id.as_deref().filter(|id| !id.is_empty()) {
            return id.to_string();
        }
        let base = slug(&self.name);
        if self.public {
            format!("{base}-public")
        } else {
            base
        }
    }

    fn validate(&self) -> Result<()> {
        not_empty("name", &self.name)?;
        not_empty("description", &self.description)?;
        optional_one_of("category", self.category.as_deref(), enums::WORKSPACE_CATEGORIES)?;
        one_of("app", &self.app, enums::DATAVIEW_APPS)?;
        optional_iso8601("start_at", self.start_at.as_deref())?;
        optional_iso8601("end_at", self.end_at.as_deref())?;
        single("viewport", self.viewport.clone())?;
        Ok(())
    }

    fn instances(&self) -> Result<Vec<DataviewInstance>> {
        self.dataview_instances
            .iter()
            .enumerate()
            .map(|(i, instance)| instance.to_domain(i))
            .collect()
    }

    /// Build the write model, deriving the identity when unset
    pub fn to_domain(&self) -> Result<NewWorkspace> {
        self.validate()?;
        Ok(NewWorkspace {
            id: self.derived_id(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            app: self.app.clone(),
            public: self.public,
            state: parse_optional("state", self.state.as_ref())?,
            start_at: self.start_at.clone(),
            end_at: self.end_at.clone(),
            aoi: self.aoi.clone(),
            viewport: single("viewport", self.viewport.clone())?.map(Into::into),
            dataviews: self.dataviews.clone(),
            dataview_instances: self.instances()?,
        })
    }

    /// Flatten a read model
    pub fn to_config(workspace: Workspace) -> Self {
        let Workspace { fields, created_at } = workspace;
        Self {
            workspace_id: Some(fields.id),
            name: fields.name,
            description: fields.description,
            category: fields.category,
            app: fields.app,
            public: fields.public,
            state: fields.state.as_ref().map(JsonText::from_object),
            start_at: fields.start_at,
            end_at: fields.end_at,
            aoi: fields.aoi,
            viewport: block(fields.viewport.map(Into::into)),
            dataviews: fields.dataviews,
            dataview_instances: fields
                .dataview_instances
                .into_iter()
                .map(DataviewInstanceBlock::to_config)
                .collect(),
            created_at,
        }
    }

    /// Build a partial update carrying only the attributes that differ
    ///
    /// The identity is never patched.
    pub fn to_patch(prior: &Self, desired: &Self) -> Result<WorkspacePatch> {
        desired.validate()?;
        Ok(WorkspacePatch {
            name: changed(&prior.name, &desired.name),
            description: changed(&prior.description, &desired.description),
            category: changed(&prior.category, &desired.category),
            app: changed(&prior.app, &desired.app),
            public: changed(&prior.public, &desired.public),
            state: match changed(&prior.state, &desired.state) {
                Some(Some(text)) => Some(Some(text.to_object("state")?)),
                Some(None) => Some(None),
                None => None,
            },
            start_at: changed(&prior.start_at, &desired.start_at),
            end_at: changed(&prior.end_at, &desired.end_at),
            aoi: changed(&prior.aoi, &desired.aoi),
            viewport: match changed(&prior.viewport, &desired.viewport) {
                Some(viewport) => Some(single("viewport", viewport)?.map(Into::into)),
                None => None,
            },
            dataviews: changed(&prior.dataviews, &desired.dataviews),
            dataview_instances: match changed(
                &prior.dataview_instances,
                &desired.dataview_instances,
            ) {
                Some(_) => Some(desired.instances()?),
                None => None,
            },
        })
    }
}
