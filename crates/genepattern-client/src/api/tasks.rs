//! Task (module) metadata endpoints under `/v1/tasks`, plus the listing
//! helpers built on `all.json`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::{ClientError, ClientResult};
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Detail flags for `GET /v1/tasks/{nameOrLsid}`. All default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDetailOptions {
    pub include_properties: bool,
    pub include_children: bool,
    pub include_eula: bool,
    pub include_support_files: bool,
    pub include_param_groups: bool,
    pub include_memory_settings: bool,
}

impl Default for TaskDetailOptions {
    fn default() -> Self {
        Self {
            include_properties: true,
            include_children: true,
            include_eula: true,
            include_support_files: true,
            include_param_groups: true,
            include_memory_settings: true,
        }
    }
}

/// The `all.json` task listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleListing {
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_modules: Vec<ModuleSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_categories: Vec<CategorySummary>,
}

/// One entry of `all_modules`. Fields not modelled here are kept in `extra`
/// so the entry serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lsid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleSummary {
    /// Substring match on name, description or LSID; exact match on a tag.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.contains(keyword)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.contains(keyword))
            || self.tags.iter().any(|t| t == keyword)
            || self.lsid.contains(keyword)
    }

    /// Exact name or LSID match. A version-less LSID matches every version.
    pub fn is_identified_by(&self, name_or_lsid: &str) -> bool {
        if self.name == name_or_lsid || self.lsid == name_or_lsid {
            return true;
        }
        is_versionless_lsid(name_or_lsid)
            && self
                .lsid
                .strip_prefix(name_or_lsid)
                .is_some_and(|rest| rest.starts_with(':') && !rest[1..].contains(':'))
    }
}

/// One entry of `all_categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A missing field and an explicit `null` both become the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `urn:lsid:<authority>:<namespace>:<object>` without the trailing `:<version>`.
fn is_versionless_lsid(value: &str) -> bool {
    value.starts_with("urn:lsid:") && value.split(':').count() == 5
}

impl GenePatternClient {
    pub async fn get_all_tasks(
        &self,
        ctx: &CallContext,
        include_hidden: Option<bool>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get("/v1/tasks/all.json").query("includeHidden", include_hidden);
        self.dispatch(ctx, request).await
    }

    pub async fn get_task(
        &self,
        ctx: &CallContext,
        name_or_lsid: &str,
        options: TaskDetailOptions,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get(format!("/v1/tasks/{name_or_lsid}"))
            .query("includeProperties", options.include_properties)
            .query("includeChildren", options.include_children)
            .query("includeEula", options.include_eula)
            .query("includeSupportFiles", options.include_support_files)
            .query("includeParamGroups", options.include_param_groups)
            .query("includeMemorySettings", options.include_memory_settings);
        self.dispatch(ctx, request).await
    }

    pub async fn get_task_manifest(
        &self,
        ctx: &CallContext,
        name_or_lsid: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get(format!("/v1/tasks/{name_or_lsid}/manifest")))
            .await
    }

    pub async fn get_task_eula_info(
        &self,
        ctx: &CallContext,
        name_or_lsid: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(
            ctx,
            ApiRequest::get(format!("/v1/tasks/{name_or_lsid}/eulaInfo.json")),
        )
        .await
    }

    /// Fetch and parse the `all.json` listing.
    pub async fn get_module_listing(&self, ctx: &CallContext) -> ClientResult<ModuleListing> {
        match self.get_all_tasks(ctx, None).await? {
            ApiResponse::Json(value) => Ok(serde_json::from_value(value)?),
            other => Err(ClientError::unexpected_response(format!(
                "task listing was not JSON ({})",
                response_kind(&other)
            ))),
        }
    }

    /// Modules whose name, description, tag or LSID matches `keyword`.
    pub async fn filter_modules(
        &self,
        ctx: &CallContext,
        keyword: &str,
    ) -> ClientResult<Vec<ModuleSummary>> {
        let listing = self.get_module_listing(ctx).await?;
        Ok(listing
            .all_modules
            .into_iter()
            .filter(|m| m.matches_keyword(keyword))
            .collect())
    }

    pub async fn list_module_names(&self, ctx: &CallContext) -> ClientResult<Vec<String>> {
        let listing = self.get_module_listing(ctx).await?;
        Ok(listing.all_modules.into_iter().map(|m| m.name).collect())
    }

    pub async fn list_module_categories(&self, ctx: &CallContext) -> ClientResult<Vec<String>> {
        let listing = self.get_module_listing(ctx).await?;
        Ok(listing.all_categories.into_iter().map(|c| c.name).collect())
    }
}

fn response_kind(response: &ApiResponse) -> &'static str {
    match response {
        ApiResponse::Acknowledged => "empty",
        ApiResponse::Json(_) => "json",
        ApiResponse::Text(_) => "text",
        ApiResponse::Bytes { .. } => "binary",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LSID: &str = "urn:lsid:broad.mit.edu:cancer.software.genepattern.module.analysis:00002";

    fn module(name: &str, lsid: &str, description: Option<&str>, tags: &[&str]) -> ModuleSummary {
        ModuleSummary {
            name: name.to_string(),
            lsid: lsid.to_string(),
            description: description.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            documentation: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_keyword_matching() {
        let m = module(
            "PreprocessDataset",
            &format!("{LSID}:6"),
            Some("Performs pre-processing operations"),
            &["Preprocess & Utilities"],
        );
        assert!(m.matches_keyword("Preprocess"));
        assert!(m.matches_keyword("pre-processing"));
        assert!(m.matches_keyword("Preprocess & Utilities"));
        assert!(m.matches_keyword("00002"));
        assert!(!m.matches_keyword("Utilities"));
        assert!(!m.matches_keyword("preprocessdataset"));
    }

    #[test]
    fn test_identified_by_name_and_lsid() {
        let m = module("PreprocessDataset", &format!("{LSID}:6"), None, &[]);
        assert!(m.is_identified_by("PreprocessDataset"));
        assert!(m.is_identified_by(&format!("{LSID}:6")));
        assert!(m.is_identified_by(LSID));
        assert!(!m.is_identified_by(&format!("{LSID}:5")));
        assert!(!m.is_identified_by("Preprocess"));
    }

    #[test]
    fn test_versionless_prefix_must_end_on_segment() {
        let m = module("X", &format!("{LSID}1:3"), None, &[]);
        assert!(!m.is_identified_by(LSID));
    }

    #[test]
    fn test_listing_keeps_unmodelled_fields() {
        let listing: ModuleListing = serde_json::from_value(json!({
            "all_modules": [{
                "name": "ComparativeMarkerSelection",
                "lsid": "urn:lsid:x:y:z:1",
                "tags": ["Differential Expression"],
                "version": "1",
                "categories": ["Gene List Selection"]
            }],
            "all_categories": [{"name": "Clustering", "description": "c"}]
        }))
        .unwrap();
        let entry = &listing.all_modules[0];
        assert_eq!(entry.extra["version"], "1");
        assert!(entry.description.is_none());

        let round = serde_json::to_value(entry).unwrap();
        assert_eq!(round["categories"], json!(["Gene List Selection"]));
        assert!(round.get("description").is_none());
        assert_eq!(listing.all_categories[0].name, "Clustering");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let listing: ModuleListing = serde_json::from_value(json!({
            "all_modules": [
                {"name": "Untagged", "lsid": null, "tags": null, "description": null},
                {"name": "Tagged", "lsid": "urn:lsid:x:y:z:1", "tags": ["Clustering"]}
            ],
            "all_categories": null
        }))
        .unwrap();
        let untagged = &listing.all_modules[0];
        assert_eq!(untagged.lsid, "");
        assert!(untagged.tags.is_empty());
        assert!(untagged.description.is_none());
        assert!(listing.all_categories.is_empty());

        let matching: Vec<&str> = listing
            .all_modules
            .iter()
            .filter(|m| m.matches_keyword("Clustering"))
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(matching, ["Tagged"]);
    }

    #[test]
    fn test_detail_defaults_all_true() {
        let o = TaskDetailOptions::default();
        assert!(
            o.include_properties
                && o.include_children
                && o.include_eula
                && o.include_support_files
                && o.include_param_groups
                && o.include_memory_settings
        );
    }
}
