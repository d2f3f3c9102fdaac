//! Job submission, search and lifecycle endpoints under `/v1/jobs`.

use serde_json::Value;

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Filters and paging for `GET /v1/jobs`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSearchQuery {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub batch_id: Option<String>,
    pub tag: Option<String>,
    pub comment: Option<String>,
    pub module: Option<String>,
    pub page: u32,
    pub page_size: Option<u32>,
    pub order_by: Option<String>,
    pub order_files_by: Option<String>,
    pub include_children: bool,
    pub include_input_params: bool,
    pub include_output_files: bool,
    pub include_permissions: bool,
    pub pretty_print: bool,
}

impl Default for JobSearchQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            group_id: None,
            batch_id: None,
            tag: None,
            comment: None,
            module: None,
            page: 1,
            page_size: None,
            order_by: None,
            order_files_by: None,
            include_children: true,
            include_input_params: false,
            include_output_files: true,
            include_permissions: true,
            pretty_print: true,
        }
    }
}

impl JobSearchQuery {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("userId", self.user_id.as_deref())
            .query("groupId", self.group_id.as_deref())
            .query("batchId", self.batch_id.as_deref())
            .query("tag", self.tag.as_deref())
            .query("comment", self.comment.as_deref())
            .query("module", self.module.as_deref())
            .query("page", self.page)
            .query("pageSize", self.page_size)
            .query("orderBy", self.order_by.as_deref())
            .query("orderFilesBy", self.order_files_by.as_deref())
            .query("includeChildren", self.include_children)
            .query("includeInputParams", self.include_input_params)
            .query("includeOutputFiles", self.include_output_files)
            .query("includePermissions", self.include_permissions)
            .query("prettyPrint", self.pretty_print)
    }
}

/// Detail flags for `GET /v1/jobs/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobDetailOptions {
    pub include_permissions: bool,
    pub include_children: bool,
    pub include_input_params: bool,
    pub include_output_files: bool,
    pub pretty_print: bool,
}

impl Default for JobDetailOptions {
    fn default() -> Self {
        Self {
            include_permissions: false,
            include_children: true,
            include_input_params: false,
            include_output_files: true,
            pretty_print: true,
        }
    }
}

impl GenePatternClient {
    pub async fn get_job_search_results(
        &self,
        ctx: &CallContext,
        search: &JobSearchQuery,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, search.apply(ApiRequest::get("/v1/jobs")))
            .await
    }

    /// Submit a job. `job_config` is forwarded as the JSON body unchanged.
    pub async fn add_job(&self, ctx: &CallContext, job_config: Value) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::post("/v1/jobs").json(job_config))
            .await
    }

    pub async fn get_job(
        &self,
        ctx: &CallContext,
        job_id: &str,
        options: JobDetailOptions,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get(format!("/v1/jobs/{job_id}"))
            .query("includePermissions", options.include_permissions)
            .query("includeChildren", options.include_children)
            .query("includeInputParams", options.include_input_params)
            .query("includeOutputFiles", options.include_output_files)
            .query("prettyPrint", options.pretty_print);
        self.dispatch(ctx, request).await
    }

    pub async fn get_job_status(&self, ctx: &CallContext, job_id: &str) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get(format!("/v1/jobs/{job_id}/status.json")))
            .await
    }

    pub async fn terminate_job(&self, ctx: &CallContext, job_id: &str) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::delete(format!("/v1/jobs/{job_id}/terminate")))
            .await
    }

    pub async fn delete_job(&self, ctx: &CallContext, job_id: &str) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::delete(format!("/v1/jobs/{job_id}/delete")))
            .await
    }

    pub async fn add_tag_to_job(
        &self,
        ctx: &CallContext,
        job_no: i64,
        tag_text: &str,
    ) -> ClientResult<ApiResponse> {
        let request =
            ApiRequest::post(format!("/v1/jobs/{job_no}/tags/add")).query("tagText", tag_text);
        self.dispatch(ctx, request).await
    }

    pub async fn remove_tag_from_job(
        &self,
        ctx: &CallContext,
        job_no: i64,
        tag_text: &str,
    ) -> ClientResult<ApiResponse> {
        let request =
            ApiRequest::delete(format!("/v1/jobs/{job_no}/tags/delete")).query("tagText", tag_text);
        self.dispatch(ctx, request).await
    }

    /// Most recent jobs for the current user.
    pub async fn get_recent_jobs(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/jobs/recent")).await
    }

    /// Jobs that have not reached a terminal state.
    pub async fn get_incomplete_jobs(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/jobs/incomplete")).await
    }

    pub async fn get_job_children(&self, ctx: &CallContext, job_id: &str) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get(format!("/v1/jobs/{job_id}/children")))
            .await
    }

    /// Code snippet that reproduces the job in `language` (e.g. `Python`, `R`).
    pub async fn get_job_code(
        &self,
        ctx: &CallContext,
        job_id: &str,
        language: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get(format!("/v1/jobs/{job_id}/code")).query("language", language);
        self.dispatch(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults_match_server_defaults() {
        let request = JobSearchQuery::default().apply(ApiRequest::get("/v1/jobs"));
        assert_eq!(
            request.transmitted_query(),
            vec![
                ("page", "1"),
                ("includeChildren", "true"),
                ("includeInputParams", "false"),
                ("includeOutputFiles", "true"),
                ("includePermissions", "true"),
                ("prettyPrint", "true"),
            ]
        );
    }

    #[test]
    fn test_search_filters_use_camel_case() {
        let search = JobSearchQuery {
            user_id: Some("alice".to_string()),
            batch_id: Some("b-7".to_string()),
            page_size: Some(25),
            order_files_by: Some("name".to_string()),
            ..JobSearchQuery::default()
        };
        let request = search.apply(ApiRequest::get("/v1/jobs"));
        let query = request.transmitted_query();
        assert!(query.contains(&("userId", "alice")));
        assert!(query.contains(&("batchId", "b-7")));
        assert!(query.contains(&("pageSize", "25")));
        assert!(query.contains(&("orderFilesBy", "name")));
        assert!(query.iter().all(|(k, _)| *k != "groupId"));
    }

    #[test]
    fn test_detail_defaults() {
        let options = JobDetailOptions::default();
        assert!(!options.include_permissions);
        assert!(options.include_children);
        assert!(!options.include_input_params);
        assert!(options.include_output_files);
        assert!(options.pretty_print);
    }
}
