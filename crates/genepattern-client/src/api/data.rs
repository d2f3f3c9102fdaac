//! User upload space endpoints under `/v1/data`.

use std::path::Path;

use tracing::debug;

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::{ApiRequest, MultipartBody};
use crate::response::ApiResponse;

const JOB_INPUT_FORM_PATH: &str = "/v1/data/upload/job_input_form";

impl GenePatternClient {
    /// Rename `path` to `name`, keeping it in the same directory.
    pub async fn rename_file(
        &self,
        ctx: &CallContext,
        path: &str,
        name: &str,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::put("/v1/data/rename")
            .query("path", path)
            .query("name", name);
        self.dispatch(ctx, request).await
    }

    /// Not recursive; the parent directory must exist.
    pub async fn create_directory(&self, ctx: &CallContext, path: &str) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::put(format!("/v1/data/createDirectory/{path}")))
            .await
    }

    pub async fn delete_file_or_directory(
        &self,
        ctx: &CallContext,
        path: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::delete(format!("/v1/data/delete/{path}")))
            .await
    }

    pub async fn copy_file(
        &self,
        ctx: &CallContext,
        source: &str,
        destination: &str,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::post("/v1/data/copy")
            .query("from", source)
            .query("to", destination);
        self.dispatch(ctx, request).await
    }

    pub async fn move_file(
        &self,
        ctx: &CallContext,
        source: &str,
        destination: &str,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::put("/v1/data/move")
            .query("from", source)
            .query("to", destination);
        self.dispatch(ctx, request).await
    }

    pub async fn get_user_files(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/data/user/files"))
            .await
    }

    /// Directories come back as a zip archive.
    pub async fn download_item(&self, ctx: &CallContext, path: &str) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/data/download").query("path", path))
            .await
    }

    /// Upload `content` as the raw body to `path` in the user's upload space.
    pub async fn upload_file(
        &self,
        ctx: &CallContext,
        path: &str,
        content: Vec<u8>,
        replace: bool,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::put(format!("/v1/data/upload/{path}"))
            .query("replace", replace)
            .raw(content);
        self.dispatch(ctx, request).await
    }

    pub async fn upload_job_input_from_body(
        &self,
        ctx: &CallContext,
        name: &str,
        content: Vec<u8>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::post("/v1/data/upload/job_input")
            .query("name", name)
            .raw(content);
        self.dispatch(ctx, request).await
    }

    pub async fn upload_job_input_from_form(
        &self,
        ctx: &CallContext,
        file_name: &str,
        content: Vec<u8>,
    ) -> ClientResult<ApiResponse> {
        let form = MultipartBody::new().file("file", file_name, content);
        self.dispatch(ctx, ApiRequest::post(JOB_INPUT_FORM_PATH).multipart(form))
            .await
    }

    /// Attach `content` to job `jobid` as an output file named `name`.
    pub async fn upload_job_output(
        &self,
        ctx: &CallContext,
        name: &str,
        jobid: &str,
        content: Vec<u8>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::post("/v1/data/upload/job_output")
            .query("name", name)
            .query("jobid", jobid)
            .raw(content);
        self.dispatch(ctx, request).await
    }

    /// Create a provenance pipeline from a job result file. Without a name the
    /// server picks one.
    pub async fn create_pipeline(
        &self,
        ctx: &CallContext,
        path: &str,
        name: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        let name = name.filter(|n| !n.is_empty());
        let request =
            ApiRequest::put(format!("/v1/data/createPipeline/{path}")).query("name", name);
        self.dispatch(ctx, request).await
    }

    /// Read a local file and upload it to `remote_path`.
    pub async fn upload_file_from_path(
        &self,
        ctx: &CallContext,
        local_path: &Path,
        remote_path: &str,
        replace: bool,
    ) -> ClientResult<ApiResponse> {
        let content = tokio::fs::read(local_path).await?;
        debug!(local_path = %local_path.display(), size = content.len(), "Read local file for upload");
        self.upload_file(ctx, remote_path, content, replace).await
    }

    /// Read a local file and upload it as a job input form part named `file_name`.
    pub async fn upload_file_for_job_input(
        &self,
        ctx: &CallContext,
        local_path: &Path,
        file_name: &str,
    ) -> ClientResult<ApiResponse> {
        let content = tokio::fs::read(local_path).await?;
        debug!(local_path = %local_path.display(), size = content.len(), "Read local file for upload");
        self.upload_job_input_from_form(ctx, file_name, content)
            .await
    }
}
