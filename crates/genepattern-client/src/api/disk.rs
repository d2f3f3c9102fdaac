//! Disk quota and job limit endpoints.

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

impl GenePatternClient {
    /// Storage usage, quota and job limits for the current user.
    pub async fn get_disk_info(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/disk")).await
    }

    /// Ask the server to notify the user (and admins) that the simultaneous
    /// job limit was hit. Returns the refreshed quota information.
    pub async fn notify_max_jobs_exceeded(
        &self,
        ctx: &CallContext,
        task_name: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::post("/v1/disk/notifyMaxJobsExceeded").query("taskName", task_name);
        self.dispatch(ctx, request).await
    }
}
