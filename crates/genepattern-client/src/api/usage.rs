//! Usage statistics and client logging.

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

impl GenePatternClient {
    /// Admin-only usage summary. Dates are `YYYY-MM-DD`.
    pub async fn get_user_summary_stats(
        &self,
        ctx: &CallContext,
        start_date: &str,
        end_date: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(
            ctx,
            ApiRequest::get(format!("/v1/usagestats/user_summary/{start_date}/{end_date}")),
        )
        .await
    }

    pub async fn log_client_message(
        &self,
        ctx: &CallContext,
        logname: &str,
        loglevel: &str,
        message: &str,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get("/v1/usagelogging/log")
            .query("logname", logname)
            .query("loglevel", loglevel)
            .query("message", message);
        self.dispatch(ctx, request).await
    }
}
