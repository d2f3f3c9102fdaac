//! Server configuration endpoints under `/v1/config`.

use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Body of `POST /v1/config/system-message`.
///
/// `start` and `end` are ISO 8601 timestamps; absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_on_restart: Option<bool>,
}

impl GenePatternClient {
    /// The active system banner, as HTML.
    pub async fn get_system_message(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get("/v1/config/system-message").header(ACCEPT.as_str(), "text/html")?;
        self.dispatch(ctx, request).await
    }

    /// Admin only.
    pub async fn set_system_message(
        &self,
        ctx: &CallContext,
        message: &SystemMessage,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(message)?;
        self.dispatch(ctx, ApiRequest::post("/v1/config/system-message").json(body))
            .await
    }

    pub async fn get_server_property(
        &self,
        ctx: &CallContext,
        property_name: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(
            ctx,
            ApiRequest::get(format!("/v1/config/property/{property_name}")),
        )
        .await
    }

    pub async fn get_genepattern_version(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/config/gp-version"))
            .await
    }

    /// The authenticated user's id.
    pub async fn get_current_user(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/config/user")).await
    }

    pub async fn is_admin(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/config/admin")).await
    }

    /// Probes an admin-only endpoint; non-admins get a remote rejection.
    pub async fn check_is_admin(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/config/is-admin"))
            .await
    }

    pub async fn get_server_url(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/config/gp-url")).await
    }
}
