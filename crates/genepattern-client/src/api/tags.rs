//! Job tags and the pinned-module ("Favorites") tag.

use serde::{Deserialize, Serialize};

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Body shared by the pin, repin and unpin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRequest {
    pub user: String,
    pub lsid: String,
    pub position: f64,
}

impl PinRequest {
    pub fn new(user: impl Into<String>, lsid: impl Into<String>, position: f64) -> Self {
        Self {
            user: user.into(),
            lsid: lsid.into(),
            position,
        }
    }
}

impl GenePatternClient {
    /// Every job tag the current user has created.
    pub async fn get_all_tags(&self, ctx: &CallContext) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get("/v1/tags")).await
    }

    pub async fn pin_module(&self, ctx: &CallContext, pin: &PinRequest) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(pin)?;
        self.dispatch(ctx, ApiRequest::post("/v1/tags/pin").json(body))
            .await
    }

    pub async fn repin_module(&self, ctx: &CallContext, pin: &PinRequest) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(pin)?;
        self.dispatch(ctx, ApiRequest::put("/v1/tags/repin").json(body))
            .await
    }

    /// The server requires `position` in the body even though it ignores it.
    pub async fn unpin_module(
        &self,
        ctx: &CallContext,
        user: &str,
        lsid: &str,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(PinRequest::new(user, lsid, 0.0))?;
        self.dispatch(ctx, ApiRequest::delete("/v1/tags/unpin").json(body))
            .await
    }
}
