//! Normalized response values.

use bytes::Bytes;
use serde_json::Value;

/// Message returned in place of an empty 204 body.
pub const NO_CONTENT_MESSAGE: &str = "Request completed with no content.";

/// A GenePattern response normalized by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// HTTP 204.
    Acknowledged,
    /// `Content-Type` containing `application/json`.
    Json(Value),
    /// `Content-Type` containing `text/`.
    Text(String),
    /// Anything else.
    Bytes {
        content_type: Option<String>,
        data: Bytes,
    },
}

impl ApiResponse {
    /// The fixed value standing in for a 204 response.
    pub fn acknowledgment() -> Value {
        serde_json::json!({
            "status": "success",
            "message": NO_CONTENT_MESSAGE,
        })
    }

    /// Structured view of the response, if it has one.
    ///
    /// Acknowledgments become [`ApiResponse::acknowledgment`].
    pub fn as_json(&self) -> Option<Value> {
        match self {
            ApiResponse::Acknowledged => Some(Self::acknowledgment()),
            ApiResponse::Json(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResponse::Acknowledged => Some(Self::acknowledgment()),
            ApiResponse::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgment_value() {
        let ack = ApiResponse::acknowledgment();
        assert_eq!(ack["status"], "success");
        assert_eq!(ack["message"], NO_CONTENT_MESSAGE);
        assert_eq!(ApiResponse::Acknowledged.as_json(), Some(ack));
    }

    #[test]
    fn test_text_and_bytes_have_no_json_view() {
        assert!(ApiResponse::Text("hi".to_string()).as_json().is_none());
        let bytes = ApiResponse::Bytes {
            content_type: Some("application/zip".to_string()),
            data: Bytes::from_static(b"PK"),
        };
        assert!(bytes.into_json().is_none());
    }
}
