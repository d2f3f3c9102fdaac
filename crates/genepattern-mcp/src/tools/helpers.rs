//! Shared helper functions for MCP tool implementations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use genepattern_client::{ApiResponse, ClientError, ClientResult};
use serde::Serialize;

use super::params::ContentEncoding;

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    serde_json::json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Error JSON for a failed client call. Remote rejections carry the status,
/// URL and response body verbatim.
pub fn client_error_json(err: &ClientError) -> String {
    let code = match err {
        ClientError::ApiError { status, url, body } => {
            return serde_json::json!({
                "error": "remote_rejection",
                "message": err.to_string(),
                "status": status,
                "url": url,
                "body": body,
            })
            .to_string();
        }
        ClientError::TransportError(_) => "transport_failure",
        ClientError::MissingCredential { .. } => "missing_credential",
        ClientError::InvalidInput(_) => "invalid_input",
        ClientError::IoError(_) => "io_error",
        ClientError::SerializationError(_) => "serialization_error",
        ClientError::UnexpectedResponse(_) => "unexpected_response",
        ClientError::ConfigError(_) | ClientError::UnknownCredentialProvider { .. } => {
            "configuration_error"
        }
    };
    error_json(code, &err.to_string())
}

/// Render a normalized response as tool output.
///
/// Structured values are pretty JSON, text is passed through, and bytes are
/// wrapped in a base64 envelope.
pub fn render_response(response: ApiResponse) -> String {
    match response {
        ApiResponse::Text(text) => text,
        ApiResponse::Bytes { content_type, data } => to_pretty(&serde_json::json!({
            "content_type": content_type,
            "size": data.len(),
            "encoding": "base64",
            "content": STANDARD.encode(&data),
        })),
        ApiResponse::Acknowledged => to_pretty(&ApiResponse::acknowledgment()),
        ApiResponse::Json(value) => to_pretty(&value),
    }
}

/// Render the result of a catalog call.
pub fn render(result: ClientResult<ApiResponse>) -> String {
    match result {
        Ok(response) => render_response(response),
        Err(e) => client_error_json(&e),
    }
}

/// Render the result of a composite call that produces a typed value.
pub fn render_value<T: Serialize>(result: ClientResult<T>) -> String {
    match result {
        Ok(value) => to_pretty(&value),
        Err(e) => client_error_json(&e),
    }
}

fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| error_json("serialization_error", &e.to_string()))
}

/// Turn a string-valued content parameter into bytes.
///
/// Returns a ready-to-send `invalid_input` error JSON on bad base64.
pub fn decode_content(
    field: &str,
    content: String,
    encoding: Option<ContentEncoding>,
) -> Result<Vec<u8>, String> {
    match encoding.unwrap_or_default() {
        ContentEncoding::Utf8 => Ok(content.into_bytes()),
        ContentEncoding::Base64 => STANDARD.decode(content.trim()).map_err(|e| {
            error_json(
                "invalid_input",
                &format!("{field} is not valid base64: {e}"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn envelope(content_type: Option<&str>, data: &'static [u8]) -> ApiResponse {
        ApiResponse::Bytes {
            content_type: content_type.map(str::to_string),
            data: data.into(),
        }
    }

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_error_json_shape() {
        let v = parse(&error_json("invalid_input", "bad"));
        assert_eq!(v["error"], "invalid_input");
        assert_eq!(v["message"], "bad");
    }

    #[test]
    fn test_remote_rejection_fields() {
        let err = ClientError::api_error(404, "http://gp/gp/rest/v1/jobs/1", "Job not found");
        let v = parse(&client_error_json(&err));
        assert_eq!(v["error"], "remote_rejection");
        assert_eq!(v["status"], 404);
        assert_eq!(v["url"], "http://gp/gp/rest/v1/jobs/1");
        assert_eq!(v["body"], "Job not found");
    }

    #[test]
    fn test_error_codes() {
        let cases = [
            (ClientError::TransportError("refused".into()), "transport_failure"),
            (
                ClientError::MissingCredential {
                    provider: "env".into(),
                },
                "missing_credential",
            ),
            (ClientError::invalid_input("x"), "invalid_input"),
            (ClientError::unexpected_response("x"), "unexpected_response"),
            (ClientError::config_error("x"), "configuration_error"),
        ];
        for (err, code) in cases {
            assert_eq!(parse(&client_error_json(&err))["error"], code);
        }
    }

    #[test]
    fn test_render_acknowledgment() {
        let v = parse(&render_response(ApiResponse::Acknowledged));
        assert_eq!(v["status"], "success");
    }

    #[test]
    fn test_render_text_verbatim() {
        assert_eq!(
            render_response(ApiResponse::Text("<p>hi</p>".to_string())),
            "<p>hi</p>"
        );
    }

    #[test]
    fn test_render_bytes_envelope() {
        let v = parse(&render_response(envelope(Some("application/zip"), b"PK\x03\x04")));
        assert_eq!(v["content_type"], "application/zip");
        assert_eq!(v["size"], 4);
        assert_eq!(v["encoding"], "base64");
        assert_eq!(v["content"], "UEsDBA==");
    }

    #[test]
    fn test_decode_content() {
        assert_eq!(decode_content("c", "héllo".to_string(), None).unwrap(), "héllo".as_bytes());
        assert_eq!(
            decode_content("c", "UEsDBA==".to_string(), Some(ContentEncoding::Base64)).unwrap(),
            b"PK\x03\x04"
        );
        let err = decode_content("file_content", "%%%".to_string(), Some(ContentEncoding::Base64))
            .unwrap_err();
        let v = parse(&err);
        assert_eq!(v["error"], "invalid_input");
        assert!(v["message"].as_str().unwrap().starts_with("file_content"));
    }
}
