//! Outbound request description consumed by the dispatcher.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;

use crate::error::{ClientError, ClientResult};

/// Converts a parameter value into its query-string form.
///
/// `None` means "absent": the key is dropped before transmission rather than
/// sent as an empty string or a placeholder.
pub trait ToQueryValue {
    fn to_query_value(&self) -> Option<String>;
}

impl ToQueryValue for str {
    fn to_query_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ToQueryValue for String {
    fn to_query_value(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ToQueryValue for bool {
    fn to_query_value(&self) -> Option<String> {
        Some(if *self { "true" } else { "false" }.to_string())
    }
}

macro_rules! numeric_query_value {
    ($($t:ty),*) => {
        $(impl ToQueryValue for $t {
            fn to_query_value(&self) -> Option<String> {
                Some(self.to_string())
            }
        })*
    };
}

numeric_query_value!(i32, i64, u32, u64, usize, f64);

impl<T: ToQueryValue + ?Sized> ToQueryValue for &T {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

impl<T: ToQueryValue> ToQueryValue for Option<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_ref().and_then(ToQueryValue::to_query_value)
    }
}

/// One file in a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// A multipart form: plain text fields followed by file parts.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.files.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            data,
        });
        self
    }

    pub(crate) fn into_form(self) -> reqwest::multipart::Form {
        let form = self
            .fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });
        self.files.into_iter().fold(form, |form, file| {
            let part = reqwest::multipart::Part::bytes(file.data).file_name(file.file_name);
            form.part(file.field, part)
        })
    }
}

/// Request body. Exactly one mode per request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    None,
    Json(serde_json::Value),
    Raw(Vec<u8>),
    Multipart(MultipartBody),
}

impl RequestBody {
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::None => "none",
            RequestBody::Json(_) => "json",
            RequestBody::Raw(_) => "raw",
            RequestBody::Multipart(_) => "multipart",
        }
    }
}

/// A single call against the REST API, relative to `{base}/rest`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, Option<String>)>,
    pub body: RequestBody,
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter. Absent values are kept here and stripped at dispatch.
    pub fn query<V: ToQueryValue>(mut self, key: &str, value: V) -> Self {
        self.query.push((key.to_string(), value.to_query_value()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn raw(mut self, body: Vec<u8>) -> Self {
        self.body = RequestBody::Raw(body);
        self
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    /// Add a header that overrides the dispatcher defaults.
    pub fn header(mut self, name: &str, value: &str) -> ClientResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::invalid_input(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::invalid_input(format!("Invalid value for header '{name}': {e}")))?;
        self.headers.push((name, value));
        Ok(self)
    }

    /// Query pairs that will actually be transmitted, in insertion order.
    pub fn transmitted_query(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_values_are_stripped() {
        let request = ApiRequest::get("/v1/jobs")
            .query("userId", None::<String>)
            .query("page", 1_u32)
            .query("tag", Some("rna-seq"))
            .query("pageSize", None::<u32>);
        assert_eq!(
            request.transmitted_query(),
            vec![("page", "1"), ("tag", "rna-seq")]
        );
    }

    #[test]
    fn test_bool_rendering_is_lowercase() {
        let request = ApiRequest::put("/v1/data/upload/a.txt")
            .query("replace", true)
            .query("prettyPrint", false);
        assert_eq!(
            request.transmitted_query(),
            vec![("replace", "true"), ("prettyPrint", "false")]
        );
    }

    #[test]
    fn test_float_rendering() {
        let request = ApiRequest::get("/x").query("position", 1.5_f64);
        assert_eq!(request.transmitted_query(), vec![("position", "1.5")]);
    }

    #[test]
    fn test_body_modes_replace_each_other() {
        let request = ApiRequest::post("/v1/jobs")
            .raw(b"hi".to_vec())
            .json(serde_json::json!({"lsid": "x"}));
        assert_eq!(request.body.kind(), "json");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = ApiRequest::get("/x").header("bad header", "v").unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_multipart_builder() {
        let body = MultipartBody::new()
            .text("resumableChunkNumber", "1")
            .file("file", "a.txt", b"abc".to_vec());
        assert_eq!(body.fields.len(), 1);
        assert_eq!(body.files[0].file_name, "a.txt");
    }

    proptest! {
        #[test]
        fn prop_absent_keys_never_transmitted(
            params in proptest::collection::vec(
                ("[a-zA-Z]{1,12}", proptest::option::of("[a-z0-9]{0,8}")),
                0..20,
            )
        ) {
            let request = params.iter().fold(ApiRequest::get("/v1/jobs"), |req, (k, v)| {
                req.query(k, v.clone())
            });
            let transmitted = request.transmitted_query();

            let expected: Vec<(&str, &str)> = params
                .iter()
                .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
                .collect();
            prop_assert_eq!(&transmitted, &expected);

            for (key, value) in &params {
                if value.is_none() && !params.iter().any(|(k, v)| k == key && v.is_some()) {
                    prop_assert!(transmitted.iter().all(|(k, _)| k != key));
                }
            }
            prop_assert!(transmitted.iter().all(|(_, v)| *v != "None"));
        }
    }
}
